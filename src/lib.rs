//! tutors-time - Time-on-task calendars for Tutors courses
//!
//! This library provides functionality to:
//! - Load daily per-student activity from a calendar export or the hosted table
//! - Pivot it into per-student day and week grids
//! - Summarise a course by the median student per day and per week
//! - Render the views as terminal tables or JSON
//!
//! # Examples
//!
//! ```no_run
//! use tutors_time::{
//!     ViewKind,
//!     output::{CourseReport, get_formatter},
//!     source::{CourseTimeService, DateRange, JsonlSource},
//! };
//!
//! #[tokio::main]
//! async fn main() -> tutors_time::Result<()> {
//!     let service = CourseTimeService::new(JsonlSource::new("calendar.jsonl"));
//!     let course = service.load_course("web-dev", &DateRange::unbounded()).await?;
//!
//!     let report = CourseReport::new(course.id.as_str(), &course.title, &course.model);
//!     println!("{}", get_formatter(false, true).format_report(&report, &ViewKind::ALL));
//!     Ok(())
//! }
//! ```

pub mod cli;

pub use tutors_time_core::{
    aggregation, bucketing, color, columns, error, formatting, model, pivot, summary, types,
};
pub use tutors_time_source as source;
pub use tutors_time_terminal::output;

// Re-export commonly used types
pub use tutors_time_core::{CalendarModel, Result, TutorsTimeError, ViewKind};
pub use tutors_time_core::types::{CourseId, DayKey, Observation, StudentId, WeekKey};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
