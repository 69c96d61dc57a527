//! Observation sources, course loading, and caching for tutors-time
//!
//! Sources deliver raw calendar observations for a course. The loader fans
//! out over several courses and keeps their failures apart, and
//! [`CourseTimeService`] builds calendar models on top with a per-course
//! cache.

pub mod cache;
pub mod jsonl;
pub mod loader;
pub mod memory;
pub mod range;
pub mod rest;
pub mod service;
pub mod source;

pub use cache::CourseCache;
pub use jsonl::JsonlSource;
pub use loader::{CourseLoad, load_courses, normalize_course_ids};
pub use memory::MemorySource;
pub use range::DateRange;
pub use rest::RestSource;
pub use service::{CourseTime, CourseTimeService, StudentCalendar};
pub use source::{ObservationSource, course_display_title};
