//! Core types, bucketing, aggregation, and view building for tutors-time
//!
//! This crate turns a flat batch of daily time-on-task observations into
//! per-student pivot rows and per-course median rows, together with the
//! column descriptors and cell colouring used by every output sink.
//!
//! Everything here is synchronous and pure: the same batch always yields
//! the same views.

pub mod aggregation;
pub mod bucketing;
pub mod color;
pub mod columns;
pub mod error;
pub mod formatting;
pub mod model;
pub mod pivot;
pub mod summary;
pub mod types;

#[cfg(test)]
pub mod test_utils;

// Re-export commonly used types
pub use error::{Result, TutorsTimeError};
pub use model::{CalendarModel, ViewKind};
pub use types::{
    BucketKey, CourseId, DayKey, Granularity, Observation, StudentDirectory, StudentId, WeekKey,
};
