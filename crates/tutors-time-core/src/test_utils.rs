//! Shared test utilities for unit tests
//!
//! Integration tests cannot see this module because it is compiled only under
//! `#[cfg(test)]`; they carry their own builders in `tests/common/mod.rs`.

use crate::types::Observation;

/// Course id used by unit-test observations
pub const TEST_COURSE: &str = "course-1";

/// Observation in [`TEST_COURSE`] with no page loads
pub fn obs(day: &str, student: &str, seconds: u64) -> Observation {
    Observation::new(day, student, TEST_COURSE, seconds, 0)
}
