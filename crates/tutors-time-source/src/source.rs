//! Observation source trait
//!
//! This module defines the `ObservationSource` trait that every calendar
//! backend implements. A source only delivers raw rows; bucketing and medians
//! are the core's business.

use crate::range::DateRange;
use async_trait::async_trait;
use tracing::debug;
use tutors_time_core::Result;
use tutors_time_core::types::{CourseId, Observation, StudentDirectory};

/// A backend that can deliver calendar observations for a course
///
/// Implementations are shared across concurrent course loads, so they must
/// be `Send + Sync`.
#[async_trait]
pub trait ObservationSource: Send + Sync {
    /// Every observation recorded for a course, ordered by day key
    async fn fetch_calendar(&self, course_id: &CourseId) -> Result<Vec<Observation>>;

    /// The course's stored title, if the backend has one
    async fn fetch_course_title(&self, course_id: &CourseId) -> Result<Option<String>>;

    /// Display names for the students of a course
    ///
    /// Backends without a directory return an empty map and rows fall back to
    /// student ids.
    async fn fetch_student_names(&self, _course_id: &CourseId) -> Result<StudentDirectory> {
        Ok(StudentDirectory::new())
    }

    /// A course's observations restricted to a date range
    async fn fetch_observations(
        &self,
        course_id: &CourseId,
        range: &DateRange,
    ) -> Result<Vec<Observation>> {
        let observations = self.fetch_calendar(course_id).await?;
        let fetched = observations.len();
        let kept = range.apply(observations);
        debug!(
            "Kept {} of {} observations for {} in {:?}",
            kept.len(),
            fetched,
            course_id,
            range
        );
        Ok(kept)
    }
}

/// Title to show for a course
///
/// Falls back to the course id when the lookup fails or the stored title is
/// blank, so a heading can always be drawn.
pub async fn course_display_title<S>(source: &S, course_id: &CourseId) -> String
where
    S: ObservationSource + ?Sized,
{
    match source.fetch_course_title(course_id).await {
        Ok(Some(title)) if !title.trim().is_empty() => title.trim().to_string(),
        Ok(_) => course_id.to_string(),
        Err(e) => {
            debug!("Course title lookup failed for {}: {}", course_id, e);
            course_id.to_string()
        }
    }
}
