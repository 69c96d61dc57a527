//! In-memory observation source

use crate::source::ObservationSource;
use async_trait::async_trait;
use std::collections::HashMap;
use tutors_time_core::types::{CourseId, Observation, StudentDirectory, StudentId};
use tutors_time_core::{Result, TutorsTimeError};

/// Observations held in memory
///
/// Useful for embedding and for tests. Individual courses can be marked as
/// failing to exercise error isolation.
///
/// # Examples
///
/// ```
/// use tutors_time_core::types::{CourseId, Observation};
/// use tutors_time_source::{MemorySource, ObservationSource};
///
/// # tokio_test::block_on(async {
/// let source = MemorySource::new(vec![Observation::new("2024-02-03", "s1", "c1", 90, 2)]);
/// let rows = source.fetch_calendar(&CourseId::new("c1")).await.unwrap();
/// assert_eq!(rows.len(), 1);
/// # });
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    observations: Vec<Observation>,
    titles: HashMap<CourseId, String>,
    names: StudentDirectory,
    failures: HashMap<CourseId, String>,
}

impl MemorySource {
    pub fn new(observations: Vec<Observation>) -> Self {
        Self {
            observations,
            ..Self::default()
        }
    }

    /// Set a course's stored title
    pub fn with_title(mut self, course_id: &str, title: &str) -> Self {
        self.titles.insert(CourseId::new(course_id), title.to_string());
        self
    }

    /// Set a student's display name
    pub fn with_name(mut self, student_id: &str, name: &str) -> Self {
        self.names.insert(StudentId::new(student_id), name.to_string());
        self
    }

    /// Make every fetch for a course fail with `message`
    pub fn with_failure(mut self, course_id: &str, message: &str) -> Self {
        self.failures
            .insert(CourseId::new(course_id), message.to_string());
        self
    }

    fn check_failure(&self, course_id: &CourseId) -> Result<()> {
        match self.failures.get(course_id) {
            Some(message) => Err(TutorsTimeError::DataSource {
                course_id: course_id.to_string(),
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ObservationSource for MemorySource {
    async fn fetch_calendar(&self, course_id: &CourseId) -> Result<Vec<Observation>> {
        self.check_failure(course_id)?;
        let mut rows: Vec<Observation> = self
            .observations
            .iter()
            .filter(|o| &o.course_id == course_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.day_key.cmp(&b.day_key));
        Ok(rows)
    }

    async fn fetch_course_title(&self, course_id: &CourseId) -> Result<Option<String>> {
        self.check_failure(course_id)?;
        Ok(self.titles.get(course_id).cloned())
    }

    async fn fetch_student_names(&self, course_id: &CourseId) -> Result<StudentDirectory> {
        self.check_failure(course_id)?;
        Ok(self.names.clone())
    }
}
