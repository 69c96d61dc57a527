//! Calendar export files
//!
//! Reads a local export of the calendar table, one JSON row per line, using
//! the same field names as the hosted table. Course titles and student names
//! can come from optional JSON files mapping ids to strings.
//!
//! Blank lines are ignored and lines that do not parse are skipped with a
//! warning, so one corrupt row does not hide a whole course.

use crate::source::ObservationSource;
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, warn};
use tutors_time_core::Result;
use tutors_time_core::types::{CourseId, Observation, StudentDirectory, StudentId};

/// Observation source backed by a JSONL calendar export
#[derive(Debug, Clone)]
pub struct JsonlSource {
    calendar_path: PathBuf,
    courses_path: Option<PathBuf>,
    students_path: Option<PathBuf>,
}

impl JsonlSource {
    /// Create a source reading observations from `calendar_path`
    pub fn new(calendar_path: impl Into<PathBuf>) -> Self {
        Self {
            calendar_path: calendar_path.into(),
            courses_path: None,
            students_path: None,
        }
    }

    /// Read course titles from a JSON object of course id to title
    pub fn with_course_titles(mut self, path: impl Into<PathBuf>) -> Self {
        self.courses_path = Some(path.into());
        self
    }

    /// Read student names from a JSON object of student id to name
    pub fn with_student_names(mut self, path: impl Into<PathBuf>) -> Self {
        self.students_path = Some(path.into());
        self
    }

    /// Path of the calendar export
    pub fn path(&self) -> &Path {
        &self.calendar_path
    }

    async fn read_observations(&self, course_id: &CourseId) -> Result<Vec<Observation>> {
        let file = tokio::fs::File::open(&self.calendar_path).await?;
        let reader = BufReader::new(file);
        let mut lines = reader.lines();
        let mut line_number = 0;
        let mut skipped = 0;
        let mut rows = Vec::new();

        while let Some(line) = lines.next_line().await? {
            line_number += 1;

            if line.trim().is_empty() {
                continue;
            }

            match serde_json::from_str::<Observation>(&line) {
                Ok(observation) => {
                    if &observation.course_id == course_id {
                        rows.push(observation);
                    }
                }
                Err(e) => {
                    skipped += 1;
                    warn!(
                        "Skipping malformed calendar row at line {} in {}: {}",
                        line_number,
                        self.calendar_path.display(),
                        e
                    );
                }
            }
        }

        if skipped > 0 {
            debug!(
                "Skipped {} malformed rows in {}",
                skipped,
                self.calendar_path.display()
            );
        }

        rows.sort_by(|a, b| a.day_key.cmp(&b.day_key));
        Ok(rows)
    }

    async fn read_string_map(path: &Path) -> Result<HashMap<String, String>> {
        let content = tokio::fs::read_to_string(path).await?;
        Ok(serde_json::from_str(&content)?)
    }
}

#[async_trait]
impl ObservationSource for JsonlSource {
    async fn fetch_calendar(&self, course_id: &CourseId) -> Result<Vec<Observation>> {
        self.read_observations(course_id).await
    }

    async fn fetch_course_title(&self, course_id: &CourseId) -> Result<Option<String>> {
        let Some(path) = &self.courses_path else {
            return Ok(None);
        };
        let mut titles = Self::read_string_map(path).await?;
        Ok(titles.remove(course_id.as_str()))
    }

    async fn fetch_student_names(&self, _course_id: &CourseId) -> Result<StudentDirectory> {
        let Some(path) = &self.students_path else {
            return Ok(StudentDirectory::new());
        };
        let names = Self::read_string_map(path).await?;
        Ok(names
            .into_iter()
            .map(|(id, name)| (StudentId::new(id), name))
            .collect())
    }
}
