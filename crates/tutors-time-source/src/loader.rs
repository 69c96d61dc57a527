//! Multi-course loading with per-course error isolation
//!
//! Every requested course is fetched concurrently. A course that fails keeps
//! its error message and an empty batch; the other courses are unaffected.

use crate::range::DateRange;
use crate::source::ObservationSource;
use futures::future::join_all;
use serde::Serialize;
use tracing::{info, warn};
use tutors_time_core::types::{CourseId, Observation};
use tutors_time_core::{Result, TutorsTimeError};

/// Load state of one course
#[derive(Debug, Clone, Serialize)]
pub struct CourseLoad {
    pub id: CourseId,
    pub observations: Vec<Observation>,
    pub loading: bool,
    pub error: Option<String>,
}

impl CourseLoad {
    fn finished(id: CourseId, outcome: Result<Vec<Observation>>) -> Self {
        match outcome {
            Ok(observations) => Self {
                id,
                observations,
                loading: false,
                error: None,
            },
            Err(e) => {
                warn!("Failed to load course {}: {}", id, e);
                Self {
                    id,
                    observations: Vec::new(),
                    loading: false,
                    error: Some(e.to_string()),
                }
            }
        }
    }
}

/// Trim ids, drop blanks, and remove duplicates keeping first-seen order
///
/// # Examples
///
/// ```
/// use tutors_time_source::normalize_course_ids;
///
/// let ids = normalize_course_ids(&[" web-dev ", "", "db", "web-dev"]);
/// let ids: Vec<&str> = ids.iter().map(|id| id.as_str()).collect();
/// assert_eq!(ids, vec!["web-dev", "db"]);
/// ```
pub fn normalize_course_ids<S: AsRef<str>>(ids: &[S]) -> Vec<CourseId> {
    let mut unique: Vec<CourseId> = Vec::new();
    for raw in ids {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            continue;
        }
        let id = CourseId::new(trimmed);
        if !unique.contains(&id) {
            unique.push(id);
        }
    }
    unique
}

/// Fetch several courses concurrently, restricted to `range`
///
/// Results are returned in the order of the normalized ids. Fails only when
/// no usable id was given.
pub async fn load_courses<S, I>(source: &S, ids: &[I], range: &DateRange) -> Result<Vec<CourseLoad>>
where
    S: ObservationSource + ?Sized,
    I: AsRef<str>,
{
    let ids = normalize_course_ids(ids);
    if ids.is_empty() {
        return Err(TutorsTimeError::InvalidArgument(
            "At least one course ID is required".to_string(),
        ));
    }

    info!("Loading {} course(s)", ids.len());

    let outcomes = join_all(ids.iter().map(|id| source.fetch_observations(id, range))).await;

    Ok(ids
        .into_iter()
        .zip(outcomes)
        .map(|(id, outcome)| CourseLoad::finished(id, outcome))
        .collect())
}
