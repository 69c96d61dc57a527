//! Course time service
//!
//! Front door for callers that want calendar models rather than raw rows.
//! Unfiltered course loads are cached per course id; filtered loads and
//! single-student calendars are always fetched fresh.

use crate::cache::CourseCache;
use crate::loader::{load_courses, normalize_course_ids};
use crate::range::DateRange;
use crate::source::{ObservationSource, course_display_title};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};
use tutors_time_core::types::{CourseId, StudentDirectory, StudentId};
use tutors_time_core::{CalendarModel, Result, TutorsTimeError};

/// A course's calendar model with its display title
#[derive(Debug, Clone)]
pub struct CourseTime {
    pub id: CourseId,
    pub title: String,
    pub model: CalendarModel,
}

/// One student's calendar within a course
#[derive(Debug, Clone)]
pub struct StudentCalendar {
    pub course_id: CourseId,
    pub student_id: StudentId,
    pub title: String,
    pub model: CalendarModel,
}

fn required(raw: &str, what: &str) -> Result<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(TutorsTimeError::InvalidArgument(format!("{} is required", what)));
    }
    Ok(trimmed.to_string())
}

/// Builds calendar models from an [`ObservationSource`]
pub struct CourseTimeService<S: ObservationSource + ?Sized> {
    source: Arc<S>,
    cache: CourseCache,
}

impl<S: ObservationSource> CourseTimeService<S> {
    pub fn new(source: S) -> Self {
        Self::from_arc(Arc::new(source))
    }
}

impl<S: ObservationSource + ?Sized> CourseTimeService<S> {
    pub fn from_arc(source: Arc<S>) -> Self {
        Self {
            source,
            cache: CourseCache::new(),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn cache(&self) -> &CourseCache {
        &self.cache
    }

    /// Load one course's calendar model
    ///
    /// With an empty range the result is served from, and stored in, the
    /// cache. A failed fetch still yields a model carrying the error message;
    /// such results are never cached.
    pub async fn load_course(&self, id: &str, range: &DateRange) -> Result<Arc<CourseTime>> {
        let id = CourseId::new(required(id, "Course ID")?);
        let use_cache = range.is_empty();

        if use_cache {
            if let Some(cached) = self.cache.get(&id).await {
                return Ok(cached);
            }
        }

        let course = Arc::new(self.build_course(id, range).await);

        if use_cache && course.model.error.is_none() {
            self.cache.insert(Arc::clone(&course)).await;
        }
        Ok(course)
    }

    /// Load several courses, each with its own error state
    ///
    /// With an empty range, courses already in the cache are served from it
    /// and only the rest are fetched. Results follow the normalized id order.
    pub async fn load_many<I: AsRef<str>>(
        &self,
        ids: &[I],
        range: &DateRange,
    ) -> Result<Vec<Arc<CourseTime>>> {
        let ids = normalize_course_ids(ids);
        if ids.is_empty() {
            return Err(TutorsTimeError::InvalidArgument(
                "At least one course ID is required".to_string(),
            ));
        }

        let use_cache = range.is_empty();
        let mut ready: HashMap<CourseId, Arc<CourseTime>> = HashMap::new();
        let mut misses: Vec<CourseId> = Vec::new();
        for id in &ids {
            let cached = if use_cache {
                self.cache.get(id).await
            } else {
                None
            };
            match cached {
                Some(course) => {
                    ready.insert(id.clone(), course);
                }
                None => misses.push(id.clone()),
            }
        }
        debug!(
            "{} of {} course(s) served from cache",
            ready.len(),
            ids.len()
        );

        if !misses.is_empty() {
            for load in load_courses(self.source.as_ref(), &misses, range).await? {
                let names = self.student_names(&load.id).await;
                let title = course_display_title(self.source.as_ref(), &load.id).await;
                let model = CalendarModel::with_names(
                    &load.observations,
                    load.loading,
                    load.error,
                    Some(&names),
                );
                let course = Arc::new(CourseTime {
                    id: load.id,
                    title,
                    model,
                });
                if use_cache && course.model.error.is_none() {
                    self.cache.insert(Arc::clone(&course)).await;
                }
                ready.insert(course.id.clone(), course);
            }
        }

        Ok(ids.iter().filter_map(|id| ready.remove(id)).collect())
    }

    /// Load one student's calendar, never cached
    pub async fn load_student_calendar(
        &self,
        course_id: &str,
        student_id: &str,
        range: &DateRange,
    ) -> Result<StudentCalendar> {
        let course_id = CourseId::new(required(course_id, "Course ID")?);
        let student_id = StudentId::new(required(student_id, "Student ID")?);

        let observations = self.source.fetch_observations(&course_id, range).await?;
        let observations: Vec<_> = observations
            .into_iter()
            .filter(|o| o.student_id == student_id)
            .collect();
        info!(
            "Loaded {} observations for {} in {}",
            observations.len(),
            student_id,
            course_id
        );

        let names = self.student_names(&course_id).await;
        let title = course_display_title(self.source.as_ref(), &course_id).await;
        let model = CalendarModel::with_names(&observations, false, None, Some(&names));

        Ok(StudentCalendar {
            course_id,
            student_id,
            title,
            model,
        })
    }

    async fn build_course(&self, id: CourseId, range: &DateRange) -> CourseTime {
        info!("Loading course {}", id);
        let (observations, error) = match self.source.fetch_observations(&id, range).await {
            Ok(observations) => (observations, None),
            Err(e) => {
                warn!("Failed to load course {}: {}", id, e);
                (Vec::new(), Some(e.to_string()))
            }
        };

        let names = self.student_names(&id).await;
        let title = course_display_title(self.source.as_ref(), &id).await;
        let model = CalendarModel::with_names(&observations, false, error, Some(&names));
        CourseTime { id, title, model }
    }

    async fn student_names(&self, course_id: &CourseId) -> StudentDirectory {
        match self.source.fetch_student_names(course_id).await {
            Ok(names) => names,
            Err(e) => {
                warn!("Could not load student names for {}: {}", course_id, e);
                StudentDirectory::new()
            }
        }
    }
}
