//! Per-course cache of built calendar models

use crate::service::CourseTime;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;
use tutors_time_core::types::CourseId;

/// Shared map from course id to its loaded course time
///
/// Only unfiltered loads are stored here; a date range produces a different
/// batch for the same id.
#[derive(Debug, Clone, Default)]
pub struct CourseCache {
    entries: Arc<RwLock<HashMap<CourseId, Arc<CourseTime>>>>,
}

impl CourseCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, course_id: &CourseId) -> Option<Arc<CourseTime>> {
        let entries = self.entries.read().await;
        let hit = entries.get(course_id).cloned();
        debug!(
            "Course cache {} for {}",
            if hit.is_some() { "hit" } else { "miss" },
            course_id
        );
        hit
    }

    pub async fn insert(&self, course: Arc<CourseTime>) {
        let mut entries = self.entries.write().await;
        entries.insert(course.id.clone(), course);
    }

    /// Drop one course, returning whether it was cached
    pub async fn invalidate(&self, course_id: &CourseId) -> bool {
        self.entries.write().await.remove(course_id).is_some()
    }

    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}
