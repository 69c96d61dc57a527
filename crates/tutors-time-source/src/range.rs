//! Inclusive day-key range filter

use serde::{Deserialize, Serialize};
use tutors_time_core::types::{DayKey, Observation};

/// Optional inclusive bounds on day keys
///
/// Bounds are compared against the day key text, so `2024-02` as an upper
/// bound excludes every day of February. An empty range admits everything.
///
/// # Examples
///
/// ```
/// use tutors_time_core::types::DayKey;
/// use tutors_time_source::DateRange;
///
/// let range = DateRange::new(Some("2024-02-01".into()), Some("2024-02-29".into()));
/// assert!(range.contains(&DayKey::new("2024-02-01")));
/// assert!(range.contains(&DayKey::new("2024-02-29")));
/// assert!(!range.contains(&DayKey::new("2024-03-01")));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub since: Option<String>,
    pub until: Option<String>,
}

impl DateRange {
    /// Create a range; bounds are trimmed and blank bounds are dropped
    pub fn new(since: Option<String>, until: Option<String>) -> Self {
        Self {
            since: normalize_bound(since),
            until: normalize_bound(until),
        }
    }

    /// A range with no bounds
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Whether neither bound is set
    pub fn is_empty(&self) -> bool {
        self.since.is_none() && self.until.is_none()
    }

    pub fn contains(&self, day: &DayKey) -> bool {
        let key = day.as_str();
        let after_since = self.since.as_deref().is_none_or(|since| key >= since);
        let before_until = self.until.as_deref().is_none_or(|until| key <= until);
        after_since && before_until
    }

    /// Keep only the observations whose day falls inside the range
    pub fn apply(&self, observations: Vec<Observation>) -> Vec<Observation> {
        if self.is_empty() {
            return observations;
        }
        observations
            .into_iter()
            .filter(|o| self.contains(&o.day_key))
            .collect()
    }
}

fn normalize_bound(bound: Option<String>) -> Option<String> {
    bound
        .map(|b| b.trim().to_string())
        .filter(|b| !b.is_empty())
}
