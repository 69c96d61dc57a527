//! Core domain types for tutors-time
//!
//! This module contains the fundamental types used throughout the tutors-time
//! crates. Identifiers and calendar keys are strongly typed so that a student
//! id can never be passed where a course id or a bucket key is expected.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Date format shared by day keys and week keys
pub const DAY_KEY_FORMAT: &str = "%Y-%m-%d";

/// Strongly-typed student identifier
///
/// # Examples
/// ```
/// use tutors_time_core::types::StudentId;
///
/// let student = StudentId::new("octocat");
/// assert_eq!(student.as_str(), "octocat");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StudentId(String);

impl StudentId {
    /// Create a new StudentId from any string-like type
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for StudentId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Strongly-typed course identifier
///
/// # Examples
/// ```
/// use tutors_time_core::types::CourseId;
///
/// let course = CourseId::new("full-stack-2024");
/// assert_eq!(course.to_string(), "full-stack-2024");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CourseId(String);

impl CourseId {
    /// Create a new CourseId from any string-like type
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the id is the empty string
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for CourseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for CourseId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Calendar day in `YYYY-MM-DD` form
///
/// Day keys are kept as the text delivered by the data source. For well-formed
/// keys, lexical order is chronological order, which is what every sort in the
/// core relies on. A malformed key is carried through untouched rather than
/// rejected.
///
/// # Examples
/// ```
/// use tutors_time_core::types::DayKey;
///
/// let day = DayKey::new("2024-02-03");
/// assert_eq!(day.to_date().unwrap().to_string(), "2024-02-03");
/// assert!(DayKey::new("not-a-date").to_date().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DayKey(String);

impl DayKey {
    /// Create a new DayKey
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parse the key as a calendar date
    pub fn to_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.0, DAY_KEY_FORMAT).ok()
    }
}

impl From<NaiveDate> for DayKey {
    fn from(date: NaiveDate) -> Self {
        Self(date.format(DAY_KEY_FORMAT).to_string())
    }
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Week identifier: the Monday that starts the ISO week, as `YYYY-MM-DD`
///
/// Week keys are only produced by [`crate::bucketing::week_of`], so the day to
/// week mapping has exactly one definition.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WeekKey(String);

impl WeekKey {
    pub(crate) fn starting(monday: NaiveDate) -> Self {
        debug_assert_eq!(monday.weekday(), Weekday::Mon);
        Self(monday.format(DAY_KEY_FORMAT).to_string())
    }

    pub(crate) fn unparsed(raw: &str) -> Self {
        Self(raw.to_string())
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First day of the week, when the key came from a valid date
    pub fn start_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.0, DAY_KEY_FORMAT)
            .ok()
            .filter(|d| d.weekday() == Weekday::Mon)
    }
}

impl fmt::Display for WeekKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Column bucket: either a day key or a week key
///
/// Pivot and summary rows key their per-bucket seconds by this type so the
/// same row shape serves both granularities.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BucketKey(String);

impl BucketKey {
    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&DayKey> for BucketKey {
    fn from(day: &DayKey) -> Self {
        Self(day.0.clone())
    }
}

impl From<&WeekKey> for BucketKey {
    fn from(week: &WeekKey) -> Self {
        Self(week.0.clone())
    }
}

impl fmt::Display for BucketKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Column granularity of a calendar view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Day,
    Week,
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Granularity::Day => write!(f, "day"),
            Granularity::Week => write!(f, "week"),
        }
    }
}

/// One calendar row: a student's activity in a course on one day
///
/// Field names on the wire follow the hosted `calendar` table
/// (`id`, `studentid`, `courseid`, `timeactive`, `pageloads`).
///
/// # Examples
/// ```
/// use tutors_time_core::types::Observation;
///
/// let row = r#"{"id":"2024-02-03","studentid":"s1","courseid":"c1","timeactive":90,"pageloads":4}"#;
/// let obs: Observation = serde_json::from_str(row).unwrap();
/// assert_eq!(obs.day_key.as_str(), "2024-02-03");
/// assert_eq!(obs.active_seconds, 90);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    /// Calendar day of the activity
    #[serde(rename = "id")]
    pub day_key: DayKey,
    /// Student the activity belongs to
    #[serde(rename = "studentid")]
    pub student_id: StudentId,
    /// Course the activity was recorded in
    #[serde(rename = "courseid")]
    pub course_id: CourseId,
    /// Seconds of active time on the day
    #[serde(rename = "timeactive", default, deserialize_with = "null_as_zero")]
    pub active_seconds: u64,
    /// Page loads on the day
    #[serde(rename = "pageloads", default, deserialize_with = "null_as_zero")]
    pub page_loads: u64,
}

impl Observation {
    /// Create a new observation
    pub fn new(
        day_key: impl Into<String>,
        student_id: impl Into<String>,
        course_id: impl Into<String>,
        active_seconds: u64,
        page_loads: u64,
    ) -> Self {
        Self {
            day_key: DayKey::new(day_key),
            student_id: StudentId::new(student_id),
            course_id: CourseId::new(course_id),
            active_seconds,
            page_loads,
        }
    }
}

/// Missing and `null` counters both read as zero
fn null_as_zero<'de, D>(deserializer: D) -> std::result::Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<u64>::deserialize(deserializer)?.unwrap_or(0))
}

/// Display names keyed by student id
pub type StudentDirectory = HashMap<StudentId, String>;
