//! Calendar model: the four views of one observation batch
//!
//! [`CalendarModel`] composes bucketing, pivoting, and summarising into the
//! views a sink draws: the per-student day and week pivots and the course's
//! median-by-day and median-by-week rows. Loading and error flags from the
//! fetch layer pass through untouched.
//!
//! # Examples
//!
//! ```
//! use tutors_time_core::model::CalendarModel;
//! use tutors_time_core::types::Observation;
//!
//! let batch = vec![
//!     Observation::new("2024-02-03", "s1", "web-dev", 90, 3),
//!     Observation::new("2024-02-05", "s2", "web-dev", 600, 9),
//! ];
//! let model = CalendarModel::new(&batch, false, None);
//!
//! assert!(model.has_data());
//! assert_eq!(model.day.rows.len(), 2);
//! assert_eq!(model.week.columns.len(), 2 + 1 + 2);
//! assert!(model.has_median_by_week());
//! ```

use crate::bucketing::{distinct_sorted_day_keys, distinct_sorted_week_keys};
use crate::columns::{ColumnDescriptor, ColumnField, student_columns, total_column};
use crate::pivot::{PivotRow, build_pivoted_rows, select_time_columns};
use crate::summary::{SummaryRow, build_median_by_day, build_median_by_week};
use crate::types::{CourseId, DayKey, Granularity, Observation, StudentDirectory, WeekKey};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Rows and columns of a per-student grid
#[derive(Debug, Clone)]
pub struct PivotView {
    pub rows: Vec<PivotRow>,
    pub columns: Vec<ColumnDescriptor>,
}

/// The single row and columns of a course summary grid
///
/// `row` is `None` when there were no students to summarise; sinks show an
/// empty state rather than a row of zeros.
#[derive(Debug, Clone)]
pub struct SummaryView {
    pub row: Option<SummaryRow>,
    pub columns: Vec<ColumnDescriptor>,
}

/// The views a [`CalendarModel`] offers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ViewKind {
    Day,
    Week,
    MedianByDay,
    MedianByWeek,
}

impl ViewKind {
    pub const ALL: [ViewKind; 4] = [
        ViewKind::Day,
        ViewKind::Week,
        ViewKind::MedianByDay,
        ViewKind::MedianByWeek,
    ];

    /// Heading used by sinks
    pub fn title(&self) -> &'static str {
        match self {
            ViewKind::Day => "Time by day",
            ViewKind::Week => "Time by week",
            ViewKind::MedianByDay => "Median by day",
            ViewKind::MedianByWeek => "Median by week",
        }
    }
}

impl fmt::Display for ViewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewKind::Day => write!(f, "day"),
            ViewKind::Week => write!(f, "week"),
            ViewKind::MedianByDay => write!(f, "median-by-day"),
            ViewKind::MedianByWeek => write!(f, "median-by-week"),
        }
    }
}

/// A view borrowed from a model
#[derive(Debug, Clone, Copy)]
pub enum View<'a> {
    Pivot(&'a PivotView),
    Summary(&'a SummaryView),
}

/// All calendar views of one batch, plus the fetch flags
#[derive(Debug, Clone)]
pub struct CalendarModel {
    pub day: PivotView,
    pub week: PivotView,
    pub median_by_day: SummaryView,
    pub median_by_week: SummaryView,
    pub loading: bool,
    pub error: Option<String>,
}

impl CalendarModel {
    /// Build the views, naming students by their ids
    pub fn new(observations: &[Observation], loading: bool, error: Option<String>) -> Self {
        Self::with_names(observations, loading, error, None)
    }

    /// Build the views, naming students from a directory where it has an entry
    pub fn with_names(
        observations: &[Observation],
        loading: bool,
        error: Option<String>,
        names: Option<&StudentDirectory>,
    ) -> Self {
        let weeks = distinct_sorted_week_keys(observations);
        let days = distinct_sorted_day_keys(observations);
        let course_id = observations
            .first()
            .map(|o| o.course_id.clone())
            .unwrap_or_default();

        debug!(
            "Building calendar model for '{}': {} observations, {} days, {} weeks",
            course_id,
            observations.len(),
            days.len(),
            weeks.len()
        );

        let day = Self::build_pivot_view(observations, &weeks, &days, Granularity::Day, names);
        let week = Self::build_pivot_view(observations, &weeks, &days, Granularity::Week, names);
        let median_by_day = Self::build_median_by_day_view(observations, &course_id, &days);
        let median_by_week =
            Self::build_median_by_week_view(&median_by_day, &course_id, &weeks, &days);

        Self {
            day,
            week,
            median_by_day,
            median_by_week,
            loading,
            error,
        }
    }

    fn build_pivot_view(
        observations: &[Observation],
        weeks: &[WeekKey],
        days: &[DayKey],
        granularity: Granularity,
        names: Option<&StudentDirectory>,
    ) -> PivotView {
        let rows = build_pivoted_rows(observations, weeks, days, granularity, names);
        let mut columns = student_columns();
        columns.push(total_column(ColumnField::Total, "Total"));
        columns.extend(select_time_columns(granularity, weeks, days));
        PivotView { rows, columns }
    }

    fn build_median_by_day_view(
        observations: &[Observation],
        course_id: &CourseId,
        days: &[DayKey],
    ) -> SummaryView {
        let row = build_median_by_day(observations, course_id, days);
        let mut columns = vec![total_column(ColumnField::Total, "Total")];
        columns.extend(select_time_columns(Granularity::Day, &[], days));
        SummaryView { row, columns }
    }

    fn build_median_by_week_view(
        median_by_day: &SummaryView,
        course_id: &CourseId,
        weeks: &[WeekKey],
        days: &[DayKey],
    ) -> SummaryView {
        let row = build_median_by_week(median_by_day.row.as_ref(), course_id, weeks, days);
        let mut columns = vec![total_column(ColumnField::Total, "Total")];
        columns.extend(select_time_columns(Granularity::Week, weeks, days));
        SummaryView { row, columns }
    }

    /// Whether any student has a row
    pub fn has_data(&self) -> bool {
        !self.day.rows.is_empty()
    }

    pub fn has_median_by_day(&self) -> bool {
        self.median_by_day.row.is_some()
    }

    pub fn has_median_by_week(&self) -> bool {
        self.median_by_week.row.is_some()
    }

    /// Borrow one of the four views
    pub fn view(&self, kind: ViewKind) -> View<'_> {
        match kind {
            ViewKind::Day => View::Pivot(&self.day),
            ViewKind::Week => View::Pivot(&self.week),
            ViewKind::MedianByDay => View::Summary(&self.median_by_day),
            ViewKind::MedianByWeek => View::Summary(&self.median_by_week),
        }
    }
}
