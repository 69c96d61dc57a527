//! Course summary rows: median by day and median by week
//!
//! The day row holds, for every day, the median of per-student seconds with
//! absent students counted as zero. The week row is derived from the day row
//! alone: each week is the sum of its days' medians. The two rows therefore
//! always agree with each other, and a week value is never a median of weekly
//! sums.

use crate::aggregation::{
    bucket_values_with_zero_fill, median_across_students, roster, sum_by_student_and_bucket,
};
use crate::bucketing::{bucket_of, week_of};
use crate::columns::{CellValue, ColumnField, GridRow};
use crate::types::{BucketKey, CourseId, DayKey, Granularity, Observation, WeekKey};
use serde::Serialize;
use std::collections::BTreeMap;

/// One aggregate row for a whole course
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    pub course_id: CourseId,
    pub total_seconds: f64,
    pub per_bucket_seconds: BTreeMap<BucketKey, f64>,
}

impl SummaryRow {
    /// Value for a bucket, zero when the bucket is not part of the row
    pub fn seconds_in(&self, bucket: &BucketKey) -> f64 {
        self.per_bucket_seconds.get(bucket).copied().unwrap_or(0.0)
    }
}

impl GridRow for SummaryRow {
    fn cell(&self, field: &ColumnField) -> CellValue<'_> {
        match field {
            ColumnField::StudentName | ColumnField::StudentId => CellValue::Text(""),
            ColumnField::Total => CellValue::Seconds(Some(self.total_seconds)),
            ColumnField::Bucket(bucket) => {
                CellValue::Seconds(self.per_bucket_seconds.get(bucket).copied())
            }
        }
    }
}

/// Median seconds per day across every student in the batch
///
/// Returns `None` when the batch has no students, so there is no population to
/// take a median over.
pub fn build_median_by_day(
    observations: &[Observation],
    course_id: &CourseId,
    day_keys: &[DayKey],
) -> Option<SummaryRow> {
    let students = roster(observations);
    if students.is_empty() {
        return None;
    }

    let sums = sum_by_student_and_bucket(observations, |day| bucket_of(Granularity::Day, day));

    let mut per_bucket_seconds = BTreeMap::new();
    for day in day_keys {
        let bucket = BucketKey::from(day);
        let values = bucket_values_with_zero_fill(&sums, &students, &bucket);
        let median = median_across_students(&values).unwrap_or(0.0);
        per_bucket_seconds.insert(bucket, median);
    }

    Some(SummaryRow {
        course_id: course_id.clone(),
        total_seconds: per_bucket_seconds.values().sum(),
        per_bucket_seconds,
    })
}

/// Sum of day medians per week, taken from an already built day row
pub fn build_median_by_week(
    median_by_day: Option<&SummaryRow>,
    course_id: &CourseId,
    week_keys: &[WeekKey],
    day_keys: &[DayKey],
) -> Option<SummaryRow> {
    let day_row = median_by_day?;

    let mut per_bucket_seconds: BTreeMap<BucketKey, f64> = week_keys
        .iter()
        .map(|week| (BucketKey::from(week), 0.0))
        .collect();

    for day in day_keys {
        let day_median = day_row.seconds_in(&BucketKey::from(day));
        if let Some(week_total) = per_bucket_seconds.get_mut(&BucketKey::from(&week_of(day))) {
            *week_total += day_median;
        }
    }

    Some(SummaryRow {
        course_id: course_id.clone(),
        total_seconds: per_bucket_seconds.values().sum(),
        per_bucket_seconds,
    })
}
