//! Per-student pivot rows
//!
//! One row per student in the batch, one bucket per day or week. Whatever the
//! granularity, a row's total is the student's full total for the batch.

use crate::aggregation::{BucketSeconds, sum_by_student_and_bucket};
use crate::bucketing::bucket_of;
use crate::columns::{CellValue, ColumnDescriptor, ColumnField, GridRow, day_columns, week_columns};
use crate::types::{
    BucketKey, CourseId, DayKey, Granularity, Observation, StudentDirectory, StudentId, WeekKey,
};
use serde::Serialize;
use std::collections::BTreeMap;

/// A student's seconds per bucket
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PivotRow {
    pub student_id: StudentId,
    /// Display name, or the student id when the directory has no entry
    pub full_name: String,
    pub course_id: CourseId,
    pub total_seconds: u64,
    pub per_bucket_seconds: BucketSeconds,
}

impl PivotRow {
    /// Seconds in a bucket, zero when the student had no activity there
    pub fn seconds_in(&self, bucket: &BucketKey) -> u64 {
        self.per_bucket_seconds.get(bucket).copied().unwrap_or(0)
    }
}

impl GridRow for PivotRow {
    fn cell(&self, field: &ColumnField) -> CellValue<'_> {
        match field {
            ColumnField::StudentName => CellValue::Text(&self.full_name),
            ColumnField::StudentId => CellValue::Text(self.student_id.as_str()),
            ColumnField::Total => CellValue::Seconds(Some(self.total_seconds as f64)),
            ColumnField::Bucket(bucket) => {
                CellValue::Seconds(self.per_bucket_seconds.get(bucket).map(|s| *s as f64))
            }
        }
    }
}

/// Build one pivot row per student
///
/// `week_keys` and `day_keys` must be the distinct keys of the same batch;
/// buckets are materialised in their order. Rows are sorted by full name, then
/// by student id.
pub fn build_pivoted_rows(
    observations: &[Observation],
    week_keys: &[WeekKey],
    day_keys: &[DayKey],
    granularity: Granularity,
    names: Option<&StudentDirectory>,
) -> Vec<PivotRow> {
    let sums = sum_by_student_and_bucket(observations, |day| bucket_of(granularity, day));

    let buckets: Vec<BucketKey> = match granularity {
        Granularity::Day => day_keys.iter().map(BucketKey::from).collect(),
        Granularity::Week => week_keys.iter().map(BucketKey::from).collect(),
    };

    let mut course_of: BTreeMap<&StudentId, &CourseId> = BTreeMap::new();
    for observation in observations {
        course_of
            .entry(&observation.student_id)
            .or_insert(&observation.course_id);
    }

    let mut rows: Vec<PivotRow> = sums
        .into_iter()
        .map(|(student_id, student_sums)| {
            let per_bucket_seconds: BucketSeconds = buckets
                .iter()
                .filter_map(|bucket| {
                    student_sums
                        .get(bucket)
                        .map(|seconds| (bucket.clone(), *seconds))
                })
                .collect();
            let full_name = names
                .and_then(|directory| directory.get(&student_id))
                .cloned()
                .unwrap_or_else(|| student_id.to_string());
            let course_id = course_of
                .get(&student_id)
                .map(|course| (*course).clone())
                .unwrap_or_default();

            PivotRow {
                total_seconds: student_sums.values().sum(),
                full_name,
                course_id,
                per_bucket_seconds,
                student_id,
            }
        })
        .collect();

    rows.sort_by(|a, b| {
        a.full_name
            .cmp(&b.full_name)
            .then_with(|| a.student_id.cmp(&b.student_id))
    });
    rows
}

/// Time columns for a view, in chronological order
pub fn select_time_columns(
    granularity: Granularity,
    week_keys: &[WeekKey],
    day_keys: &[DayKey],
) -> Vec<ColumnDescriptor> {
    match granularity {
        Granularity::Day => day_columns(day_keys),
        Granularity::Week => week_columns(week_keys),
    }
}
