//! Aggregation of observations into per-student bucket sums and medians
//!
//! Buckets and students with no observations are simply absent from the maps
//! returned here. Callers treat absence as zero when rendering, and the median
//! helpers fill the zeros in explicitly so that the population of every median
//! is the full roster.
//!
//! # Examples
//!
//! ```
//! use tutors_time_core::aggregation::{median_across_students, sum_by_student_and_bucket};
//! use tutors_time_core::bucketing::bucket_of;
//! use tutors_time_core::types::{Granularity, Observation};
//!
//! let batch = vec![
//!     Observation::new("2024-02-03", "s1", "c1", 60, 1),
//!     Observation::new("2024-02-03", "s1", "c1", 30, 1),
//!     Observation::new("2024-02-04", "s2", "c1", 120, 3),
//! ];
//! let sums = sum_by_student_and_bucket(&batch, |d| bucket_of(Granularity::Day, d));
//! assert_eq!(sums.len(), 2);
//!
//! assert_eq!(median_across_students(&[10, 20]), Some(15.0));
//! ```

use crate::types::{BucketKey, DayKey, Observation, StudentId};
use std::collections::{BTreeMap, BTreeSet};

/// Seconds per bucket for one student
pub type BucketSeconds = BTreeMap<BucketKey, u64>;

/// Seconds per bucket, per student
pub type StudentBucketSums = BTreeMap<StudentId, BucketSeconds>;

/// Accumulate every observation's seconds into `result[student][bucket_of(day)]`
pub fn sum_by_student_and_bucket<F>(observations: &[Observation], bucket_of: F) -> StudentBucketSums
where
    F: Fn(&DayKey) -> BucketKey,
{
    let mut sums = StudentBucketSums::new();
    for observation in observations {
        *sums
            .entry(observation.student_id.clone())
            .or_default()
            .entry(bucket_of(&observation.day_key))
            .or_insert(0) += observation.active_seconds;
    }
    sums
}

/// Sum of all bucket values per student
pub fn total_per_student(sums: &StudentBucketSums) -> BTreeMap<StudentId, u64> {
    sums.iter()
        .map(|(student, buckets)| (student.clone(), buckets.values().sum()))
        .collect()
}

/// Distinct students appearing anywhere in the batch
pub fn roster(observations: &[Observation]) -> BTreeSet<StudentId> {
    observations.iter().map(|o| o.student_id.clone()).collect()
}

/// One value per roster student for a bucket, zero where the student is absent
pub fn bucket_values_with_zero_fill(
    sums: &StudentBucketSums,
    roster: &BTreeSet<StudentId>,
    bucket: &BucketKey,
) -> Vec<u64> {
    roster
        .iter()
        .map(|student| {
            sums.get(student)
                .and_then(|buckets| buckets.get(bucket))
                .copied()
                .unwrap_or(0)
        })
        .collect()
}

/// Standard median of per-student seconds
///
/// Odd counts give the middle value; even counts give the mean of the two
/// middle values, unrounded. An empty population has no median.
pub fn median_across_students(values: &[u64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_unstable();

    let mid = sorted.len() / 2;
    let median = if sorted.len() % 2 == 0 {
        (sorted[mid - 1] as f64 + sorted[mid] as f64) / 2.0
    } else {
        sorted[mid] as f64
    };
    Some(median)
}
