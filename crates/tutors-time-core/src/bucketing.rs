//! Day and week bucketing of observations
//!
//! Every column of every view is a bucket: a day key, or the week key that
//! owns it. [`week_of`] is the only day-to-week mapping in the workspace; the
//! pivot builder and the summary builder both go through it.

use crate::types::{BucketKey, DayKey, Granularity, Observation, WeekKey};
use chrono::Datelike;
use std::collections::BTreeSet;

/// Map a day to the week that contains it
///
/// Valid days map to the Monday of their ISO week. A key that cannot be
/// parsed becomes its own week so that it still lands in exactly one bucket.
///
/// # Examples
/// ```
/// use tutors_time_core::bucketing::week_of;
/// use tutors_time_core::types::DayKey;
///
/// // Saturday 3 Feb 2024 belongs to the week starting Monday 29 Jan
/// assert_eq!(week_of(&DayKey::new("2024-02-03")).as_str(), "2024-01-29");
/// ```
pub fn week_of(day: &DayKey) -> WeekKey {
    match day.to_date() {
        Some(date) => {
            let offset = u64::from(date.weekday().num_days_from_monday());
            let monday = date
                .checked_sub_days(chrono::Days::new(offset))
                .unwrap_or(date);
            WeekKey::starting(monday)
        }
        None => WeekKey::unparsed(day.as_str()),
    }
}

/// Map a day to its bucket for the given granularity
pub fn bucket_of(granularity: Granularity, day: &DayKey) -> BucketKey {
    match granularity {
        Granularity::Day => BucketKey::from(day),
        Granularity::Week => BucketKey::from(&week_of(day)),
    }
}

/// Distinct day keys present in the batch, ascending
pub fn distinct_sorted_day_keys(observations: &[Observation]) -> Vec<DayKey> {
    observations
        .iter()
        .map(|o| o.day_key.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Distinct week keys owning the days present in the batch, ascending
pub fn distinct_sorted_week_keys(observations: &[Observation]) -> Vec<WeekKey> {
    observations
        .iter()
        .map(|o| week_of(&o.day_key))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::obs;

    #[test]
    fn test_week_of_every_weekday() {
        // 2024-01-29 is a Monday
        for day in 29..=31 {
            let key = DayKey::new(format!("2024-01-{day}"));
            assert_eq!(week_of(&key).as_str(), "2024-01-29");
        }
        for day in 1..=4 {
            let key = DayKey::new(format!("2024-02-0{day}"));
            assert_eq!(week_of(&key).as_str(), "2024-01-29");
        }
        assert_eq!(week_of(&DayKey::new("2024-02-05")).as_str(), "2024-02-05");
    }

    #[test]
    fn test_week_of_crosses_year_boundary() {
        // Wednesday 1 Jan 2025 belongs to the week starting Monday 30 Dec 2024
        assert_eq!(week_of(&DayKey::new("2025-01-01")).as_str(), "2024-12-30");
    }

    #[test]
    fn test_week_of_malformed_key() {
        assert_eq!(week_of(&DayKey::new("someday")).as_str(), "someday");
    }

    #[test]
    fn test_distinct_sorted_day_keys() {
        let batch = vec![
            obs("2024-02-05", "s1", 10),
            obs("2024-02-03", "s2", 20),
            obs("2024-02-05", "s2", 30),
            obs("2024-01-30", "s1", 40),
        ];
        let days = distinct_sorted_day_keys(&batch);
        let days: Vec<&str> = days.iter().map(|d| d.as_str()).collect();
        assert_eq!(days, vec!["2024-01-30", "2024-02-03", "2024-02-05"]);
    }

    #[test]
    fn test_distinct_sorted_week_keys() {
        let batch = vec![
            obs("2024-02-05", "s1", 10),
            obs("2024-02-03", "s2", 20),
            obs("2024-01-30", "s1", 40),
        ];
        let weeks = distinct_sorted_week_keys(&batch);
        let weeks: Vec<&str> = weeks.iter().map(|w| w.as_str()).collect();
        assert_eq!(weeks, vec!["2024-01-29", "2024-02-05"]);
    }

    #[test]
    fn test_empty_batch() {
        assert!(distinct_sorted_day_keys(&[]).is_empty());
        assert!(distinct_sorted_week_keys(&[]).is_empty());
    }

    #[test]
    fn test_bucket_of() {
        let day = DayKey::new("2024-02-03");
        assert_eq!(bucket_of(Granularity::Day, &day).as_str(), "2024-02-03");
        assert_eq!(bucket_of(Granularity::Week, &day).as_str(), "2024-01-29");
    }
}
