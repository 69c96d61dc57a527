//! Cell and header text for calendar grids
//!
//! Durations are shown to the nearest minute only, and headers are kept as
//! short as possible so that a term's worth of day columns still fits.

use crate::types::{DAY_KEY_FORMAT, WeekKey};
use chrono::{Datelike, NaiveDate};

/// Compressed date for column headers, e.g. `"3/2"` for 3 February
///
/// Input that is not a `YYYY-MM-DD` date is returned unchanged.
///
/// # Examples
/// ```
/// use tutors_time_core::formatting::short_day_label;
///
/// assert_eq!(short_day_label("2024-02-03"), "3/2");
/// assert_eq!(short_day_label("2024-12-25"), "25/12");
/// assert_eq!(short_day_label("tomorrow"), "tomorrow");
/// ```
pub fn short_day_label(day_key: &str) -> String {
    match NaiveDate::parse_from_str(day_key, DAY_KEY_FORMAT) {
        Ok(date) => format!("{}/{}", date.day(), date.month()),
        Err(_) => day_key.to_string(),
    }
}

/// Header for a week column: the short label of the week's first day
pub fn short_week_label(week: &WeekKey) -> String {
    short_day_label(week.as_str())
}

/// Round seconds to whole minutes, never below zero
pub fn rounded_minutes(seconds: f64) -> u64 {
    let minutes = (seconds / 60.0).round();
    if minutes > 0.0 { minutes as u64 } else { 0 }
}

/// Time to the nearest minute, e.g. `"1h 30"` or `"45"`
///
/// # Examples
/// ```
/// use tutors_time_core::formatting::short_duration;
///
/// assert_eq!(short_duration(5400.0), "1h 30");
/// assert_eq!(short_duration(45.0), "1");
/// assert_eq!(short_duration(0.0), "0");
/// ```
pub fn short_duration(seconds: f64) -> String {
    let total_minutes = rounded_minutes(seconds);
    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;
    if hours > 0 {
        format!("{hours}h {minutes}")
    } else {
        format!("{minutes}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bucketing::week_of;
    use crate::types::DayKey;

    #[test]
    fn test_short_day_label_strips_leading_zeros() {
        assert_eq!(short_day_label("2024-02-03"), "3/2");
        assert_eq!(short_day_label("2024-10-01"), "1/10");
    }

    #[test]
    fn test_short_day_label_fails_soft() {
        assert_eq!(short_day_label(""), "");
        assert_eq!(short_day_label("2024-13-01"), "2024-13-01");
        assert_eq!(short_day_label("2024/02/03"), "2024/02/03");
    }

    #[test]
    fn test_short_week_label() {
        let week = week_of(&DayKey::new("2024-02-03"));
        assert_eq!(short_week_label(&week), "29/1");
    }

    #[test]
    fn test_short_duration_minutes_only() {
        assert_eq!(short_duration(45.0), "1");
        assert_eq!(short_duration(29.0), "0");
        assert_eq!(short_duration(30.0), "1");
        assert_eq!(short_duration(59.0 * 60.0), "59");
    }

    #[test]
    fn test_short_duration_hours() {
        assert_eq!(short_duration(3600.0), "1h 0");
        assert_eq!(short_duration(90.0 * 60.0), "1h 30");
        assert_eq!(short_duration(125.0 * 60.0 + 20.0), "2h 5");
    }

    #[test]
    fn test_short_duration_rounds_into_next_hour() {
        // 59m 40s rounds to 60 minutes
        assert_eq!(short_duration(3580.0), "1h 0");
    }

    #[test]
    fn test_short_duration_non_positive() {
        assert_eq!(short_duration(0.0), "0");
        assert_eq!(short_duration(-600.0), "0");
    }

    #[test]
    fn test_short_duration_fractional_median() {
        // Medians of two students can land on half seconds
        assert_eq!(short_duration(89.5), "1");
        assert_eq!(short_duration(90.5), "2");
    }
}
