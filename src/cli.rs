//! CLI interface for tutors-time
//!
//! This module defines the command-line interface using clap. Every data
//! source setting can also come from the environment, so a shell profile can
//! hold the connection details while the command line only names courses.
//!
//! # Example
//!
//! ```bash
//! # All four views of a course from a local export
//! tutors-time --data calendar.jsonl course web-dev
//!
//! # Median by week for two courses in February, as JSON
//! tutors-time --json --since 2024-02 --until 2024-02 course web-dev databases --view median-week
//!
//! # One student's calendar from the hosted table
//! TUTORS_TIME_REST_URL=https://db.example.com/rest/v1 tutors-time student web-dev octocat
//! ```

use crate::source::{DateRange, JsonlSource, ObservationSource, RestSource};
use crate::{Result, TutorsTimeError, ViewKind};
use chrono::{Months, NaiveDate};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// Time-on-task calendars for Tutors courses
#[derive(Parser, Debug, Clone)]
#[command(name = "tutors-time")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Show informational output (default is quiet mode with only warnings and errors)
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Disable coloured cells
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Filter by start date (YYYY-MM-DD or YYYY-MM)
    #[arg(long, global = true)]
    pub since: Option<String>,

    /// Filter by end date (YYYY-MM-DD or YYYY-MM, a month includes its last day)
    #[arg(long, global = true)]
    pub until: Option<String>,

    #[command(flatten)]
    pub source: SourceArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Where observations come from
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Calendar export, one JSON row per line
    #[arg(long, env = "TUTORS_TIME_DATA", global = true)]
    pub data: Option<PathBuf>,

    /// JSON object mapping course ids to titles
    #[arg(long, env = "TUTORS_TIME_COURSES", global = true)]
    pub courses: Option<PathBuf>,

    /// JSON object mapping student ids to names
    #[arg(long, env = "TUTORS_TIME_STUDENTS", global = true)]
    pub students: Option<PathBuf>,

    /// Base URL of the hosted REST API (takes precedence over --data)
    #[arg(long, env = "TUTORS_TIME_REST_URL", global = true)]
    pub rest_url: Option<String>,

    /// API key for the hosted REST API
    #[arg(long, env = "TUTORS_TIME_REST_KEY", hide_env_values = true, global = true)]
    pub rest_key: Option<String>,
}

impl SourceArgs {
    /// Open the configured observation source
    pub fn open(&self) -> Result<Arc<dyn ObservationSource>> {
        if let Some(url) = &self.rest_url {
            info!("Reading calendar from {}", url);
            return Ok(Arc::new(RestSource::new(url.clone(), self.rest_key.clone())));
        }

        let Some(data) = &self.data else {
            return Err(TutorsTimeError::Config(
                "No data source configured: pass --data or --rest-url".to_string(),
            ));
        };

        info!("Reading calendar from {}", data.display());
        let mut source = JsonlSource::new(data);
        if let Some(courses) = &self.courses {
            source = source.with_course_titles(courses);
        }
        if let Some(students) = &self.students {
            source = source.with_student_names(students);
        }
        Ok(Arc::new(source))
    }
}

/// Which views to print
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewArg {
    Day,
    Week,
    MedianDay,
    MedianWeek,
    All,
}

impl ViewArg {
    pub fn kinds(self) -> Vec<ViewKind> {
        match self {
            ViewArg::Day => vec![ViewKind::Day],
            ViewArg::Week => vec![ViewKind::Week],
            ViewArg::MedianDay => vec![ViewKind::MedianByDay],
            ViewArg::MedianWeek => vec![ViewKind::MedianByWeek],
            ViewArg::All => ViewKind::ALL.to_vec(),
        }
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Show calendar views for one or more courses
    Course {
        /// Course ids; blanks and duplicates are ignored
        #[arg(required = true)]
        ids: Vec<String>,

        /// Views to show
        #[arg(long, value_enum, default_value = "all")]
        view: ViewArg,
    },

    /// Show one student's day and week calendar in a course
    Student {
        /// Course id
        course: String,

        /// Student id
        student: String,
    },
}

impl Cli {
    /// Date range from `--since` and `--until`
    pub fn date_range(&self) -> Result<DateRange> {
        let since = self
            .since
            .as_deref()
            .map(parse_date_filter)
            .transpose()?
            .map(day_key_text);
        let until = self
            .until
            .as_deref()
            .map(parse_until_filter)
            .transpose()?
            .map(day_key_text);
        Ok(DateRange::new(since, until))
    }
}

fn day_key_text(date: NaiveDate) -> String {
    crate::types::DayKey::from(date).to_string()
}

/// Parse date filter in YYYY-MM-DD or YYYY-MM format
///
/// # Examples
///
/// ```
/// use tutors_time::cli::parse_date_filter;
/// use chrono::Datelike;
///
/// let date = parse_date_filter("2024-01-15").unwrap();
/// assert_eq!(date.year(), 2024);
/// assert_eq!(date.day(), 15);
///
/// let date = parse_date_filter("2024-01").unwrap();
/// assert_eq!(date.month(), 1);
/// assert_eq!(date.day(), 1);
/// ```
pub fn parse_date_filter(date_str: &str) -> Result<NaiveDate> {
    let date_str = date_str.trim();

    // Try YYYY-MM-DD format first
    if let Ok(date) = NaiveDate::parse_from_str(date_str, "%Y-%m-%d") {
        return Ok(date);
    }

    // Try YYYY-MM format (convert to first day of month)
    let parts: Vec<&str> = date_str.split('-').collect();
    if parts.len() == 2 {
        let year = parts[0].parse::<i32>().map_err(|_| {
            TutorsTimeError::InvalidDate(format!("Invalid year in '{date_str}'"))
        })?;
        let month = parts[1].parse::<u32>().map_err(|_| {
            TutorsTimeError::InvalidDate(format!("Invalid month in '{date_str}'"))
        })?;

        if !(1..=12).contains(&month) {
            return Err(TutorsTimeError::InvalidDate(format!(
                "Month must be between 1-12, got {month}"
            )));
        }

        NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or_else(|| TutorsTimeError::InvalidDate(format!("Invalid date: {date_str}")))
    } else {
        Err(TutorsTimeError::InvalidDate(format!(
            "Invalid date format '{}', expected YYYY-MM-DD or YYYY-MM",
            date_str
        )))
    }
}

/// Parse an upper bound; a bare month means its last day
pub fn parse_until_filter(date_str: &str) -> Result<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(date_str.trim(), "%Y-%m-%d") {
        return Ok(date);
    }

    let first = parse_date_filter(date_str)?;
    first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .ok_or_else(|| TutorsTimeError::InvalidDate(format!("Invalid date: {date_str}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn test_course_command() {
        let cli = Cli::parse_from(["tutors-time", "course", "web-dev", "databases"]);
        match &cli.command {
            Command::Course { ids, view } => {
                assert_eq!(ids, &vec!["web-dev".to_string(), "databases".to_string()]);
                assert_eq!(*view, ViewArg::All);
            }
            _ => panic!("Expected Course command"),
        }
    }

    #[test]
    fn test_course_command_requires_ids() {
        assert!(Cli::try_parse_from(["tutors-time", "course"]).is_err());
    }

    #[test]
    fn test_view_flag() {
        let cli = Cli::parse_from([
            "tutors-time",
            "course",
            "web-dev",
            "--view",
            "median-week",
        ]);
        match cli.command {
            Command::Course { view, .. } => {
                assert_eq!(view.kinds(), vec![ViewKind::MedianByWeek]);
            }
            _ => panic!("Expected Course command"),
        }
        assert_eq!(ViewArg::All.kinds().len(), 4);
    }

    #[test]
    fn test_student_command_with_global_flags() {
        let cli = Cli::parse_from([
            "tutors-time",
            "student",
            "web-dev",
            "octocat",
            "--json",
            "--data",
            "calendar.jsonl",
        ]);
        assert!(cli.json);
        assert_eq!(cli.source.data, Some(PathBuf::from("calendar.jsonl")));
        match &cli.command {
            Command::Student { course, student } => {
                assert_eq!(course, "web-dev");
                assert_eq!(student, "octocat");
            }
            _ => panic!("Expected Student command"),
        }
    }

    #[test]
    fn test_date_range_from_flags() {
        let cli = Cli::parse_from([
            "tutors-time",
            "--since",
            "2024-02",
            "--until",
            "2024-02",
            "course",
            "web-dev",
        ]);
        let range = cli.date_range().unwrap();
        assert_eq!(range.since.as_deref(), Some("2024-02-01"));
        assert_eq!(range.until.as_deref(), Some("2024-02-29"));

        let cli = Cli::parse_from(["tutors-time", "course", "web-dev"]);
        assert!(cli.date_range().unwrap().is_empty());
    }

    #[test]
    fn test_invalid_date_range() {
        let cli = Cli::parse_from(["tutors-time", "--since", "yesterday", "course", "x"]);
        assert!(matches!(
            cli.date_range(),
            Err(TutorsTimeError::InvalidDate(_))
        ));
    }

    #[test]
    fn test_parse_date_filter() {
        let date = parse_date_filter("2024-01-15").unwrap();
        assert_eq!(date.year(), 2024);
        assert_eq!(date.month(), 1);
        assert_eq!(date.day(), 15);

        let date = parse_date_filter("2024-03").unwrap();
        assert_eq!(date.day(), 1);

        assert!(parse_date_filter("2024-13").is_err());
        assert!(parse_date_filter("2024/01/01").is_err());
        assert!(parse_date_filter("abcd-01").is_err());
    }

    #[test]
    fn test_parse_until_filter() {
        assert_eq!(
            parse_until_filter("2023-02").unwrap(),
            NaiveDate::from_ymd_opt(2023, 2, 28).unwrap()
        );
        assert_eq!(
            parse_until_filter("2024-12").unwrap(),
            NaiveDate::from_ymd_opt(2024, 12, 31).unwrap()
        );
        assert_eq!(
            parse_until_filter("2024-06-10").unwrap(),
            NaiveDate::from_ymd_opt(2024, 6, 10).unwrap()
        );
    }

    #[test]
    fn test_open_requires_a_source() {
        let args = SourceArgs::default();
        assert!(matches!(args.open(), Err(TutorsTimeError::Config(_))));

        let args = SourceArgs {
            rest_url: Some("https://db.example.com/rest/v1".to_string()),
            ..SourceArgs::default()
        };
        assert!(args.open().is_ok());
    }
}
