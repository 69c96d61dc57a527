//! Integration tests for tutors-time CLI commands
//!
//! These tests drive the same steps as main.rs: parse arguments, open the
//! configured source, load courses, and render them.

mod common;

use clap::Parser;
use common::{course_observations, write_calendar};
use tutors_time::TutorsTimeError;
use tutors_time::cli::{Cli, Command};
use tutors_time::output::{CourseReport, get_formatter};
use tutors_time::source::CourseTimeService;

fn fixture() -> common::CalendarFixture {
    write_calendar(
        &course_observations(&[
            ("2024-01-31", "ada", 1200),
            ("2024-02-03", "ada", 5400),
            ("2024-02-03", "grace", 60),
            ("2024-02-12", "grace", 900),
        ]),
        &[("web-dev", "Web Development")],
        &[("ada", "Ada Lovelace")],
    )
}

async fn run(args: &[&str]) -> tutors_time::Result<String> {
    let cli = Cli::try_parse_from(args).map_err(|e| TutorsTimeError::InvalidArgument(e.to_string()))?;
    let range = cli.date_range()?;
    let service = CourseTimeService::from_arc(cli.source.open()?);
    let formatter = get_formatter(cli.json, false);

    match &cli.command {
        Command::Course { ids, view } => {
            let courses = service.load_many(ids, &range).await?;
            let reports: Vec<CourseReport<'_>> = courses
                .iter()
                .map(|c| CourseReport::new(c.id.as_str(), &c.title, &c.model))
                .collect();
            Ok(formatter.format_reports(&reports, &view.kinds()))
        }
        Command::Student { course, student } => {
            let calendar = service.load_student_calendar(course, student, &range).await?;
            let report = CourseReport::new(calendar.course_id.as_str(), &calendar.title, &calendar.model);
            Ok(formatter.format_report(&report, &[tutors_time::ViewKind::Day]))
        }
    }
}

#[tokio::test]
async fn test_course_command_table() {
    let fixture = fixture();
    let calendar = fixture.calendar.to_str().unwrap();
    let courses = fixture.courses.to_str().unwrap();
    let students = fixture.students.to_str().unwrap();

    let output = run(&[
        "tutors-time",
        "--data",
        calendar,
        "--courses",
        courses,
        "--students",
        students,
        "course",
        "web-dev",
    ])
    .await
    .unwrap();

    assert!(output.starts_with("Web Development (web-dev)"));
    assert!(output.contains("Ada Lovelace"));
    assert!(output.contains("grace"));
    assert!(output.contains("Time by week"));
    assert!(output.contains("Median by day"));
}

#[tokio::test]
async fn test_course_command_json_with_range() {
    let fixture = fixture();
    let calendar = fixture.calendar.to_str().unwrap();

    let output = run(&[
        "tutors-time",
        "--json",
        "--data",
        calendar,
        "--since",
        "2024-02",
        "--until",
        "2024-02-05",
        "course",
        "web-dev",
        "--view",
        "day",
    ])
    .await
    .unwrap();

    let value: serde_json::Value = serde_json::from_str(&output).unwrap();
    let view = &value["courses"][0]["views"][0];
    assert_eq!(view["view"], "day");
    // Only 3 Feb is inside the range
    assert_eq!(view["columns"].as_array().unwrap().len(), 2 + 1 + 1);
    assert_eq!(view["rows"][0]["total_seconds"], 5400);
}

#[tokio::test]
async fn test_student_command() {
    let fixture = fixture();
    let calendar = fixture.calendar.to_str().unwrap();

    let output = run(&["tutors-time", "--data", calendar, "student", "web-dev", "grace"])
        .await
        .unwrap();
    assert!(output.contains("3/2"));
    assert!(output.contains("12/2"));
    assert!(!output.contains("ada"));
}

#[tokio::test]
async fn test_missing_source_is_a_config_error() {
    // Only meaningful when the environment configures no source
    let err = run(&["tutors-time", "course", "web-dev"]).await;
    if std::env::var("TUTORS_TIME_DATA").is_err() && std::env::var("TUTORS_TIME_REST_URL").is_err() {
        assert!(matches!(err, Err(TutorsTimeError::Config(_))));
    }
}

#[tokio::test]
async fn test_blank_course_ids_rejected() {
    let fixture = fixture();
    let calendar = fixture.calendar.to_str().unwrap();
    let err = run(&["tutors-time", "--data", calendar, "course", " ", ""])
        .await
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Invalid argument: At least one course ID is required"
    );
}
