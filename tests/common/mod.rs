//! Common test utilities and helpers for tutors-time tests
//!
//! This module provides builders for calendar observations and helpers that
//! write them out as calendar exports.

use chrono::{Days, NaiveDate};
use std::path::PathBuf;
use tempfile::TempDir;
use tutors_time::types::Observation;

/// Common test courses
pub const TEST_COURSES: &[&str] = &["web-dev", "databases", "networks"];

/// Common test students
#[allow(dead_code)]
pub const TEST_STUDENTS: &[&str] = &["ada", "grace", "alan", "barbara"];

/// Builder for creating test Observation instances
pub struct ObservationBuilder {
    day: String,
    student: String,
    course: String,
    seconds: u64,
    page_loads: u64,
}

impl ObservationBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            day: "2024-02-05".to_string(),
            student: TEST_STUDENTS[0].to_string(),
            course: TEST_COURSES[0].to_string(),
            seconds: 600,
            page_loads: 1,
        }
    }

    pub fn on(mut self, day: &str) -> Self {
        self.day = day.to_string();
        self
    }

    pub fn student(mut self, student: &str) -> Self {
        self.student = student.to_string();
        self
    }

    #[allow(dead_code)]
    pub fn course(mut self, course: &str) -> Self {
        self.course = course.to_string();
        self
    }

    pub fn seconds(mut self, seconds: u64) -> Self {
        self.seconds = seconds;
        self
    }

    #[allow(dead_code)]
    pub fn page_loads(mut self, page_loads: u64) -> Self {
        self.page_loads = page_loads;
        self
    }

    pub fn build(self) -> Observation {
        Observation::new(
            self.day,
            self.student,
            self.course,
            self.seconds,
            self.page_loads,
        )
    }
}

impl Default for ObservationBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Observations in the first test course from `(day, student, seconds)` triples
pub fn course_observations(rows: &[(&str, &str, u64)]) -> Vec<Observation> {
    rows.iter()
        .map(|(day, student, seconds)| {
            ObservationBuilder::new()
                .on(day)
                .student(student)
                .seconds(*seconds)
                .build()
        })
        .collect()
}

/// `days` consecutive days of activity for every test student
#[allow(dead_code)]
pub fn steady_activity(start: NaiveDate, days: u64) -> Vec<Observation> {
    let mut observations = Vec::new();
    for offset in 0..days {
        let Some(day) = start.checked_add_days(Days::new(offset)) else {
            continue;
        };
        let day = day.format("%Y-%m-%d").to_string();
        for (i, student) in TEST_STUDENTS.iter().enumerate() {
            // Give each student a different rhythm, including idle days
            if (offset as usize + i) % 3 == 0 {
                continue;
            }
            observations.push(
                ObservationBuilder::new()
                    .on(&day)
                    .student(student)
                    .seconds(300 * (i as u64 + 1) + offset * 60)
                    .build(),
            );
        }
    }
    observations
}

/// Calendar export written to a temporary directory
pub struct CalendarFixture {
    _dir: TempDir,
    pub calendar: PathBuf,
    pub courses: PathBuf,
    pub students: PathBuf,
}

/// Write observations, course titles, and student names as an export
pub fn write_calendar(
    observations: &[Observation],
    titles: &[(&str, &str)],
    names: &[(&str, &str)],
) -> CalendarFixture {
    let dir = TempDir::new().unwrap();

    let calendar = dir.path().join("calendar.jsonl");
    let lines: Vec<String> = observations
        .iter()
        .map(|o| serde_json::to_string(o).unwrap())
        .collect();
    std::fs::write(&calendar, lines.join("\n")).unwrap();

    let courses = dir.path().join("courses.json");
    let titles: std::collections::HashMap<&str, &str> = titles.iter().copied().collect();
    std::fs::write(&courses, serde_json::to_string(&titles).unwrap()).unwrap();

    let students = dir.path().join("students.json");
    let names: std::collections::HashMap<&str, &str> = names.iter().copied().collect();
    std::fs::write(&students, serde_json::to_string(&names).unwrap()).unwrap();

    CalendarFixture {
        _dir: dir,
        calendar,
        courses,
        students,
    }
}
