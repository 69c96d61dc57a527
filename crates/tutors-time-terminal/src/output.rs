//! Output formatting for calendar models
//!
//! This module provides formatters for displaying calendar views:
//! - Table format for human-readable terminal output
//! - JSON format for machine-readable output and integration with other tools
//!
//! # Examples
//!
//! ```
//! use tutors_time_core::{CalendarModel, ViewKind};
//! use tutors_time_core::types::Observation;
//! use tutors_time_terminal::{CourseReport, get_formatter};
//!
//! let batch = vec![Observation::new("2024-02-03", "s1", "web-dev", 5400, 3)];
//! let model = CalendarModel::new(&batch, false, None);
//! let report = CourseReport::new("web-dev", "Web Development", &model);
//!
//! let table = get_formatter(false, false).format_report(&report, &[ViewKind::Day]);
//! assert!(table.contains("1h 30"));
//!
//! let json = get_formatter(true, false).format_report(&report, &[ViewKind::Day]);
//! assert!(json.contains("\"total_seconds\": 5400"));
//! ```

use colored::Colorize;
use prettytable::{Attr, Cell, Row, Table, format};
use serde_json::{Value, json};
use tracing::debug;
use tutors_time_core::columns::{Alignment, ColumnDescriptor, GridRow, RenderedCell};
use tutors_time_core::model::{PivotView, SummaryView, View};
use tutors_time_core::{CalendarModel, ViewKind};

/// Shown in place of a summary table when there were no students
const EMPTY_SUMMARY: &str = "No students to summarise.";
/// Shown in place of a pivot table when there were no observations
const EMPTY_PIVOT: &str = "No time recorded.";
/// Narrowest painted cell, so blank coloured cells stay visible
const MIN_PAINTED_WIDTH: usize = 5;

/// One course's model together with how to label it
#[derive(Debug, Clone, Copy)]
pub struct CourseReport<'a> {
    pub course_id: &'a str,
    pub title: &'a str,
    pub model: &'a CalendarModel,
}

impl<'a> CourseReport<'a> {
    pub fn new(course_id: &'a str, title: &'a str, model: &'a CalendarModel) -> Self {
        Self {
            course_id,
            title,
            model,
        }
    }
}

/// Trait for output formatters
///
/// Implementations decide how a calendar view is drawn; the model decides
/// what goes in it.
pub trait OutputFormatter {
    /// Format a single view of a model
    fn format_view(&self, model: &CalendarModel, kind: ViewKind) -> String;

    /// Format one course with the chosen views
    fn format_report(&self, report: &CourseReport<'_>, views: &[ViewKind]) -> String;

    /// Format several courses, one after the other
    fn format_reports(&self, reports: &[CourseReport<'_>], views: &[ViewKind]) -> String {
        reports
            .iter()
            .map(|report| self.format_report(report, views))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Table formatter for human-readable output
///
/// Produces prettytable grids. With colour on, numeric cells get the
/// green background of the shared scale; blank cells are still painted so an
/// idle day reads as white rather than missing.
pub struct TableFormatter {
    /// Whether to paint cell backgrounds
    pub color: bool,
}

impl TableFormatter {
    /// Create a new TableFormatter
    ///
    /// Colour is forced off when `NO_COLOR` is set.
    pub fn new(color: bool) -> Self {
        let color = color && std::env::var("NO_COLOR").is_err();
        Self { color }
    }

    fn header_row(columns: &[ColumnDescriptor]) -> Row {
        Row::new(
            columns
                .iter()
                .map(|column| Cell::new(&column.header_label).with_style(Attr::Bold))
                .collect(),
        )
    }

    fn body_row<R: GridRow + ?Sized>(&self, columns: &[ColumnDescriptor], row: &R) -> Row {
        Row::new(
            columns
                .iter()
                .map(|column| self.cell(column, column.render(row)))
                .collect(),
        )
    }

    fn cell(&self, column: &ColumnDescriptor, rendered: RenderedCell) -> Cell {
        let alignment = match rendered.alignment {
            Alignment::Left => format::Alignment::LEFT,
            Alignment::Center => format::Alignment::CENTER,
            Alignment::Right => format::Alignment::RIGHT,
        };

        match rendered.background {
            Some(rgb) if self.color => {
                let width = column
                    .header_label
                    .chars()
                    .count()
                    .max(rendered.text.chars().count())
                    .max(MIN_PAINTED_WIDTH);
                let padded = match rendered.alignment {
                    Alignment::Left => format!("{:<width$}", rendered.text),
                    Alignment::Center => format!("{:^width$}", rendered.text),
                    Alignment::Right => format!("{:>width$}", rendered.text),
                };
                let painted = padded.black().on_truecolor(rgb.r, rgb.g, rgb.b);
                Cell::new_align(&painted.to_string(), alignment)
            }
            _ => Cell::new_align(&rendered.text, alignment),
        }
    }

    fn new_table(columns: &[ColumnDescriptor]) -> Table {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);
        table.set_titles(Self::header_row(columns));
        table
    }

    fn format_pivot(&self, view: &PivotView) -> String {
        if view.rows.is_empty() {
            return format!("{}\n", EMPTY_PIVOT);
        }
        let mut table = Self::new_table(&view.columns);
        for row in &view.rows {
            table.add_row(self.body_row(&view.columns, row));
        }
        table.to_string()
    }

    fn format_summary(&self, view: &SummaryView) -> String {
        match &view.row {
            Some(row) => {
                let mut table = Self::new_table(&view.columns);
                table.add_row(self.body_row(&view.columns, row));
                table.to_string()
            }
            None => format!("{}\n", EMPTY_SUMMARY),
        }
    }

    fn heading(report: &CourseReport<'_>) -> String {
        if report.title == report.course_id {
            report.course_id.to_string()
        } else {
            format!("{} ({})", report.title, report.course_id)
        }
    }
}

impl OutputFormatter for TableFormatter {
    fn format_view(&self, model: &CalendarModel, kind: ViewKind) -> String {
        match model.view(kind) {
            View::Pivot(view) => self.format_pivot(view),
            View::Summary(view) => self.format_summary(view),
        }
    }

    fn format_report(&self, report: &CourseReport<'_>, views: &[ViewKind]) -> String {
        let model = report.model;
        debug!(
            "Rendering {} view(s) of {} as tables",
            views.len(),
            report.course_id
        );

        let heading = Self::heading(report);
        let mut output = String::new();
        if self.color {
            output.push_str(&format!("{}\n", heading.bold()));
        } else {
            output.push_str(&format!("{}\n", heading));
        }
        output.push_str(&format!("{}\n", "=".repeat(heading.chars().count())));

        if model.loading {
            output.push_str("Loading calendar data...\n");
            return output;
        }

        if let Some(error) = &model.error {
            let banner = format!("Error: {}", error);
            if self.color {
                output.push_str(&format!("{}\n", banner.red()));
            } else {
                output.push_str(&format!("{}\n", banner));
            }
            return output;
        }

        for kind in views {
            output.push_str(&format!("\n{}\n", kind.title()));
            output.push_str(&self.format_view(model, *kind));
        }
        output
    }
}

/// JSON formatter for machine-readable output
///
/// Emits raw seconds rather than formatted durations so that consumers can
/// do their own arithmetic. Column metadata is included so a consumer can
/// rebuild the same grid.
pub struct JsonFormatter;

impl JsonFormatter {
    fn columns_json(columns: &[ColumnDescriptor]) -> Value {
        json!(
            columns
                .iter()
                .map(|c| json!({
                    "key": c.field.key(),
                    "header": c.header_label,
                    "alignment": c.alignment,
                    "pinned_left": c.pinned_left,
                    "default_sort": c.default_sort,
                }))
                .collect::<Vec<_>>()
        )
    }

    fn view_json(model: &CalendarModel, kind: ViewKind) -> Value {
        match model.view(kind) {
            View::Pivot(view) => json!({
                "view": kind,
                "columns": Self::columns_json(&view.columns),
                "rows": view.rows,
            }),
            View::Summary(view) => json!({
                "view": kind,
                "columns": Self::columns_json(&view.columns),
                "row": view.row,
            }),
        }
    }

    fn report_json(report: &CourseReport<'_>, views: &[ViewKind]) -> Value {
        json!({
            "course_id": report.course_id,
            "title": report.title,
            "loading": report.model.loading,
            "error": report.model.error,
            "views": views
                .iter()
                .map(|kind| Self::view_json(report.model, *kind))
                .collect::<Vec<_>>(),
        })
    }

    fn pretty(value: &Value) -> String {
        serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_view(&self, model: &CalendarModel, kind: ViewKind) -> String {
        Self::pretty(&Self::view_json(model, kind))
    }

    fn format_report(&self, report: &CourseReport<'_>, views: &[ViewKind]) -> String {
        Self::pretty(&Self::report_json(report, views))
    }

    fn format_reports(&self, reports: &[CourseReport<'_>], views: &[ViewKind]) -> String {
        let courses: Vec<Value> = reports
            .iter()
            .map(|report| Self::report_json(report, views))
            .collect();
        Self::pretty(&json!({ "courses": courses }))
    }
}

/// Get the appropriate formatter based on output preference
///
/// # Arguments
///
/// * `json` - If true, returns a JSON formatter; otherwise returns a table formatter
/// * `color` - Whether the table formatter paints cells (ignored for JSON)
pub fn get_formatter(json: bool, color: bool) -> Box<dyn OutputFormatter> {
    if json {
        Box::new(JsonFormatter)
    } else {
        Box::new(TableFormatter::new(color))
    }
}
