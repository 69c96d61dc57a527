//! Column descriptors consumed by grid sinks
//!
//! A descriptor says how to label, size, format, and colour one column. It is
//! derived only from a bucket key and the fixed styling policy below, and never
//! holds row data: sinks pair each descriptor with rows through [`GridRow`].
//!
//! Zero-activity cells render blank rather than `"0"` so that a wide grid of
//! mostly idle days stays readable.

use crate::color::{Rgb, cell_color};
use crate::formatting::{rounded_minutes, short_day_label, short_duration, short_week_label};
use crate::types::{BucketKey, DayKey, WeekKey};
use serde::Serialize;

/// Width of the total column
pub const TOTAL_COLUMN_WIDTH: u16 = 52;
/// Width of each day or week column
pub const TIME_COLUMN_WIDTH: u16 = 40;
/// Upper bound for total and time columns
pub const NARROW_COLUMN_MAX_WIDTH: u16 = 64;

/// Formats a cell's seconds for display
pub type ValueFormatter = fn(Option<f64>) -> String;

/// Picks a cell's background from its seconds
pub type Colorizer = fn(Option<f64>) -> Rgb;

/// What a column reads from a row
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ColumnField {
    StudentName,
    StudentId,
    Total,
    Bucket(BucketKey),
}

impl ColumnField {
    /// Stable key for the column, used by JSON output
    pub fn key(&self) -> &str {
        match self {
            ColumnField::StudentName => "full_name",
            ColumnField::StudentId => "student_id",
            ColumnField::Total => "total_seconds",
            ColumnField::Bucket(bucket) => bucket.as_str(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Width bounds, in pixels for graphical sinks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Width {
    pub preferred: Option<u16>,
    pub min: Option<u16>,
    pub max: Option<u16>,
    /// Whether the column absorbs spare width
    pub flex: bool,
}

/// Everything a sink needs to draw one column
#[derive(Debug, Clone)]
pub struct ColumnDescriptor {
    pub field: ColumnField,
    pub header_label: String,
    pub width: Width,
    pub alignment: Alignment,
    pub pinned_left: bool,
    pub default_sort: Option<SortDirection>,
    /// `None` for text columns
    pub value_formatter: Option<ValueFormatter>,
    /// `None` for columns that keep the sink's default background
    pub colorizer: Option<Colorizer>,
}

/// A cell as read from a row, before formatting
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CellValue<'a> {
    Text(&'a str),
    Seconds(Option<f64>),
}

/// Rows that can be laid out against column descriptors
pub trait GridRow {
    fn cell(&self, field: &ColumnField) -> CellValue<'_>;
}

/// A formatted, coloured cell ready for a sink
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedCell {
    pub text: String,
    pub background: Option<Rgb>,
    pub alignment: Alignment,
}

impl ColumnDescriptor {
    /// Format and colour this column's cell for `row`
    pub fn render<R: GridRow + ?Sized>(&self, row: &R) -> RenderedCell {
        match row.cell(&self.field) {
            CellValue::Text(text) => RenderedCell {
                text: text.to_string(),
                background: None,
                alignment: self.alignment,
            },
            CellValue::Seconds(seconds) => RenderedCell {
                text: match self.value_formatter {
                    Some(format) => format(seconds),
                    None => seconds.map(|s| s.to_string()).unwrap_or_default(),
                },
                background: self.colorizer.map(|colorize| colorize(seconds)),
                alignment: self.alignment,
            },
        }
    }
}

/// Whole minutes when positive, blank otherwise
pub fn format_total_minutes(seconds: Option<f64>) -> String {
    match seconds {
        Some(s) if s > 0.0 => rounded_minutes(s).to_string(),
        _ => String::new(),
    }
}

/// [`short_duration`] when positive, blank otherwise
pub fn format_time_cell(seconds: Option<f64>) -> String {
    match seconds {
        Some(s) if s > 0.0 => short_duration(s),
        _ => String::new(),
    }
}

/// Total-seconds column: right aligned, sorted descending by default
pub fn total_column(field: ColumnField, header_label: impl Into<String>) -> ColumnDescriptor {
    ColumnDescriptor {
        field,
        header_label: header_label.into(),
        width: Width {
            preferred: Some(TOTAL_COLUMN_WIDTH),
            min: None,
            max: Some(NARROW_COLUMN_MAX_WIDTH),
            flex: false,
        },
        alignment: Alignment::Right,
        pinned_left: false,
        default_sort: Some(SortDirection::Descending),
        value_formatter: Some(format_total_minutes),
        colorizer: Some(cell_color),
    }
}

fn time_column(bucket: BucketKey, header_label: String) -> ColumnDescriptor {
    ColumnDescriptor {
        field: ColumnField::Bucket(bucket),
        header_label,
        width: Width {
            preferred: Some(TIME_COLUMN_WIDTH),
            min: None,
            max: Some(NARROW_COLUMN_MAX_WIDTH),
            flex: false,
        },
        alignment: Alignment::Center,
        pinned_left: false,
        default_sort: None,
        value_formatter: Some(format_time_cell),
        colorizer: Some(cell_color),
    }
}

/// One column per day, in the order given
pub fn day_columns(days: &[DayKey]) -> Vec<ColumnDescriptor> {
    days.iter()
        .map(|day| time_column(BucketKey::from(day), short_day_label(day.as_str())))
        .collect()
}

/// One column per week, in the order given
pub fn week_columns(weeks: &[WeekKey]) -> Vec<ColumnDescriptor> {
    weeks
        .iter()
        .map(|week| time_column(BucketKey::from(week), short_week_label(week)))
        .collect()
}

/// The pinned identity columns that lead every per-student grid
pub fn student_columns() -> Vec<ColumnDescriptor> {
    vec![
        ColumnDescriptor {
            field: ColumnField::StudentName,
            header_label: "Student".to_string(),
            width: Width {
                preferred: None,
                min: Some(160),
                max: None,
                flex: true,
            },
            alignment: Alignment::Left,
            pinned_left: true,
            default_sort: None,
            value_formatter: None,
            colorizer: None,
        },
        ColumnDescriptor {
            field: ColumnField::StudentId,
            header_label: "Student ID".to_string(),
            width: Width {
                preferred: None,
                min: Some(120),
                max: None,
                flex: false,
            },
            alignment: Alignment::Left,
            pinned_left: true,
            default_sort: None,
            value_formatter: None,
            colorizer: None,
        },
    ]
}
