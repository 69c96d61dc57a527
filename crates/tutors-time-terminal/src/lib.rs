//! Terminal output formatting for tutors-time
//!
//! This crate provides table and JSON formatters for calendar models. Tables
//! paint time cells with the shared green scale when colour is enabled.

pub mod output;

pub use output::{CourseReport, JsonFormatter, OutputFormatter, TableFormatter, get_formatter};
