//! Error types for tutors-time
//!
//! This module defines the error types used throughout the tutors-time
//! crates. All errors are derived from `thiserror` for convenient error
//! handling and automatic `From` implementations.
//!
//! The aggregation core itself never fails for data-shape reasons; these
//! errors come from the loading layer and from user input.
//!
//! # Example
//!
//! ```
//! use tutors_time_core::error::{Result, TutorsTimeError};
//!
//! fn require_course(id: &str) -> Result<&str> {
//!     let id = id.trim();
//!     if id.is_empty() {
//!         return Err(TutorsTimeError::InvalidArgument("Course ID is required".into()));
//!     }
//!     Ok(id)
//! }
//!
//! assert!(require_course("  ").is_err());
//! ```

use thiserror::Error;

/// Main error type for tutors-time operations
///
/// This enum covers everything that can go wrong around the core: reading
/// calendar exports, talking to the hosted table, and validating user input.
#[derive(Error, Debug)]
pub enum TutorsTimeError {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// Network error
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Invalid date format
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    /// Invalid argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// The data source could not deliver a course's calendar
    #[error("Failed to fetch calendar data for {course_id}: {message}")]
    DataSource {
        /// Course whose fetch failed
        course_id: String,
        /// Upstream error message
        message: String,
    },
}

/// Convenience type alias for Results in tutors-time
///
/// # Example
///
/// ```
/// use tutors_time_core::Result;
///
/// fn count_rows() -> Result<usize> {
///     Ok(0)
/// }
/// ```
pub type Result<T> = std::result::Result<T, TutorsTimeError>;
