//! Error types for the Attendance Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every fault that can abort a run. Cell-level parse problems never
//! show up here: they degrade to "no value" inside the parsers.

use thiserror::Error;

/// The main error type for the Attendance Engine.
///
/// # Example
///
/// ```
/// use attendance_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/calendar.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/calendar.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A shift period was structurally invalid (e.g. it ends before it starts).
    #[error("Invalid shift period #{index}: {message}")]
    InvalidShiftPeriod {
        /// Position of the period in the declared sequence (1-based).
        index: usize,
        /// A description of what made the period invalid.
        message: String,
    },

    /// A column bound to a logical role does not exist in the dataset.
    #[error("Column '{column}' mapped to role '{role}' was not found in the dataset")]
    MissingColumn {
        /// The logical role (name, date, clock_in, clock_out).
        role: String,
        /// The column header that was requested.
        column: String,
    },

    /// The input dataset is structurally invalid.
    #[error("Invalid input: {message}")]
    InvalidInput {
        /// A description of the structural problem.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
