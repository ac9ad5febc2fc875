//! Response types for the Attendance Engine API.
//!
//! This module defines the success body of `/analyze` and the error response
//! structures and error handling for the HTTP API.

use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::analysis::Role;
use crate::error::EngineError;
use crate::models::{AnalysisResult, DateRange, EarlyLeavePolicy};
use crate::report::{AttendanceReport, PersonDetail, SummaryRow};

/// Response body for a successful `/analyze` call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    /// Identifier of the run.
    pub run_id: Uuid,
    /// The engine version that produced the result.
    pub engine_version: String,
    /// Range covered by the shift periods, if any were configured.
    pub governed_range: Option<DateRange>,
    /// The early-leave policy the run used.
    pub early_leave: EarlyLeavePolicy,
    /// Non-fatal problems, such as an unreadable holiday list.
    pub warnings: Vec<String>,
    /// The overall summary table.
    pub summary: Vec<SummaryRow>,
    /// One detail table per person.
    pub details: Vec<PersonDetail>,
    /// Time spent aggregating, in microseconds.
    pub duration_us: u64,
}

impl AnalyzeResponse {
    /// Combines a run result with its report projections.
    pub fn new(result: AnalysisResult, report: AttendanceReport) -> Self {
        Self {
            run_id: result.run_id,
            engine_version: result.engine_version,
            governed_range: result.governed_range,
            early_leave: result.early_leave,
            warnings: result.warnings,
            summary: report.summary,
            details: report.details,
            duration_us: result.duration_us,
        }
    }
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }

    /// Creates the error for headers that could not be matched to every role.
    pub fn mapping_incomplete(missing: &[Role]) -> Self {
        let roles = missing
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        Self::with_details(
            "MAPPING_INCOMPLETE",
            format!("Could not detect columns for: {}", roles),
            "Provide an explicit \"mapping\" object naming the column for each role",
        )
    }
}

/// API error with HTTP status code.
#[derive(Debug)]
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// Creates an error response.
    pub fn new(status: StatusCode, error: ApiError) -> Self {
        Self { status, error }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (
            self.status,
            [(header::CONTENT_TYPE, "application/json")],
            Json(self.error),
        )
            .into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        match error {
            EngineError::ConfigNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Configuration file not found: {}", path),
                ),
            },
            EngineError::ConfigParseError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            },
            EngineError::InvalidShiftPeriod { index, message } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INVALID_SHIFT_PERIOD",
                    format!("Invalid shift period #{}: {}", index, message),
                    "Every shift period must start on or before its end date",
                ),
            },
            EngineError::MissingColumn { role, column } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "MISSING_COLUMN",
                    format!("Column '{}' mapped to {} does not exist", column, role),
                    "The mapping names a column that is not in \"columns\"",
                ),
            },
            EngineError::InvalidInput { message } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::new("INVALID_INPUT", message),
            },
        }
    }
}
