//! HTTP API module for the Attendance Engine.
//!
//! This module provides the REST endpoint that takes a table of clock
//! records and returns the attendance summary and per-person detail reports.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::AnalyzeRequest;
pub use response::{AnalyzeResponse, ApiError, ApiErrorResponse};
pub use state::AppState;
