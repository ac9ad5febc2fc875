//! HTTP request handlers for the Attendance Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::analysis::{AnalysisJob, ColumnMapping, RunObserver};
use crate::config::ResolvedRules;
use crate::report::assemble;

use super::request::AnalyzeRequest;
use super::response::{AnalyzeResponse, ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/analyze", post(analyze_handler))
        .with_state(state)
}

/// Forwards run log lines to `tracing`, tagged with the request's id.
struct TracingObserver {
    correlation_id: Uuid,
}

impl RunObserver for TracingObserver {
    fn log(&mut self, message: &str) {
        debug!(correlation_id = %self.correlation_id, "{}", message);
    }
}

/// Handler for POST /analyze endpoint.
///
/// Accepts a table of clock records and returns the summary and detail
/// report projections.
async fn analyze_handler(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing analysis request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    let body_text = err.body_text();
                    warn!(
                        correlation_id = %correlation_id,
                        error = %body_text,
                        "JSON data error"
                    );
                    ApiError::malformed_json(body_text)
                }
                JsonRejection::JsonSyntaxError(err) => {
                    warn!(
                        correlation_id = %correlation_id,
                        error = %err,
                        "JSON syntax error"
                    );
                    ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
                }
                JsonRejection::MissingJsonContentType(_) => {
                    ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
                }
                _ => ApiError::malformed_json("Failed to parse request body"),
            };
            return ApiErrorResponse::new(StatusCode::BAD_REQUEST, error).into_response();
        }
    };

    match perform_analysis(request, &state, correlation_id).await {
        Ok(response) => {
            info!(
                correlation_id = %correlation_id,
                run_id = %response.run_id,
                persons = response.summary.len(),
                duration_us = response.duration_us,
                "Analysis completed successfully"
            );
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                Json(response),
            )
                .into_response()
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                code = %err.error.code,
                error = %err.error.message,
                "Analysis failed"
            );
            err.into_response()
        }
    }
}

/// Resolves mapping and rules, then runs the analysis off the async runtime.
async fn perform_analysis(
    request: AnalyzeRequest,
    state: &AppState,
    correlation_id: Uuid,
) -> Result<AnalyzeResponse, ApiErrorResponse> {
    let (dataset, mapping, rules) = request.into_parts();

    let mapping = match mapping {
        Some(mapping) => mapping,
        None => match ColumnMapping::detect(&dataset.columns).into_mapping() {
            Ok(mapping) => {
                debug!(correlation_id = %correlation_id, ?mapping, "Detected column mapping");
                mapping
            }
            Err(missing) => {
                return Err(ApiErrorResponse::new(
                    StatusCode::BAD_REQUEST,
                    ApiError::mapping_incomplete(&missing),
                ));
            }
        },
    };

    let ResolvedRules {
        calendar,
        early_leave,
        thresholds,
        warnings,
    } = match rules {
        Some(rules) => rules.resolve()?,
        None => state.config().rules().clone(),
    };

    let job = AnalysisJob {
        dataset,
        mapping,
        calendar,
        early_leave,
        warnings,
    };

    let result = tokio::task::spawn_blocking(move || {
        job.run(&mut TracingObserver { correlation_id })
    })
    .await
    .map_err(|join_err| {
        ApiErrorResponse::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::with_details("ANALYSIS_FAILED", "Analysis failed", join_err.to_string()),
        )
    })??;

    let report = assemble(&result, &thresholds);
    Ok(AnalyzeResponse::new(result, report))
}
