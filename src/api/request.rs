//! Request types for the Attendance Engine API.
//!
//! This module defines the JSON request structure for the `/analyze` endpoint.

use serde::{Deserialize, Serialize};

use crate::analysis::{ColumnMapping, Dataset};
use crate::config::RulesConfig;
use crate::models::RawCell;

/// Request body for the `/analyze` endpoint.
///
/// Carries a table exported from the clock system. Cells may be strings,
/// numbers (spreadsheet serial dates and day-fractions) or `null`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    /// Column headers.
    pub columns: Vec<String>,
    /// Data rows, one cell per column.
    pub rows: Vec<Vec<RawCell>>,
    /// Explicit column roles. Detected from the headers when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mapping: Option<ColumnMapping>,
    /// Rules for this run. The server's configured rules apply when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rules: Option<RulesConfig>,
}

impl AnalyzeRequest {
    /// Splits the request into its dataset and the optional overrides.
    pub fn into_parts(self) -> (Dataset, Option<ColumnMapping>, Option<RulesConfig>) {
        (Dataset::new(self.columns, self.rows), self.mapping, self.rules)
    }
}
