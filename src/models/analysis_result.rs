//! Analysis result model.
//!
//! This module contains the [`AnalysisResult`] returned by an aggregation run. It is
//! the single hand-off object between the engine and whatever renders reports:
//! summaries and the outcomes they were counted from travel together.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{DateRange, EarlyLeavePolicy, PersonDayOutcome, PersonSummary};

/// The complete result of one aggregation run.
///
/// # Example
///
/// ```
/// use attendance_engine::models::{AnalysisResult, EarlyLeavePolicy};
/// use chrono::Utc;
/// use uuid::Uuid;
///
/// let result = AnalysisResult {
///     run_id: Uuid::new_v4(),
///     timestamp: Utc::now(),
///     engine_version: "0.1.0".to_string(),
///     governed_range: None,
///     early_leave: EarlyLeavePolicy::Strict,
///     summaries: vec![],
///     outcomes: vec![],
///     warnings: vec![],
///     duration_us: 0,
/// };
/// assert!(result.summary_for("nobody").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Unique identifier for this run.
    pub run_id: Uuid,
    /// When the run finished.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that produced the result.
    pub engine_version: String,
    /// The union of all shift periods, or `None` when none were configured.
    pub governed_range: Option<DateRange>,
    /// The early-leave policy the run applied.
    pub early_leave: EarlyLeavePolicy,
    /// Per-person counters, in order of first appearance in the input.
    pub summaries: Vec<PersonSummary>,
    /// Every classified person-day, grouped by person in summary order and
    /// ascending by date within a person.
    pub outcomes: Vec<PersonDayOutcome>,
    /// Non-fatal warnings raised while preparing the run.
    pub warnings: Vec<String>,
    /// Wall-clock duration of the aggregation pass in microseconds.
    pub duration_us: u64,
}

impl AnalysisResult {
    /// Looks up a person's summary.
    pub fn summary_for(&self, person: &str) -> Option<&PersonSummary> {
        self.summaries.iter().find(|s| s.person == person)
    }

    /// Returns the outcomes for one person in date order.
    pub fn outcomes_for<'a>(
        &'a self,
        person: &'a str,
    ) -> impl Iterator<Item = &'a PersonDayOutcome> + 'a {
        self.outcomes.iter().filter(move |o| o.person == person)
    }
}
