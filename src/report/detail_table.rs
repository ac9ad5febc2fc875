//! Per-person detail tables.

use std::collections::HashMap;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::models::{AnalysisResult, DateRange, PersonDayOutcome, PersonSummary};

use super::Highlight;

const DATE_LABEL_FORMAT: &str = "%d-%b (%a)";
const CLOCK_FORMAT: &str = "%H:%M";
const MISSING_CLOCK: &str = "-";

/// One governed working day in a person's detail table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailRow {
    /// Display label such as `04-Mar (Mon)`.
    pub date_label: String,
    /// The date itself.
    pub date: NaiveDate,
    /// Clock-in as `HH:MM`, or `-`.
    pub clock_in: String,
    /// Clock-out as `HH:MM`, or `-`.
    pub clock_out: String,
    /// Status tags joined with `", "`.
    pub status: String,
    /// Row emphasis derived from the outcome's severity.
    pub highlight: Highlight,
}

impl From<&PersonDayOutcome> for DetailRow {
    fn from(outcome: &PersonDayOutcome) -> Self {
        Self {
            date_label: outcome.date.format(DATE_LABEL_FORMAT).to_string(),
            date: outcome.date,
            clock_in: clock_text(outcome.clock_in),
            clock_out: clock_text(outcome.clock_out),
            status: outcome.status_label(),
            highlight: outcome.severity.into(),
        }
    }
}

fn clock_text(time: Option<NaiveTime>) -> String {
    time.map(|t| t.format(CLOCK_FORMAT).to_string())
        .unwrap_or_else(|| MISSING_CLOCK.to_string())
}

/// A person's detail table with its header block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonDetail {
    /// The person identifier.
    pub person: String,
    /// The governed range the table covers.
    pub range: Option<DateRange>,
    /// Header counts, e.g. `Lates: 2 | Early: 0 | Absent: 1 | Suspicious: 0`.
    pub counts_line: String,
    /// The same counters as the summary table.
    pub counts: PersonSummary,
    /// One row per governed working day, ascending.
    pub rows: Vec<DetailRow>,
}

impl PersonDetail {
    /// Formats the header counts line for a summary.
    pub fn counts_line(summary: &PersonSummary) -> String {
        format!(
            "Lates: {} | Early: {} | Absent: {} | Suspicious: {}",
            summary.late, summary.early, summary.absent, summary.suspicious
        )
    }
}

/// Builds one detail table per person, in summary order.
pub fn build_details(result: &AnalysisResult) -> Vec<PersonDetail> {
    let mut by_person: HashMap<&str, Vec<DetailRow>> = HashMap::new();
    for outcome in &result.outcomes {
        by_person
            .entry(outcome.person.as_str())
            .or_default()
            .push(DetailRow::from(outcome));
    }

    result
        .summaries
        .iter()
        .map(|summary| PersonDetail {
            person: summary.person.clone(),
            range: result.governed_range,
            counts_line: PersonDetail::counts_line(summary),
            counts: summary.clone(),
            rows: by_person.remove(summary.person.as_str()).unwrap_or_default(),
        })
        .collect()
}
