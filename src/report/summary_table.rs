//! The overall summary table.

use serde::{Deserialize, Serialize};

use crate::models::PersonSummary;

use super::Highlight;

/// Counts above which a summary cell is highlighted.
///
/// A cell is highlighted when its count is strictly greater than the
/// threshold. Late and early cells get a light highlight, absent and
/// suspicious cells a strong one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightThresholds {
    /// Late days tolerated before highlighting.
    pub late: u32,
    /// Early departures tolerated before highlighting.
    pub early: u32,
    /// Absences tolerated before highlighting.
    pub absent: u32,
    /// Suspicious days tolerated before highlighting.
    pub suspicious: u32,
}

impl Default for HighlightThresholds {
    fn default() -> Self {
        Self {
            late: 3,
            early: 3,
            absent: 2,
            suspicious: 0,
        }
    }
}

/// One person's row in the summary table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryRow {
    /// The person's counters.
    #[serde(flatten)]
    pub counts: PersonSummary,
    /// Highlight for the late cell.
    pub late_highlight: Highlight,
    /// Highlight for the early cell.
    pub early_highlight: Highlight,
    /// Highlight for the absent cell.
    pub absent_highlight: Highlight,
    /// Highlight for the suspicious cell.
    pub suspicious_highlight: Highlight,
}

fn over(count: u32, threshold: u32, level: Highlight) -> Highlight {
    if count > threshold { level } else { Highlight::None }
}

/// Builds one row per summary, keeping the given order.
pub fn build_summary_table(
    summaries: &[PersonSummary],
    thresholds: &HighlightThresholds,
) -> Vec<SummaryRow> {
    summaries
        .iter()
        .map(|s| SummaryRow {
            late_highlight: over(s.late, thresholds.late, Highlight::Light),
            early_highlight: over(s.early, thresholds.early, Highlight::Light),
            absent_highlight: over(s.absent, thresholds.absent, Highlight::Strong),
            suspicious_highlight: over(s.suspicious, thresholds.suspicious, Highlight::Strong),
            counts: s.clone(),
        })
        .collect()
}
