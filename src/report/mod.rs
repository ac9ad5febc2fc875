//! Report projections over an [`AnalysisResult`](crate::models::AnalysisResult).
//!
//! These are pure reshapes for an external renderer: an overall summary
//! table with per-cell highlights, and one detail table per person. Counts
//! always come from the same [`PersonSummary`](crate::models::PersonSummary)
//! values the run produced.

mod detail_table;
mod summary_table;

use serde::{Deserialize, Serialize};

use crate::models::{AnalysisResult, Severity};

pub use detail_table::{DetailRow, PersonDetail, build_details};
pub use summary_table::{HighlightThresholds, SummaryRow, build_summary_table};

/// Emphasis a renderer should give a cell or row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Highlight {
    /// No emphasis.
    #[default]
    None,
    /// Light shading.
    Light,
    /// Strong shading.
    Strong,
}

impl From<Severity> for Highlight {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Normal => Highlight::None,
            Severity::Minor => Highlight::Light,
            Severity::Major => Highlight::Strong,
        }
    }
}

/// Both report projections for one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceReport {
    /// One row per person, in summary order.
    pub summary: Vec<SummaryRow>,
    /// One detail table per person, in summary order.
    pub details: Vec<PersonDetail>,
}

/// Builds the summary table and every detail table.
pub fn assemble(result: &AnalysisResult, thresholds: &HighlightThresholds) -> AttendanceReport {
    AttendanceReport {
        summary: build_summary_table(&result.summaries, thresholds),
        details: build_details(result),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_highlight_from_severity() {
        assert_eq!(Highlight::from(Severity::Normal), Highlight::None);
        assert_eq!(Highlight::from(Severity::Minor), Highlight::Light);
        assert_eq!(Highlight::from(Severity::Major), Highlight::Strong);
    }

    #[test]
    fn test_highlight_serializes_snake_case() {
        assert_eq!(serde_json::to_string(&Highlight::Strong).unwrap(), "\"strong\"");
        assert_eq!(serde_json::to_string(&Highlight::None).unwrap(), "\"none\"");
    }
}
