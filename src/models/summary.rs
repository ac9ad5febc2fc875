//! Per-person attendance counters.

use serde::{Deserialize, Serialize};

use super::{PersonDayOutcome, StatusTag};

/// Running attendance counts for one person over the governed range.
///
/// Counters only ever grow; [`PersonSummary::record`] folds one classified
/// person-day into them.
///
/// # Example
///
/// ```
/// use attendance_engine::models::{PersonDayOutcome, PersonSummary, Severity, StatusTag};
/// use chrono::{NaiveDate, NaiveTime};
///
/// let mut summary = PersonSummary::new("Ayesha");
/// summary.record(&PersonDayOutcome {
///     person: "Ayesha".to_string(),
///     date: NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
///     clock_in: NaiveTime::from_hms_opt(9, 15, 0),
///     clock_out: NaiveTime::from_hms_opt(17, 0, 0),
///     tags: vec![StatusTag::Late],
///     severity: Severity::Minor,
/// });
///
/// assert_eq!(summary.present, 1);
/// assert_eq!(summary.late, 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonSummary {
    /// The person identifier.
    pub person: String,
    /// Days tagged Present, Late or Early.
    pub present: u32,
    /// Days tagged Late.
    pub late: u32,
    /// Days tagged Early.
    pub early: u32,
    /// Days tagged Absent.
    pub absent: u32,
    /// Days tagged Suspicious (No In).
    pub suspicious: u32,
    /// Days tagged No Out.
    pub no_out: u32,
}

impl PersonSummary {
    /// Creates a zeroed summary for a person.
    pub fn new(person: impl Into<String>) -> Self {
        Self {
            person: person.into(),
            ..Self::default()
        }
    }

    /// Folds one outcome's tags into the counters.
    pub fn record(&mut self, outcome: &PersonDayOutcome) {
        for tag in &outcome.tags {
            match tag {
                StatusTag::Absent => self.absent += 1,
                StatusTag::SuspiciousNoIn => self.suspicious += 1,
                StatusTag::Late => self.late += 1,
                StatusTag::Early => self.early += 1,
                StatusTag::NoOut => self.no_out += 1,
                StatusTag::Present => {}
            }
        }

        if outcome.tags.iter().any(|tag| tag.counts_as_present()) {
            self.present += 1;
        }
    }
}
