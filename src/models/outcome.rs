//! Person-day outcome models.
//!
//! This module contains the [`StatusTag`] and [`Severity`] vocabulary produced by the
//! status classifier and the [`PersonDayOutcome`] that records one classified
//! person-day.

use std::fmt;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// A single attendance status attached to a person-day.
///
/// # Example
///
/// ```
/// use attendance_engine::models::StatusTag;
///
/// assert_eq!(StatusTag::SuspiciousNoIn.to_string(), "Suspicious (No In)");
/// assert_eq!(StatusTag::NoOut.to_string(), "No Out");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusTag {
    /// Checked in on time (and did not leave early).
    Present,
    /// Checked in after the required check-in.
    Late,
    /// Checked out before the required check-out.
    Early,
    /// Checked in but never checked out.
    NoOut,
    /// No clock-in and no clock-out.
    Absent,
    /// Clock-out recorded without a clock-in.
    #[serde(rename = "suspicious_no_in")]
    SuspiciousNoIn,
}

impl StatusTag {
    /// Returns `true` for the tags that count towards the present counter.
    pub fn counts_as_present(self) -> bool {
        matches!(self, StatusTag::Present | StatusTag::Late | StatusTag::Early)
    }
}

impl fmt::Display for StatusTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusTag::Present => write!(f, "Present"),
            StatusTag::Late => write!(f, "Late"),
            StatusTag::Early => write!(f, "Early"),
            StatusTag::NoOut => write!(f, "No Out"),
            StatusTag::Absent => write!(f, "Absent"),
            StatusTag::SuspiciousNoIn => write!(f, "Suspicious (No In)"),
        }
    }
}

/// How serious a person-day's status is; drives report highlighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Plain presence.
    Normal,
    /// Late, early or missing clock-out.
    Minor,
    /// Absent or suspicious.
    Major,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Normal => write!(f, "Normal"),
            Severity::Minor => write!(f, "Minor"),
            Severity::Major => write!(f, "Major"),
        }
    }
}

/// The classification of one person on one governed working day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonDayOutcome {
    /// The person identifier.
    pub person: String,
    /// The classified date.
    pub date: NaiveDate,
    /// The parsed clock-in, if any.
    pub clock_in: Option<NaiveTime>,
    /// The parsed clock-out, if any.
    pub clock_out: Option<NaiveTime>,
    /// Status tags in display order.
    pub tags: Vec<StatusTag>,
    /// The severity tier derived from the tags.
    pub severity: Severity,
}

impl PersonDayOutcome {
    /// Returns `true` if the outcome carries the tag.
    pub fn has(&self, tag: StatusTag) -> bool {
        self.tags.contains(&tag)
    }

    /// Joins the tags for display, e.g. `"Late, Early"`.
    pub fn status_label(&self) -> String {
        self.tags
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_present_counting_tags() {
        assert!(StatusTag::Present.counts_as_present());
        assert!(StatusTag::Late.counts_as_present());
        assert!(StatusTag::Early.counts_as_present());
        assert!(!StatusTag::NoOut.counts_as_present());
        assert!(!StatusTag::Absent.counts_as_present());
        assert!(!StatusTag::SuspiciousNoIn.counts_as_present());
    }

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Major > Severity::Minor);
        assert!(Severity::Minor > Severity::Normal);
    }

    #[test]
    fn test_status_label_joins_tags() {
        let outcome = PersonDayOutcome {
            person: "Bilal".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
            clock_in: NaiveTime::from_hms_opt(9, 20, 0),
            clock_out: NaiveTime::from_hms_opt(16, 0, 0),
            tags: vec![StatusTag::Late, StatusTag::Early],
            severity: Severity::Minor,
        };
        assert_eq!(outcome.status_label(), "Late, Early");
        assert!(outcome.has(StatusTag::Late));
        assert!(!outcome.has(StatusTag::Present));
    }

    #[test]
    fn test_tag_serialization() {
        let json = serde_json::to_string(&vec![StatusTag::NoOut, StatusTag::SuspiciousNoIn]).unwrap();
        assert_eq!(json, r#"["no_out","suspicious_no_in"]"#);
    }
}
