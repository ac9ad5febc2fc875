//! Raw input cells and attendance records.
//!
//! This module defines the [`RawCell`] and [`AttendanceRecord`] types that carry
//! unparsed clock values from the ingestion layer into the engine.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single cell value as delivered by the ingestion layer.
///
/// Spreadsheets hand over times either as text (`"09:15"`, `"9:15 AM"`) or as a
/// numeric day-fraction, and blank cells as nothing at all. JSON `null`,
/// strings and numbers deserialize into the matching variant.
///
/// # Example
///
/// ```
/// use attendance_engine::models::RawCell;
///
/// let cells: Vec<RawCell> = serde_json::from_str(r#"["09:15", 0.375, null]"#).unwrap();
/// assert_eq!(cells[0], RawCell::Text("09:15".to_string()));
/// assert_eq!(cells[1], RawCell::Number(0.375));
/// assert_eq!(cells[2], RawCell::Empty);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawCell {
    /// A numeric cell (spreadsheet serial or day-fraction).
    Number(f64),
    /// A textual cell.
    Text(String),
    /// A blank cell.
    Empty,
}

impl RawCell {
    /// Returns the cell as trimmed text, or `None` for blank and numeric cells.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            RawCell::Text(value) => Some(value.trim()),
            _ => None,
        }
    }

    /// Returns `true` for blank cells and for the textual "missing" markers
    /// spreadsheet exports produce (`nan`, `nat`, `none`, case-insensitive).
    pub fn is_blank(&self) -> bool {
        match self {
            RawCell::Empty => true,
            RawCell::Number(value) => value.is_nan(),
            RawCell::Text(value) => {
                let trimmed = value.trim();
                trimmed.is_empty()
                    || ["nan", "nat", "none"]
                        .iter()
                        .any(|marker| trimmed.eq_ignore_ascii_case(marker))
            }
        }
    }
}

impl From<&str> for RawCell {
    fn from(value: &str) -> Self {
        RawCell::Text(value.to_string())
    }
}

impl From<f64> for RawCell {
    fn from(value: f64) -> Self {
        RawCell::Number(value)
    }
}

/// One person's clock cells for one calendar date.
///
/// Records are immutable once read; the clock cells stay raw until the
/// aggregation pass parses them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// The person identifier (never empty).
    pub person: String,
    /// The calendar date of the record.
    pub date: NaiveDate,
    /// The raw clock-in cell.
    pub clock_in: RawCell,
    /// The raw clock-out cell.
    pub clock_out: RawCell,
}

impl AttendanceRecord {
    /// Creates a new record.
    pub fn new(
        person: impl Into<String>,
        date: NaiveDate,
        clock_in: impl Into<RawCell>,
        clock_out: impl Into<RawCell>,
    ) -> Self {
        Self {
            person: person.into(),
            date,
            clock_in: clock_in.into(),
            clock_out: clock_out.into(),
        }
    }
}
