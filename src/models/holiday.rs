//! Holiday set model.
//!
//! This module contains the [`HolidaySet`] type: specific calendar dates that are
//! never treated as working days, supplied independently of shift periods.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// The warning emitted when a holiday list cannot be parsed.
pub const HOLIDAY_PARSE_WARNING: &str = "Warning: Could not parse holidays.";

/// A set of calendar dates excluded from work-day consideration.
///
/// # Example
///
/// ```
/// use attendance_engine::models::HolidaySet;
/// use chrono::NaiveDate;
///
/// let (holidays, warning) = HolidaySet::parse_list("2024-12-25, 2025-01-01");
/// assert!(warning.is_none());
/// assert!(holidays.contains(NaiveDate::from_ymd_opt(2024, 12, 25).unwrap()));
/// assert_eq!(holidays.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HolidaySet {
    dates: BTreeSet<NaiveDate>,
}

impl HolidaySet {
    /// Creates an empty holiday set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a comma-separated list of ISO (`YYYY-MM-DD`) dates.
    ///
    /// Blank entries are ignored. If any entry fails to parse the whole list
    /// degrades to an empty set and a warning message is returned alongside
    /// it so the caller can forward it to its own log stream.
    ///
    /// ```
    /// use attendance_engine::models::HolidaySet;
    ///
    /// let (holidays, warning) = HolidaySet::parse_list("2024-12-25, christmas");
    /// assert!(holidays.is_empty());
    /// assert!(warning.is_some());
    /// ```
    pub fn parse_list(text: &str) -> (Self, Option<String>) {
        let parsed: Result<BTreeSet<NaiveDate>, _> = text
            .split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(|entry| NaiveDate::parse_from_str(entry, "%Y-%m-%d").map_err(|_| entry))
            .collect();

        match parsed {
            Ok(dates) => (Self { dates }, None),
            Err(entry) => {
                warn!(entry = %entry, "Could not parse holiday list, using no holidays");
                (Self::new(), Some(HOLIDAY_PARSE_WARNING.to_string()))
            }
        }
    }

    /// Adds a date to the set.
    pub fn insert(&mut self, date: NaiveDate) -> bool {
        self.dates.insert(date)
    }

    /// Returns `true` if the date is a holiday.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.dates.contains(&date)
    }

    /// Number of holidays in the set.
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Returns `true` when there are no holidays.
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Iterates the holidays in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.dates.iter().copied()
    }
}

impl FromIterator<NaiveDate> for HolidaySet {
    fn from_iter<I: IntoIterator<Item = NaiveDate>>(iter: I) -> Self {
        Self {
            dates: iter.into_iter().collect(),
        }
    }
}
