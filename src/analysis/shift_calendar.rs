//! Shift calendar: which rules govern a date, and whether it is a working day.
//!
//! The calendar is an ordered list of [`ShiftPeriod`]s plus a [`HolidaySet`].
//! Periods may overlap; lookup returns the first declared period that contains
//! the date, and that first-match order is part of the contract.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{DateRange, HolidaySet, ShiftPeriod};

/// The fixed weekly day off.
pub const NON_WORKING_WEEKDAY: Weekday = Weekday::Sun;

/// Ordered shift periods and the holidays that apply across them.
///
/// # Example
///
/// ```
/// use attendance_engine::analysis::ShiftCalendar;
/// use attendance_engine::models::{HolidaySet, ShiftPeriod};
/// use chrono::{NaiveDate, NaiveTime};
///
/// let period = ShiftPeriod::new(
///     NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 3, 10).unwrap(),
///     NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
///     NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
///     NaiveTime::from_hms_opt(13, 0, 0).unwrap(),
/// )
/// .unwrap();
/// let calendar = ShiftCalendar::new(vec![period], HolidaySet::new()).unwrap();
///
/// // 2024-03-10 is a Sunday
/// assert!(calendar.is_non_working_day(NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()));
/// assert!(calendar.resolve(NaiveDate::from_ymd_opt(2024, 3, 11).unwrap()).is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "UncheckedCalendar")]
pub struct ShiftCalendar {
    periods: Vec<ShiftPeriod>,
    holidays: HolidaySet,
}

/// Wire form of a calendar; deserialized calendars are validated through
/// [`ShiftCalendar::new`].
#[derive(Deserialize)]
struct UncheckedCalendar {
    periods: Vec<ShiftPeriod>,
    #[serde(default)]
    holidays: HolidaySet,
}

impl TryFrom<UncheckedCalendar> for ShiftCalendar {
    type Error = EngineError;

    fn try_from(raw: UncheckedCalendar) -> Result<Self, Self::Error> {
        ShiftCalendar::new(raw.periods, raw.holidays)
    }
}

impl ShiftCalendar {
    /// Creates a calendar, validating every period.
    ///
    /// # Errors
    ///
    /// Returns `InvalidShiftPeriod` (with the 1-based position) for the
    /// first period whose start is after its end.
    pub fn new(periods: Vec<ShiftPeriod>, holidays: HolidaySet) -> EngineResult<Self> {
        for (i, period) in periods.iter().enumerate() {
            period.validate(i + 1)?;
        }
        Ok(Self { periods, holidays })
    }

    /// The periods in declaration order.
    pub fn periods(&self) -> &[ShiftPeriod] {
        &self.periods
    }

    /// The holiday set.
    pub fn holidays(&self) -> &HolidaySet {
        &self.holidays
    }

    /// Appends a period after the existing ones, so it loses every overlap.
    pub fn push_period(&mut self, period: ShiftPeriod) -> EngineResult<()> {
        period.validate(self.periods.len() + 1)?;
        self.periods.push(period);
        Ok(())
    }

    /// Removes and returns the period at `index`, if there is one.
    pub fn remove_period(&mut self, index: usize) -> Option<ShiftPeriod> {
        (index < self.periods.len()).then(|| self.periods.remove(index))
    }

    /// Returns `true` on Sundays and holidays.
    pub fn is_non_working_day(&self, date: NaiveDate) -> bool {
        date.weekday() == NON_WORKING_WEEKDAY || self.holidays.contains(date)
    }

    /// Returns the first declared period containing the date.
    pub fn resolve(&self, date: NaiveDate) -> Option<&ShiftPeriod> {
        self.periods.iter().find(|p| p.contains(date))
    }

    /// The union bound of all periods: earliest start to latest end.
    ///
    /// Returns `None` when no periods are configured. Dates between
    /// disjoint periods are inside the bound but [`resolve`](Self::resolve)
    /// to nothing.
    pub fn governed_range(&self) -> Option<DateRange> {
        let start = self.periods.iter().map(|p| p.start).min()?;
        let end = self.periods.iter().map(|p| p.end).max()?;
        Some(DateRange::new(start, end))
    }

    /// Iterates the dates that get classified: every date in the governed
    /// range that is a working day and has a governing period.
    pub fn working_days(&self) -> impl Iterator<Item = (NaiveDate, &ShiftPeriod)> + '_ {
        self.governed_range()
            .into_iter()
            .flat_map(DateRange::days)
            .filter(|date| !self.is_non_working_day(*date))
            .filter_map(|date| self.resolve(date).map(|period| (date, period)))
    }
}
