//! Shift period model.
//!
//! A shift period is a date range with its own required check-in,
//! check-out and Friday check-out times.

use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// A date range governed by one set of required clock times.
///
/// # Examples
///
/// ```
/// use attendance_engine::models::ShiftPeriod;
/// use chrono::{NaiveDate, NaiveTime};
///
/// let period = ShiftPeriod::new(
///     NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
///     NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
///     NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
///     NaiveTime::from_hms_opt(13, 0, 0).unwrap(),
/// )
/// .unwrap();
///
/// // 2024-03-08 is a Friday
/// let friday = NaiveDate::from_ymd_opt(2024, 3, 8).unwrap();
/// assert_eq!(period.required_check_out(friday), NaiveTime::from_hms_opt(13, 0, 0).unwrap());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftPeriod {
    /// First date of the period (inclusive).
    pub start: NaiveDate,
    /// Last date of the period (inclusive).
    pub end: NaiveDate,
    /// Latest check-in that is not late.
    #[serde(with = "clock_time")]
    pub check_in: NaiveTime,
    /// Earliest check-out that is not early, Saturday through Thursday.
    #[serde(with = "clock_time")]
    pub check_out: NaiveTime,
    /// Earliest check-out that is not early on Fridays.
    #[serde(with = "clock_time")]
    pub friday_check_out: NaiveTime,
}

impl ShiftPeriod {
    /// Creates a shift period, rejecting ranges that end before they start.
    pub fn new(
        start: NaiveDate,
        end: NaiveDate,
        check_in: NaiveTime,
        check_out: NaiveTime,
        friday_check_out: NaiveTime,
    ) -> EngineResult<Self> {
        let period = Self {
            start,
            end,
            check_in,
            check_out,
            friday_check_out,
        };
        period.validate(1)?;
        Ok(period)
    }

    /// Checks the `start <= end` invariant.
    ///
    /// `index` is the 1-based position used in the error message.
    pub fn validate(&self, index: usize) -> EngineResult<()> {
        if self.start > self.end {
            return Err(EngineError::InvalidShiftPeriod {
                index,
                message: format!(
                    "start date {} is after end date {}",
                    self.start, self.end
                ),
            });
        }
        Ok(())
    }

    /// Returns `true` if the date lies within the inclusive range.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Returns the required check-out for a date: the Friday value on
    /// Fridays, the standard value otherwise.
    pub fn required_check_out(&self, date: NaiveDate) -> NaiveTime {
        if date.weekday() == Weekday::Fri {
            self.friday_check_out
        } else {
            self.check_out
        }
    }
}

/// Serde adapter for clock times written as `HH:MM` or `HH:MM:SS`.
pub(crate) mod clock_time {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer, de};

    const FORMATS: [&str; 2] = ["%H:%M:%S", "%H:%M"];

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format("%H:%M:%S").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        let value = raw.trim();
        FORMATS
            .iter()
            .find_map(|fmt| NaiveTime::parse_from_str(value, fmt).ok())
            .ok_or_else(|| de::Error::custom(format!("invalid clock time '{}'", raw)))
    }
}
