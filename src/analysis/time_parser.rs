//! Clock-time parsing.
//!
//! This module turns raw clock cells into a time of day. Spreadsheet exports are
//! messy: the same column can hold `"9:05 AM"`, `"09:05:00"`, a full timestamp,
//! or a numeric day-fraction. Anything that cannot be read is reported as
//! `None`; a missing clock time is meaningful input for the classifier, so
//! parsing never fails a run.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

use crate::models::RawCell;

/// Text formats tried in order; the first one that parses wins.
pub const TIME_FORMATS: [&str; 5] = [
    "%I:%M:%S %p",
    "%I:%M %p",
    "%H:%M:%S",
    "%H:%M",
    "%Y-%m-%d %H:%M:%S",
];

const MICROS_PER_DAY: f64 = 86_400_000_000.0;

/// Converts a spreadsheet serial number into a timestamp.
///
/// Serials count days from 1899-12-30, the epoch common spreadsheet tools use;
/// the fractional part is the time of day. The value is rounded to the
/// microsecond. Returns `None` for non-finite or out-of-range values.
pub(crate) fn spreadsheet_datetime(serial: f64) -> Option<NaiveDateTime> {
    if !serial.is_finite() {
        return None;
    }

    let micros = (serial * MICROS_PER_DAY).round();
    if micros.abs() >= i64::MAX as f64 {
        return None;
    }

    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?.and_hms_opt(0, 0, 0)?;
    epoch.checked_add_signed(Duration::microseconds(micros as i64))
}

/// Parses a raw cell into a time of day.
///
/// # Arguments
///
/// * `raw` - The clock cell as delivered by the ingestion layer
///
/// # Returns
///
/// - `None` for blank cells and the textual markers `nan`, `nat`, `none`
/// - the time-of-day component of numeric spreadsheet values
/// - the first successful match of [`TIME_FORMATS`] for text
/// - `None` for anything else
///
/// # Example
///
/// ```
/// use attendance_engine::analysis::parse_time;
/// use attendance_engine::models::RawCell;
/// use chrono::NaiveTime;
///
/// let nine = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
/// assert_eq!(parse_time(&RawCell::Number(0.375)), Some(nine));
/// assert_eq!(parse_time(&RawCell::from("09:00 AM")), Some(nine));
/// assert_eq!(parse_time(&RawCell::from("NaT")), None);
/// ```
pub fn parse_time(raw: &RawCell) -> Option<NaiveTime> {
    if raw.is_blank() {
        return None;
    }

    match raw {
        RawCell::Number(serial) => spreadsheet_datetime(*serial).map(|dt| dt.time()),
        RawCell::Text(_) => {
            let value = raw.as_text()?;
            TIME_FORMATS.iter().find_map(|fmt| parse_with_format(value, fmt))
        }
        RawCell::Empty => None,
    }
}

fn parse_with_format(value: &str, fmt: &str) -> Option<NaiveTime> {
    if fmt.contains("%Y") {
        NaiveDateTime::parse_from_str(value, fmt)
            .ok()
            .map(|dt| dt.time())
    } else {
        NaiveTime::parse_from_str(value, fmt).ok()
    }
}
