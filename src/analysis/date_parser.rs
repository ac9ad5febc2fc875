//! Calendar-date parsing for the date column.
//!
//! Ambiguous numeric dates are read day-before-month (`03/04/2024` is the
//! 3rd of April).

use chrono::{NaiveDate, NaiveDateTime};

use crate::models::RawCell;

use super::time_parser::spreadsheet_datetime;

/// Date-only formats tried in order. `%Y` also accepts one to three digit
/// years, so two-digit-year forms come first and year-first forms last.
const DATE_FORMATS: [&str; 10] = [
    "%d/%m/%y",
    "%d/%m/%Y",
    "%d-%m-%y",
    "%d-%m-%Y",
    "%d.%m.%Y",
    "%d-%b-%y",
    "%d-%b-%Y",
    "%d %b %Y",
    "%Y-%m-%d",
    "%Y/%m/%d",
];

/// Timestamp formats tried after the date-only ones; the time is discarded.
const DATETIME_FORMATS: [&str; 5] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
];

/// Parses a raw date cell.
///
/// Numeric cells are spreadsheet serial dates; the fractional part is
/// ignored. Returns `None` for blank or unreadable cells.
///
/// # Example
///
/// ```
/// use attendance_engine::analysis::parse_date;
/// use attendance_engine::models::RawCell;
/// use chrono::NaiveDate;
///
/// let april_3 = NaiveDate::from_ymd_opt(2024, 4, 3).unwrap();
/// assert_eq!(parse_date(&RawCell::from("03/04/2024")), Some(april_3));
/// assert_eq!(parse_date(&RawCell::from("2024-04-03")), Some(april_3));
/// ```
pub fn parse_date(raw: &RawCell) -> Option<NaiveDate> {
    if raw.is_blank() {
        return None;
    }

    match raw {
        RawCell::Number(serial) => spreadsheet_datetime(serial.floor()).map(|dt| dt.date()),
        RawCell::Text(_) => {
            let value = raw.as_text()?;
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
                .or_else(|| {
                    DATETIME_FORMATS.iter().find_map(|fmt| {
                        NaiveDateTime::parse_from_str(value, fmt)
                            .ok()
                            .map(|dt| dt.date())
                    })
                })
        }
        RawCell::Empty => None,
    }
}
