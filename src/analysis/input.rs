//! Tabular input and column-role binding.
//!
//! The ingestion layer hands over a header row and cell rows. The engine only
//! cares about four logical roles (person, date, clock-in, clock-out); a
//! [`ColumnMapping`] names the columns for each role and resolves to a
//! [`RoleAccessor`] of column indices the pipeline reads through.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::{AttendanceRecord, RawCell};

use super::date_parser::parse_date;

/// A header row plus rows of raw cells.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    /// Column headers.
    pub columns: Vec<String>,
    /// Data rows; each row is expected to have one cell per column.
    pub rows: Vec<Vec<RawCell>>,
}

impl Dataset {
    /// Creates a dataset.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<RawCell>>) -> Self {
        Self { columns, rows }
    }

    /// Returns the index of the column with exactly this header.
    pub fn column_index(&self, header: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == header)
    }
}

/// A logical column role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// The person identifier.
    Name,
    /// The calendar date.
    Date,
    /// The clock-in time.
    ClockIn,
    /// The clock-out time.
    ClockOut,
}

impl Role {
    /// Keywords used by [`ColumnMapping::detect`], tried in order.
    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            Role::Name => &["name", "employee", "user"],
            Role::Date => &["date", "time", "day"],
            Role::ClockIn => &["in", "start", "login"],
            Role::ClockOut => &["out", "end", "logout"],
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Name => write!(f, "name"),
            Role::Date => write!(f, "date"),
            Role::ClockIn => write!(f, "clock_in"),
            Role::ClockOut => write!(f, "clock_out"),
        }
    }
}

/// Column headers bound to each logical role.
///
/// # Example
///
/// ```
/// use attendance_engine::analysis::{ColumnMapping, Dataset};
///
/// let dataset = Dataset::new(
///     vec!["Employee Name".into(), "Date".into(), "Clock In".into(), "Clock Out".into()],
///     vec![],
/// );
/// let mapping = ColumnMapping::detect(&dataset.columns).complete().unwrap();
/// assert_eq!(mapping.name, "Employee Name");
/// assert_eq!(mapping.clock_out, "Clock Out");
/// assert!(mapping.resolve(&dataset).is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMapping {
    /// Header of the person column.
    pub name: String,
    /// Header of the date column.
    pub date: String,
    /// Header of the clock-in column.
    pub clock_in: String,
    /// Header of the clock-out column.
    pub clock_out: String,
}

/// The result of keyword-based column detection; any role may be unmatched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetectedMapping {
    /// Detected person column.
    pub name: Option<String>,
    /// Detected date column.
    pub date: Option<String>,
    /// Detected clock-in column.
    pub clock_in: Option<String>,
    /// Detected clock-out column.
    pub clock_out: Option<String>,
}

impl DetectedMapping {
    /// Roles no column was found for.
    pub fn missing_roles(&self) -> Vec<Role> {
        [
            (Role::Name, &self.name),
            (Role::Date, &self.date),
            (Role::ClockIn, &self.clock_in),
            (Role::ClockOut, &self.clock_out),
        ]
        .into_iter()
        .filter(|(_, column)| column.is_none())
        .map(|(role, _)| role)
        .collect()
    }

    /// Returns the mapping, or the roles that were not detected.
    pub fn into_mapping(self) -> Result<ColumnMapping, Vec<Role>> {
        let missing = self.missing_roles();
        self.complete().ok_or(missing)
    }

    /// Returns the mapping if every role was detected.
    pub fn complete(self) -> Option<ColumnMapping> {
        Some(ColumnMapping {
            name: self.name?,
            date: self.date?,
            clock_in: self.clock_in?,
            clock_out: self.clock_out?,
        })
    }
}

impl ColumnMapping {
    /// Guesses a mapping from column headers.
    ///
    /// For each role, keywords are tried in order and the first column whose
    /// lower-cased header contains the keyword is chosen.
    pub fn detect(columns: &[String]) -> DetectedMapping {
        let lowered: Vec<String> = columns.iter().map(|c| c.to_lowercase()).collect();
        let find = |role: Role| {
            role.keywords().iter().find_map(|keyword| {
                lowered
                    .iter()
                    .position(|column| column.contains(keyword))
                    .map(|i| columns[i].clone())
            })
        };

        DetectedMapping {
            name: find(Role::Name),
            date: find(Role::Date),
            clock_in: find(Role::ClockIn),
            clock_out: find(Role::ClockOut),
        }
    }

    /// Resolves the headers to column indices.
    ///
    /// # Errors
    ///
    /// Returns `MissingColumn` for the first role whose header is not in the
    /// dataset.
    pub fn resolve(&self, dataset: &Dataset) -> EngineResult<RoleAccessor> {
        let index = |role: Role, column: &str| {
            dataset
                .column_index(column)
                .ok_or_else(|| EngineError::MissingColumn {
                    role: role.to_string(),
                    column: column.to_string(),
                })
        };

        Ok(RoleAccessor {
            name: index(Role::Name, &self.name)?,
            date: index(Role::Date, &self.date)?,
            clock_in: index(Role::ClockIn, &self.clock_in)?,
            clock_out: index(Role::ClockOut, &self.clock_out)?,
        })
    }
}

/// Column indices for each role, resolved against one dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleAccessor {
    name: usize,
    date: usize,
    clock_in: usize,
    clock_out: usize,
}

impl RoleAccessor {
    /// Creates an accessor from raw indices.
    pub fn new(name: usize, date: usize, clock_in: usize, clock_out: usize) -> Self {
        Self {
            name,
            date,
            clock_in,
            clock_out,
        }
    }

    /// Returns the cell for a role.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the row is too short to hold the column;
    /// `row_number` is 1-based and only used in the message.
    pub fn cell<'a>(
        &self,
        row: &'a [RawCell],
        role: Role,
        row_number: usize,
    ) -> EngineResult<&'a RawCell> {
        let index = match role {
            Role::Name => self.name,
            Role::Date => self.date,
            Role::ClockIn => self.clock_in,
            Role::ClockOut => self.clock_out,
        };
        row.get(index).ok_or_else(|| EngineError::InvalidInput {
            message: format!(
                "row {} has {} cells but column {} ({}) was requested",
                row_number,
                row.len(),
                index + 1,
                role
            ),
        })
    }
}

/// Records read from a dataset, plus counts of rows that were dropped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractedRecords {
    /// Rows with a person and a readable date, in input order.
    pub records: Vec<AttendanceRecord>,
    /// Rows dropped because the date did not parse.
    pub unparsed_dates: usize,
    /// Rows dropped because the person cell was blank.
    pub missing_names: usize,
}

/// Reads every row into an [`AttendanceRecord`].
///
/// Rows whose date does not parse or whose person cell is blank are dropped
/// and counted. Clock cells are kept raw.
///
/// # Errors
///
/// Returns `InvalidInput` for a row too short for one of the mapped columns.
pub fn extract_records(dataset: &Dataset, accessor: &RoleAccessor) -> EngineResult<ExtractedRecords> {
    let mut extracted = ExtractedRecords::default();

    for (i, row) in dataset.rows.iter().enumerate() {
        let row_number = i + 1;
        let name_cell = accessor.cell(row, Role::Name, row_number)?;
        let date_cell = accessor.cell(row, Role::Date, row_number)?;
        let clock_in = accessor.cell(row, Role::ClockIn, row_number)?;
        let clock_out = accessor.cell(row, Role::ClockOut, row_number)?;

        let Some(person) = person_id(name_cell) else {
            debug!(row = row_number, "Dropping row without a person");
            extracted.missing_names += 1;
            continue;
        };
        let Some(date) = parse_date(date_cell) else {
            debug!(row = row_number, "Dropping row with unparseable date");
            extracted.unparsed_dates += 1;
            continue;
        };

        extracted.records.push(AttendanceRecord {
            person,
            date,
            clock_in: clock_in.clone(),
            clock_out: clock_out.clone(),
        });
    }

    Ok(extracted)
}

/// Normalizes a person cell: trimmed text, or a numeric employee number
/// without a trailing `.0`.
fn person_id(cell: &RawCell) -> Option<String> {
    if cell.is_blank() {
        return None;
    }
    match cell {
        RawCell::Text(_) => cell.as_text().map(str::to_string),
        RawCell::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => Some(format!("{}", *n as i64)),
        RawCell::Number(n) => Some(n.to_string()),
        RawCell::Empty => None,
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn row(cells: &[&str]) -> Vec<RawCell> {
        cells.iter().map(|c| RawCell::from(*c)).collect()
    }

    fn sample_dataset() -> Dataset {
        Dataset::new(
            headers(&["Name", "Date", "Clock In", "Clock Out"]),
            vec![
                row(&["Ayesha", "04/03/2024", "08:55", "17:02"]),
                row(&["", "04/03/2024", "09:00", "17:00"]),
                row(&["Bilal", "not a date", "09:00", "17:00"]),
                row(&["  Bilal ", "2024-03-05", "09:10", ""]),
            ],
        )
    }

    #[test]
    fn test_detect_standard_headers() {
        let detected = ColumnMapping::detect(&headers(&["Name", "Date", "Clock In", "Clock Out"]));
        let mapping = detected.complete().unwrap();
        assert_eq!(mapping.name, "Name");
        assert_eq!(mapping.date, "Date");
        assert_eq!(mapping.clock_in, "Clock In");
        assert_eq!(mapping.clock_out, "Clock Out");
    }

    #[test]
    fn test_detect_uses_keyword_priority() {
        // "date" outranks "time" even though the time column comes first
        let detected = ColumnMapping::detect(&headers(&[
            "User",
            "Login Time",
            "Work Date",
            "Logout",
        ]));
        assert_eq!(detected.name.as_deref(), Some("User"));
        assert_eq!(detected.date.as_deref(), Some("Work Date"));
        assert_eq!(detected.clock_in.as_deref(), Some("Login Time"));
        assert_eq!(detected.clock_out.as_deref(), Some("Logout"));
    }

    #[test]
    fn test_detect_reports_missing_roles() {
        let detected = ColumnMapping::detect(&headers(&["Employee", "Day"]));
        assert_eq!(detected.missing_roles(), vec![Role::ClockIn, Role::ClockOut]);
        assert!(detected.complete().is_none());
    }

    #[test]
    fn test_into_mapping_reports_missing_roles_or_mapping() {
        let partial = ColumnMapping::detect(&headers(&["Employee", "Day"]));
        assert_eq!(partial.into_mapping(), Err(vec![Role::ClockIn, Role::ClockOut]));

        let full = ColumnMapping::detect(&headers(&["Name", "Date", "Clock In", "Clock Out"]));
        let mapping = full.into_mapping().unwrap();
        assert_eq!(mapping.date, "Date");
        assert_eq!(mapping.clock_in, "Clock In");
    }

    #[test]
    fn test_resolve_missing_column_is_error() {
        let dataset = sample_dataset();
        let mapping = ColumnMapping {
            name: "Name".to_string(),
            date: "Date".to_string(),
            clock_in: "Time In".to_string(),
            clock_out: "Clock Out".to_string(),
        };

        match mapping.resolve(&dataset) {
            Err(EngineError::MissingColumn { role, column }) => {
                assert_eq!(role, "clock_in");
                assert_eq!(column, "Time In");
            }
            other => panic!("Expected MissingColumn, got {:?}", other),
        }
    }

    #[test]
    fn test_extract_drops_blank_names_and_bad_dates() {
        let dataset = sample_dataset();
        let accessor = RoleAccessor::new(0, 1, 2, 3);
        let extracted = extract_records(&dataset, &accessor).unwrap();

        assert_eq!(extracted.records.len(), 2);
        assert_eq!(extracted.missing_names, 1);
        assert_eq!(extracted.unparsed_dates, 1);

        assert_eq!(extracted.records[0].person, "Ayesha");
        assert_eq!(
            extracted.records[0].date,
            NaiveDate::from_ymd_opt(2024, 3, 4).unwrap()
        );
        assert_eq!(extracted.records[1].person, "Bilal");
        assert_eq!(extracted.records[1].clock_out, RawCell::from(""));
    }

    #[test]
    fn test_extract_short_row_is_fatal() {
        let dataset = Dataset::new(
            headers(&["Name", "Date", "Clock In", "Clock Out"]),
            vec![row(&["Ayesha", "2024-03-04", "09:00"])],
        );
        let accessor = RoleAccessor::new(0, 1, 2, 3);

        match extract_records(&dataset, &accessor) {
            Err(EngineError::InvalidInput { message }) => {
                assert!(message.contains("row 1"));
                assert!(message.contains("clock_out"));
            }
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_numeric_person_ids() {
        assert_eq!(person_id(&RawCell::Number(1024.0)).as_deref(), Some("1024"));
        assert_eq!(person_id(&RawCell::Number(10.5)).as_deref(), Some("10.5"));
        assert_eq!(person_id(&RawCell::from(" nan ")), None);
    }
}
