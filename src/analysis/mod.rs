//! Analysis logic for the Attendance Engine.
//!
//! This module contains clock-time and date parsing, the shift calendar,
//! status classification, column-role binding for tabular input, the
//! aggregation pipeline and its background runner.

mod classifier;
mod date_parser;
mod input;
mod pipeline;
mod runner;
mod shift_calendar;
mod time_parser;

pub use classifier::{Classification, classify};
pub use date_parser::parse_date;
pub use input::{
    ColumnMapping, Dataset, DetectedMapping, ExtractedRecords, Role, RoleAccessor,
    extract_records,
};
pub use pipeline::{
    AnalysisJob, NoopObserver, RunObserver, aggregate, classify_person_day,
};
pub use runner::{AnalysisHandle, RunFailure, RunOutcome, spawn_analysis};
pub use shift_calendar::{NON_WORKING_WEEKDAY, ShiftCalendar};
pub use time_parser::{TIME_FORMATS, parse_time};
