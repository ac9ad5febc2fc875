//! Core data models for the Attendance Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod analysis_result;
mod date_range;
mod holiday;
mod outcome;
mod policy;
mod record;
mod shift_period;
mod summary;

pub use analysis_result::AnalysisResult;
pub use date_range::DateRange;
pub use holiday::{HOLIDAY_PARSE_WARNING, HolidaySet};
pub use outcome::{PersonDayOutcome, Severity, StatusTag};
pub use policy::{EarlyLeavePolicy, LEGACY_GRACE_MINUTES};
pub use record::{AttendanceRecord, RawCell};
pub use shift_period::ShiftPeriod;
pub use summary::PersonSummary;
