//! Attendance Engine for clock-in/clock-out records
//!
//! This crate classifies each person's working days against a calendar of
//! shift periods and holidays (present, late, early, no clock-out, absent,
//! suspicious), aggregates per-person counts, and shapes the results into
//! summary and detail report tables.

#![warn(missing_docs)]

pub mod analysis;
pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod report;
