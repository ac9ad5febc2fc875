//! The aggregation pass: every (person, working date) pair, classified and
//! folded into per-person counters.

use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use std::time::Instant;

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::EngineResult;
use crate::models::{
    AnalysisResult, AttendanceRecord, EarlyLeavePolicy, PersonDayOutcome, PersonSummary,
    ShiftPeriod,
};

use super::classifier::classify;
use super::input::{extract_records, ColumnMapping, Dataset};
use super::shift_calendar::ShiftCalendar;
use super::time_parser::parse_time;

/// Receives human-readable log lines and progress updates during a run.
///
/// Both methods default to doing nothing, so an observer only implements
/// what it displays.
pub trait RunObserver {
    /// A log line for the operator.
    fn log(&mut self, _message: &str) {}

    /// Percentage of persons processed so far (0-100, never decreasing).
    fn progress(&mut self, _percent: u8) {}
}

/// An observer that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl RunObserver for NoopObserver {}

/// Everything one analysis run needs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisJob {
    /// The tabular input.
    pub dataset: Dataset,
    /// Which column holds which role.
    pub mapping: ColumnMapping,
    /// Shift periods and holidays.
    pub calendar: ShiftCalendar,
    /// How early departures are judged.
    #[serde(default)]
    pub early_leave: EarlyLeavePolicy,
    /// Warnings raised while preparing the job (e.g. a bad holiday list).
    /// They are replayed to the observer and copied into the result.
    #[serde(default)]
    pub warnings: Vec<String>,
}

impl AnalysisJob {
    /// Runs the job: binds columns, reads records, then aggregates.
    ///
    /// # Errors
    ///
    /// Returns `MissingColumn` if a mapped header does not exist, or
    /// `InvalidInput` if a row is too short for a mapped column. No partial
    /// result is produced.
    pub fn run(&self, observer: &mut dyn RunObserver) -> EngineResult<AnalysisResult> {
        observer.log("Initializing data processing...");
        for warning in &self.warnings {
            observer.log(warning);
        }

        let accessor = self.mapping.resolve(&self.dataset)?;
        observer.log("Parsing date column...");
        let extracted = extract_records(&self.dataset, &accessor)?;

        if extracted.unparsed_dates > 0 {
            observer.log(&format!(
                "Skipped {} rows with an unreadable date.",
                extracted.unparsed_dates
            ));
        }
        if extracted.missing_names > 0 {
            observer.log(&format!(
                "Skipped {} rows without a name.",
                extracted.missing_names
            ));
        }

        let mut result = aggregate(&extracted.records, &self.calendar, self.early_leave, observer);
        let mut warnings = self.warnings.clone();
        warnings.append(&mut result.warnings);
        result.warnings = warnings;
        Ok(result)
    }
}

/// Classifies one person-day against its governing period.
///
/// The required check-out is the Friday value on Fridays, then relaxed by
/// the early-leave policy.
pub fn classify_person_day(
    person: &str,
    date: NaiveDate,
    period: &ShiftPeriod,
    record: Option<&AttendanceRecord>,
    early_leave: EarlyLeavePolicy,
) -> PersonDayOutcome {
    let clock_in = record.and_then(|r| parse_time(&r.clock_in));
    let clock_out = record.and_then(|r| parse_time(&r.clock_out));
    let required_out = early_leave.threshold(period.required_check_out(date));
    let classification = classify(clock_in, clock_out, period.check_in, required_out);

    PersonDayOutcome {
        person: person.to_string(),
        date,
        clock_in,
        clock_out,
        tags: classification.tags,
        severity: classification.severity,
    }
}

/// Aggregates records over the calendar's governed range.
///
/// Records outside the governed range are ignored. Persons are processed in
/// order of first appearance among the remaining records; when a person has
/// several records for one date the first one is used. Every working day
/// with a governing period yields exactly one outcome per person, `Absent`
/// when there is no record.
///
/// # Example
///
/// ```
/// use attendance_engine::analysis::{aggregate, NoopObserver, ShiftCalendar};
/// use attendance_engine::models::{AttendanceRecord, EarlyLeavePolicy, HolidaySet, ShiftPeriod};
/// use chrono::{NaiveDate, NaiveTime};
///
/// let monday = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
/// let period = ShiftPeriod::new(
///     monday,
///     monday,
///     NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
///     NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
///     NaiveTime::from_hms_opt(13, 0, 0).unwrap(),
/// )
/// .unwrap();
/// let calendar = ShiftCalendar::new(vec![period], HolidaySet::new()).unwrap();
/// let records = vec![AttendanceRecord::new("Ayesha", monday, "09:15", "17:00")];
///
/// let result = aggregate(&records, &calendar, EarlyLeavePolicy::Strict, &mut NoopObserver);
/// let summary = result.summary_for("Ayesha").unwrap();
/// assert_eq!((summary.present, summary.late), (1, 1));
/// ```
pub fn aggregate(
    records: &[AttendanceRecord],
    calendar: &ShiftCalendar,
    early_leave: EarlyLeavePolicy,
    observer: &mut dyn RunObserver,
) -> AnalysisResult {
    let started = Instant::now();
    let run_id = Uuid::new_v4();
    info!(run_id = %run_id, records = records.len(), "Starting attendance analysis");

    let mut result = AnalysisResult {
        run_id,
        timestamp: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        governed_range: calendar.governed_range(),
        early_leave,
        summaries: Vec::new(),
        outcomes: Vec::new(),
        warnings: Vec::new(),
        duration_us: 0,
    };

    let Some(range) = result.governed_range else {
        warn!(run_id = %run_id, "No shift periods configured");
        let message = "No shift periods configured; nothing to analyze.".to_string();
        observer.log(&message);
        result.warnings.push(message);
        observer.progress(100);
        result.duration_us = started.elapsed().as_micros() as u64;
        result.timestamp = Utc::now();
        return result;
    };

    let mut persons: Vec<&str> = Vec::new();
    let mut seen = HashSet::new();
    let mut by_person_day: HashMap<(&str, NaiveDate), &AttendanceRecord> = HashMap::new();
    let mut duplicates = 0usize;

    for record in records.iter().filter(|r| range.contains(r.date)) {
        let person = record.person.as_str();
        if seen.insert(person) {
            persons.push(person);
        }
        match by_person_day.entry((person, record.date)) {
            Entry::Vacant(slot) => {
                slot.insert(record);
            }
            Entry::Occupied(_) => {
                duplicates += 1;
                debug!(run_id = %run_id, person = person, date = %record.date, "Ignoring duplicate record");
            }
        }
    }

    if duplicates > 0 {
        debug!(run_id = %run_id, duplicates, "Duplicate person-day records ignored");
    }

    info!(run_id = %run_id, persons = persons.len(), "Found unique persons");
    observer.log(&format!("Found {} unique employees.", persons.len()));

    let working_days: Vec<(NaiveDate, &ShiftPeriod)> = calendar.working_days().collect();
    let total = persons.len();

    for (done, person) in persons.iter().enumerate() {
        let mut summary = PersonSummary::new(*person);
        for (date, period) in &working_days {
            let record = by_person_day.get(&(*person, *date)).copied();
            let outcome = classify_person_day(person, *date, period, record, early_leave);
            summary.record(&outcome);
            result.outcomes.push(outcome);
        }
        debug!(run_id = %run_id, person = person, absent = summary.absent, late = summary.late, "Person aggregated");
        result.summaries.push(summary);
        observer.progress(percent(done + 1, total));
    }

    if total == 0 {
        observer.progress(100);
    }

    result.duration_us = started.elapsed().as_micros() as u64;
    result.timestamp = Utc::now();
    info!(
        run_id = %run_id,
        persons = total,
        outcomes = result.outcomes.len(),
        duration_us = result.duration_us,
        "Attendance analysis complete"
    );
    observer.log("Analysis complete.");

    result
}

fn percent(done: usize, total: usize) -> u8 {
    // done <= total, so the quotient is at most 100
    (done * 100 / total.max(1)).min(100) as u8
}
