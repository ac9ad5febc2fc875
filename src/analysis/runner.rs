//! Background execution of an [`AnalysisJob`].
//!
//! The job runs on Tokio's blocking pool. The caller gets three one-way
//! channels back: log lines, progress percentages and a single completion
//! message carrying either the result or a [`RunFailure`].

use std::any::Any;

use serde::Serialize;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tracing::{error, info};

use crate::error::EngineError;
use crate::models::AnalysisResult;

use super::pipeline::{AnalysisJob, RunObserver};

/// The terminal failure of a background run.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{message}")]
pub struct RunFailure {
    /// A one-line description for the operator.
    pub message: String,
    /// Diagnostic detail: the run context followed by the error's debug form,
    /// or by the panic payload.
    pub trace: Vec<String>,
}

impl RunFailure {
    /// Builds a failure from an engine error.
    pub fn from_error(err: &EngineError, context: &str) -> Self {
        Self {
            message: err.to_string(),
            trace: vec![context.to_string(), format!("{:?}", err)],
        }
    }

    fn from_panic(payload: Box<dyn Any + Send>, context: &str) -> Self {
        let detail = panic_message(payload.as_ref());
        Self {
            message: format!("Analysis worker panicked: {}", detail),
            trace: vec![context.to_string(), detail],
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

/// What a finished run sends on the completion channel.
pub type RunOutcome = Result<AnalysisResult, RunFailure>;

/// The receiving ends of a background run.
#[derive(Debug)]
pub struct AnalysisHandle {
    /// Log lines, in the order they were produced.
    pub logs: mpsc::UnboundedReceiver<String>,
    /// Progress percentages, never decreasing.
    pub progress: mpsc::UnboundedReceiver<u8>,
    /// Exactly one message when the run ends.
    pub completion: oneshot::Receiver<RunOutcome>,
}

impl AnalysisHandle {
    /// Waits for the run to finish.
    ///
    /// Log and progress messages stay buffered in their channels and can
    /// still be drained afterwards.
    pub async fn wait(&mut self) -> RunOutcome {
        match (&mut self.completion).await {
            Ok(outcome) => outcome,
            Err(_) => Err(RunFailure {
                message: "Analysis worker exited without reporting".to_string(),
                trace: Vec::new(),
            }),
        }
    }

    /// Takes every log line received so far.
    pub fn drain_logs(&mut self) -> Vec<String> {
        let mut lines = Vec::new();
        while let Ok(line) = self.logs.try_recv() {
            lines.push(line);
        }
        lines
    }
}

struct ChannelObserver {
    logs: mpsc::UnboundedSender<String>,
    progress: mpsc::UnboundedSender<u8>,
}

impl RunObserver for ChannelObserver {
    fn log(&mut self, message: &str) {
        // a closed receiver only means nobody is listening
        let _ = self.logs.send(message.to_string());
    }

    fn progress(&mut self, percent: u8) {
        let _ = self.progress.send(percent);
    }
}

/// Starts a job in the background and returns its channels.
///
/// Must be called from within a Tokio runtime.
///
/// # Example
///
/// ```no_run
/// use attendance_engine::analysis::{spawn_analysis, AnalysisJob};
///
/// # async fn example(job: AnalysisJob) {
/// let mut handle = spawn_analysis(job);
/// match handle.wait().await {
///     Ok(result) => println!("{} persons", result.summaries.len()),
///     Err(failure) => eprintln!("{}", failure),
/// }
/// # }
/// ```
pub fn spawn_analysis(job: AnalysisJob) -> AnalysisHandle {
    let (log_tx, logs) = mpsc::unbounded_channel();
    let (progress_tx, progress) = mpsc::unbounded_channel();
    let (done_tx, completion) = oneshot::channel();

    tokio::spawn(async move {
        let rows = job.dataset.rows.len();
        let context = format!("analysis of {} rows", rows);
        let worker = tokio::task::spawn_blocking(move || {
            let mut observer = ChannelObserver {
                logs: log_tx,
                progress: progress_tx,
            };
            job.run(&mut observer)
        });

        let outcome = match worker.await {
            Ok(Ok(result)) => {
                info!(run_id = %result.run_id, duration_us = result.duration_us, "Background analysis finished");
                Ok(result)
            }
            Ok(Err(err)) => {
                error!(error = %err, rows, "Background analysis failed");
                Err(RunFailure::from_error(&err, &context))
            }
            Err(join_err) if join_err.is_panic() => {
                let failure = RunFailure::from_panic(join_err.into_panic(), &context);
                error!(error = %failure, rows, "Background analysis panicked");
                Err(failure)
            }
            Err(join_err) => {
                error!(error = %join_err, rows, "Background analysis was cancelled");
                Err(RunFailure {
                    message: format!("Analysis worker was cancelled: {}", join_err),
                    trace: vec![context],
                })
            }
        };

        let _ = done_tx.send(outcome);
    });

    AnalysisHandle {
        logs,
        progress,
        completion,
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveTime};

    use super::*;
    use crate::analysis::{ColumnMapping, Dataset, ShiftCalendar};
    use crate::models::{EarlyLeavePolicy, HolidaySet, RawCell, ShiftPeriod};

    fn job(clock_in_header: &str) -> AnalysisJob {
        let monday = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
        let period = ShiftPeriod::new(
            monday,
            monday,
            NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(13, 0, 0).unwrap(),
        )
        .unwrap();

        AnalysisJob {
            dataset: Dataset::new(
                vec![
                    "Name".to_string(),
                    "Date".to_string(),
                    "In".to_string(),
                    "Out".to_string(),
                ],
                vec![vec![
                    RawCell::from("Ayesha"),
                    RawCell::from("2024-03-04"),
                    RawCell::from("09:15"),
                    RawCell::from("17:00"),
                ]],
            ),
            mapping: ColumnMapping {
                name: "Name".to_string(),
                date: "Date".to_string(),
                clock_in: clock_in_header.to_string(),
                clock_out: "Out".to_string(),
            },
            calendar: ShiftCalendar::new(vec![period], HolidaySet::new()).unwrap(),
            early_leave: EarlyLeavePolicy::Strict,
            warnings: Vec::new(),
        }
    }

    #[tokio::test]
    async fn test_successful_run_reports_on_all_channels() {
        let mut handle = spawn_analysis(job("In"));

        let result = handle.wait().await.unwrap();
        assert_eq!(result.summary_for("Ayesha").unwrap().late, 1);

        let logs = handle.drain_logs();
        assert!(logs.iter().any(|l| l == "Found 1 unique employees."));
        assert_eq!(logs.last().map(String::as_str), Some("Analysis complete."));

        let mut progress = Vec::new();
        while let Ok(p) = handle.progress.try_recv() {
            progress.push(p);
        }
        assert_eq!(progress, vec![100]);
    }

    #[tokio::test]
    async fn test_failed_run_sends_failure_without_result() {
        let mut handle = spawn_analysis(job("Clock In"));

        let failure = handle.wait().await.unwrap_err();
        assert!(failure.message.contains("Clock In"));
        assert_eq!(failure.trace[0], "analysis of 1 rows");
        assert!(failure.trace[1].contains("MissingColumn"));
    }

    #[test]
    fn test_panic_message_from_payloads() {
        let text: Box<dyn Any + Send> = Box::new("boom");
        assert_eq!(panic_message(text.as_ref()), "boom");

        let owned: Box<dyn Any + Send> = Box::new(String::from("bad row"));
        assert_eq!(panic_message(owned.as_ref()), "bad row");

        let other: Box<dyn Any + Send> = Box::new(42u32);
        assert_eq!(panic_message(other.as_ref()), "unknown panic payload");
    }

    #[test]
    fn test_failure_from_error_is_context_then_debug_form() {
        let err = EngineError::InvalidInput {
            message: "row 2 has 1 cells".to_string(),
        };

        let failure = RunFailure::from_error(&err, "analysis of 2 rows");

        assert_eq!(failure.message, "Invalid input: row 2 has 1 cells");
        assert_eq!(failure.trace, vec!["analysis of 2 rows".to_string(), format!("{:?}", err)]);
    }

    #[test]
    fn test_failure_from_panic_payload() {
        let failure = RunFailure::from_panic(Box::new("index out of bounds"), "analysis of 3 rows");
        assert_eq!(failure.message, "Analysis worker panicked: index out of bounds");
        assert_eq!(failure.trace, vec!["analysis of 3 rows", "index out of bounds"]);
    }
}
