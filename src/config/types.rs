//! Configuration types for attendance analysis.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files or from the `rules` object
//! of an API request.

use serde::{Deserialize, Serialize};

use crate::analysis::ShiftCalendar;
use crate::error::EngineResult;
use crate::models::{EarlyLeavePolicy, HolidaySet, ShiftPeriod};
use crate::report::HighlightThresholds;

/// Contents of `calendar.yaml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CalendarConfig {
    /// Shift periods in lookup order; the first one containing a date wins.
    #[serde(default)]
    pub shift_periods: Vec<ShiftPeriod>,
    /// Comma-separated ISO dates.
    #[serde(default)]
    pub holidays: String,
}

/// Contents of `policy.yaml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PolicyConfig {
    /// How early departures are judged.
    #[serde(default)]
    pub early_leave: EarlyLeavePolicy,
    /// Summary-table highlight thresholds.
    #[serde(default)]
    pub report: HighlightThresholds,
}

/// The full rule set for a run, in its unvalidated form.
///
/// # Example
///
/// ```
/// use attendance_engine::config::RulesConfig;
///
/// let rules: RulesConfig = serde_json::from_str(r#"{
///     "shift_periods": [{
///         "start": "2024-03-01",
///         "end": "2024-03-31",
///         "check_in": "09:00",
///         "check_out": "17:00",
///         "friday_check_out": "13:00"
///     }],
///     "holidays": "2024-03-23",
///     "early_leave": { "mode": "grace", "minutes": 20 }
/// }"#).unwrap();
///
/// let resolved = rules.resolve().unwrap();
/// assert_eq!(resolved.calendar.periods().len(), 1);
/// assert_eq!(resolved.calendar.holidays().len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulesConfig {
    /// Shift periods in lookup order.
    #[serde(default)]
    pub shift_periods: Vec<ShiftPeriod>,
    /// Comma-separated ISO dates.
    #[serde(default)]
    pub holidays: String,
    /// How early departures are judged.
    #[serde(default)]
    pub early_leave: EarlyLeavePolicy,
    /// Summary-table highlight thresholds.
    #[serde(default)]
    pub report: HighlightThresholds,
}

impl RulesConfig {
    /// Combines the two configuration files.
    pub fn from_files(calendar: CalendarConfig, policy: PolicyConfig) -> Self {
        Self {
            shift_periods: calendar.shift_periods,
            holidays: calendar.holidays,
            early_leave: policy.early_leave,
            report: policy.report,
        }
    }

    /// Validates the periods and parses the holiday list.
    ///
    /// An unreadable holiday list is not an error: it becomes an empty set
    /// and a warning in [`ResolvedRules::warnings`].
    ///
    /// # Errors
    ///
    /// Returns `InvalidShiftPeriod` if a period ends before it starts.
    pub fn resolve(&self) -> EngineResult<ResolvedRules> {
        let (holidays, warning) = HolidaySet::parse_list(&self.holidays);
        let calendar = ShiftCalendar::new(self.shift_periods.clone(), holidays)?;

        Ok(ResolvedRules {
            calendar,
            early_leave: self.early_leave,
            thresholds: self.report,
            warnings: warning.into_iter().collect(),
        })
    }
}

/// A validated rule set ready to run against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRules {
    /// Shift periods and holidays.
    pub calendar: ShiftCalendar,
    /// How early departures are judged.
    pub early_leave: EarlyLeavePolicy,
    /// Summary-table highlight thresholds.
    pub thresholds: HighlightThresholds,
    /// Warnings raised while resolving.
    pub warnings: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use crate::models::HOLIDAY_PARSE_WARNING;

    const CALENDAR_YAML: &str = r#"
shift_periods:
  - start: 2024-03-01
    end: 2024-03-15
    check_in: "08:00"
    check_out: "16:00"
    friday_check_out: "12:30"
  - start: 2024-03-16
    end: 2024-03-31
    check_in: "09:00:00"
    check_out: "17:00:00"
    friday_check_out: "13:00:00"
holidays: "2024-03-23, 2024-03-25"
"#;

    #[test]
    fn test_calendar_yaml_parses_both_time_forms() {
        let calendar: CalendarConfig = serde_yaml::from_str(CALENDAR_YAML).unwrap();
        assert_eq!(calendar.shift_periods.len(), 2);
        assert_eq!(calendar.shift_periods[0].friday_check_out.to_string(), "12:30:00");
        assert_eq!(calendar.shift_periods[1].check_in.to_string(), "09:00:00");
    }

    #[test]
    fn test_policy_yaml_defaults() {
        let policy: PolicyConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(policy.early_leave, EarlyLeavePolicy::Strict);
        assert_eq!(policy.report, HighlightThresholds::default());

        let policy: PolicyConfig =
            serde_yaml::from_str("early_leave:\n  mode: grace\n  minutes: 20\n").unwrap();
        assert_eq!(policy.early_leave, EarlyLeavePolicy::Grace { minutes: 20 });
    }

    #[test]
    fn test_resolve_builds_calendar() {
        let calendar: CalendarConfig = serde_yaml::from_str(CALENDAR_YAML).unwrap();
        let rules = RulesConfig::from_files(calendar, PolicyConfig::default());
        let resolved = rules.resolve().unwrap();

        assert_eq!(resolved.calendar.periods().len(), 2);
        assert_eq!(resolved.calendar.holidays().len(), 2);
        assert!(resolved.warnings.is_empty());
    }

    #[test]
    fn test_resolve_bad_holidays_warns_and_continues() {
        let rules = RulesConfig {
            holidays: "2024-03-23, next tuesday".to_string(),
            ..RulesConfig::default()
        };
        let resolved = rules.resolve().unwrap();

        assert!(resolved.calendar.holidays().is_empty());
        assert_eq!(resolved.warnings, vec![HOLIDAY_PARSE_WARNING.to_string()]);
    }

    #[test]
    fn test_resolve_rejects_reversed_period() {
        let yaml = r#"
shift_periods:
  - start: 2024-03-31
    end: 2024-03-01
    check_in: "08:00"
    check_out: "16:00"
    friday_check_out: "12:30"
"#;
        let calendar: CalendarConfig = serde_yaml::from_str(yaml).unwrap();
        let result = RulesConfig::from_files(calendar, PolicyConfig::default()).resolve();
        assert!(matches!(
            result,
            Err(EngineError::InvalidShiftPeriod { index: 1, .. })
        ));
    }
}
