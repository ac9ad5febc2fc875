//! Status classification for a single person-day.
//!
//! The classifier is a pure function of the two clock values and the two
//! required times. It is shared by the on-screen statistics and the printed
//! detail reports, so both always agree.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::models::{Severity, StatusTag};

/// The tags and severity assigned to one person-day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    /// Status tags in display order (never empty).
    pub tags: Vec<StatusTag>,
    /// The severity tier derived from the tags.
    pub severity: Severity,
}

/// Classifies a person-day.
///
/// # Arguments
///
/// * `clock_in` - The parsed clock-in, if any
/// * `clock_out` - The parsed clock-out, if any
/// * `required_in` - The latest check-in that is not late
/// * `required_out` - The earliest check-out that is not early. The caller
///   resolves the Friday value and applies the early-leave policy before
///   passing it in.
///
/// # Rules
///
/// 1. No clock-in and no clock-out: `Absent`, major.
/// 2. Clock-out without clock-in: `Suspicious (No In)`, major.
/// 3. Otherwise, independently: `Late` if in after `required_in`; `Early`
///    if out before `required_out`; `No Out` if there is no clock-out.
///    `Present` is added unless `Late` or `Early` was.
///
/// Severity is minor when any of `Late`, `Early`, `No Out` is present and
/// normal otherwise.
///
/// # Example
///
/// ```
/// use attendance_engine::analysis::classify;
/// use attendance_engine::models::{Severity, StatusTag};
/// use chrono::NaiveTime;
///
/// let t = |h, m| NaiveTime::from_hms_opt(h, m, 0);
///
/// let result = classify(t(9, 15), t(17, 0), t(9, 0).unwrap(), t(17, 0).unwrap());
/// assert_eq!(result.tags, vec![StatusTag::Late]);
/// assert_eq!(result.severity, Severity::Minor);
///
/// let result = classify(None, None, t(9, 0).unwrap(), t(17, 0).unwrap());
/// assert_eq!(result.tags, vec![StatusTag::Absent]);
/// assert_eq!(result.severity, Severity::Major);
/// ```
pub fn classify(
    clock_in: Option<NaiveTime>,
    clock_out: Option<NaiveTime>,
    required_in: NaiveTime,
    required_out: NaiveTime,
) -> Classification {
    let Some(clock_in) = clock_in else {
        let tag = if clock_out.is_some() {
            StatusTag::SuspiciousNoIn
        } else {
            StatusTag::Absent
        };
        return Classification {
            tags: vec![tag],
            severity: Severity::Major,
        };
    };

    let late = clock_in > required_in;
    let early = clock_out.is_some_and(|out| out < required_out);
    let no_out = clock_out.is_none();

    let mut tags = Vec::with_capacity(3);
    if !late && !early {
        tags.push(StatusTag::Present);
    }
    if late {
        tags.push(StatusTag::Late);
    }
    if early {
        tags.push(StatusTag::Early);
    }
    if no_out {
        tags.push(StatusTag::NoOut);
    }

    let severity = if late || early || no_out {
        Severity::Minor
    } else {
        Severity::Normal
    };

    Classification { tags, severity }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;
    use proptest::prelude::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_absent_when_no_clocks() {
        let result = classify(None, None, t(9, 0), t(17, 0));
        assert_eq!(result.tags, vec![StatusTag::Absent]);
        assert_eq!(result.severity, Severity::Major);
    }

    #[test]
    fn test_suspicious_when_only_clock_out() {
        let result = classify(None, Some(t(12, 0)), t(9, 0), t(17, 0));
        assert_eq!(result.tags, vec![StatusTag::SuspiciousNoIn]);
        assert_eq!(result.severity, Severity::Major);
    }

    #[test]
    fn test_on_time_is_present_normal() {
        let result = classify(Some(t(8, 55)), Some(t(17, 5)), t(9, 0), t(17, 0));
        assert_eq!(result.tags, vec![StatusTag::Present]);
        assert_eq!(result.severity, Severity::Normal);
    }

    #[test]
    fn test_exact_required_times_are_not_late_or_early() {
        let result = classify(Some(t(9, 0)), Some(t(17, 0)), t(9, 0), t(17, 0));
        assert_eq!(result.tags, vec![StatusTag::Present]);
    }

    #[test]
    fn test_late_only() {
        let result = classify(Some(t(9, 1)), Some(t(17, 0)), t(9, 0), t(17, 0));
        assert_eq!(result.tags, vec![StatusTag::Late]);
        assert_eq!(result.severity, Severity::Minor);
    }

    #[test]
    fn test_early_only() {
        let result = classify(Some(t(9, 0)), Some(t(16, 59)), t(9, 0), t(17, 0));
        assert_eq!(result.tags, vec![StatusTag::Early]);
        assert_eq!(result.severity, Severity::Minor);
    }

    #[test]
    fn test_late_and_early() {
        let result = classify(Some(t(10, 0)), Some(t(15, 0)), t(9, 0), t(17, 0));
        assert_eq!(result.tags, vec![StatusTag::Late, StatusTag::Early]);
        assert_eq!(result.severity, Severity::Minor);
    }

    #[test]
    fn test_on_time_without_clock_out_is_present_and_no_out() {
        let result = classify(Some(t(8, 50)), None, t(9, 0), t(17, 0));
        assert_eq!(result.tags, vec![StatusTag::Present, StatusTag::NoOut]);
        assert_eq!(result.severity, Severity::Minor);
    }

    #[test]
    fn test_late_without_clock_out() {
        let result = classify(Some(t(9, 30)), None, t(9, 0), t(17, 0));
        assert_eq!(result.tags, vec![StatusTag::Late, StatusTag::NoOut]);
        assert_eq!(result.severity, Severity::Minor);
    }

    fn any_time() -> impl Strategy<Value = NaiveTime> {
        (0u32..86_400).prop_map(|secs| NaiveTime::from_num_seconds_from_midnight_opt(secs, 0).unwrap())
    }

    proptest! {
        #[test]
        fn prop_classify_is_total_and_deterministic(
            clock_in in proptest::option::of(any_time()),
            clock_out in proptest::option::of(any_time()),
            required_in in any_time(),
            required_out in any_time(),
        ) {
            let first = classify(clock_in, clock_out, required_in, required_out);
            let second = classify(clock_in, clock_out, required_in, required_out);
            prop_assert!(!first.tags.is_empty());
            prop_assert_eq!(&first, &second);
        }

        #[test]
        fn prop_no_clocks_is_always_absent(required_in in any_time(), required_out in any_time()) {
            let result = classify(None, None, required_in, required_out);
            prop_assert_eq!(result.tags, vec![StatusTag::Absent]);
            prop_assert_eq!(result.severity, Severity::Major);
        }

        #[test]
        fn prop_out_without_in_is_always_suspicious(
            clock_out in any_time(),
            required_in in any_time(),
            required_out in any_time(),
        ) {
            let result = classify(None, Some(clock_out), required_in, required_out);
            prop_assert_eq!(result.tags, vec![StatusTag::SuspiciousNoIn]);
            prop_assert_eq!(result.severity, Severity::Major);
        }

        #[test]
        fn prop_on_time_without_out_is_present_no_out(
            required_in in any_time(),
            before in 0u32..86_400,
            required_out in any_time(),
        ) {
            let secs = before.min(required_in.num_seconds_from_midnight());
            let clock_in = NaiveTime::from_num_seconds_from_midnight_opt(secs, 0).unwrap();
            let result = classify(Some(clock_in), None, required_in, required_out);
            prop_assert_eq!(result.tags, vec![StatusTag::Present, StatusTag::NoOut]);
        }

        #[test]
        fn prop_severity_matches_tags(
            clock_in in proptest::option::of(any_time()),
            clock_out in proptest::option::of(any_time()),
            required_in in any_time(),
            required_out in any_time(),
        ) {
            let result = classify(clock_in, clock_out, required_in, required_out);
            let major = result.tags.iter().any(|t| matches!(t, StatusTag::Absent | StatusTag::SuspiciousNoIn));
            let minor = result.tags.iter().any(|t| matches!(t, StatusTag::Late | StatusTag::Early | StatusTag::NoOut));
            let expected = if major {
                Severity::Major
            } else if minor {
                Severity::Minor
            } else {
                Severity::Normal
            };
            prop_assert_eq!(result.severity, expected);
        }
    }
}
