//! Early-leave policy.
//!
//! Two rules for "left early" exist in the field: compare the clock-out against
//! the required check-out as is, or allow a grace margin first. The policy is
//! explicit configuration; nothing inherits either rule implicitly.

use chrono::{Duration, NaiveTime};
use serde::{Deserialize, Serialize};

/// The grace margin used by the legacy command-line tool.
pub const LEGACY_GRACE_MINUTES: u32 = 20;

/// How the required check-out is turned into the early-leave threshold.
///
/// # Example
///
/// ```
/// use attendance_engine::models::EarlyLeavePolicy;
/// use chrono::NaiveTime;
///
/// let required = NaiveTime::from_hms_opt(17, 0, 0).unwrap();
///
/// assert_eq!(EarlyLeavePolicy::Strict.threshold(required), required);
/// assert_eq!(
///     EarlyLeavePolicy::Grace { minutes: 20 }.threshold(required),
///     NaiveTime::from_hms_opt(16, 40, 0).unwrap()
/// );
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum EarlyLeavePolicy {
    /// Any clock-out before the required check-out is early.
    #[default]
    Strict,
    /// Clock-outs within `minutes` of the required check-out are tolerated.
    Grace {
        /// Size of the grace margin.
        minutes: u32,
    },
}

impl EarlyLeavePolicy {
    /// Returns the time a clock-out must not be earlier than.
    ///
    /// The grace subtraction saturates at midnight rather than wrapping into
    /// the previous day.
    pub fn threshold(self, required_out: NaiveTime) -> NaiveTime {
        match self {
            EarlyLeavePolicy::Strict => required_out,
            EarlyLeavePolicy::Grace { minutes } => {
                let (shifted, wrapped) =
                    required_out.overflowing_sub_signed(Duration::minutes(i64::from(minutes)));
                if wrapped != 0 { NaiveTime::MIN } else { shifted }
            }
        }
    }
}
