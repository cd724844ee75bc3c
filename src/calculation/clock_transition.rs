//! Clock state machine transitions.
//!
//! The status register only distinguishes `inactive`, `working` and
//! `on-lunch`. `working` is reached both by clocking in and by returning
//! from lunch, so the transition out of `working` looks back one punch:
//! after a `lunch-in` the next action clocks out, otherwise it starts lunch.

use crate::models::{EmployeeStatus, PunchType};

/// Label returned after a clock-in.
pub const LABEL_CLOCKED_IN: &str = "Clocked In";
/// Label returned after a clock-out.
pub const LABEL_CLOCKED_OUT: &str = "Clocked Out";
/// Label returned after a lunch-out.
pub const LABEL_STARTED_LUNCH: &str = "Started Lunch";
/// Label returned after a lunch-in.
pub const LABEL_ENDED_LUNCH: &str = "Ended Lunch";

/// The outcome of one clock action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockTransition {
    /// Status the employee moves to.
    pub next_status: EmployeeStatus,
    /// Punch to append to the log.
    pub punch_type: PunchType,
    /// Human-readable label for the new status.
    pub label: &'static str,
}

/// Decides the next transition from the current status and, for `working`,
/// the type of the employee's most recent punch.
///
/// # Examples
///
/// ```
/// use timeclock_engine::calculation::next_transition;
/// use timeclock_engine::models::{EmployeeStatus, PunchType};
///
/// let t = next_transition(EmployeeStatus::Working, Some(PunchType::LunchIn));
/// assert_eq!(t.next_status, EmployeeStatus::Inactive);
/// assert_eq!(t.punch_type, PunchType::ClockOut);
/// assert_eq!(t.label, "Clocked Out");
///
/// let t = next_transition(EmployeeStatus::Working, Some(PunchType::ClockIn));
/// assert_eq!(t.punch_type, PunchType::LunchOut);
/// ```
pub fn next_transition(
    status: EmployeeStatus,
    last_punch_type: Option<PunchType>,
) -> ClockTransition {
    match (status, last_punch_type) {
        (EmployeeStatus::Inactive, _) => ClockTransition {
            next_status: EmployeeStatus::Working,
            punch_type: PunchType::ClockIn,
            label: LABEL_CLOCKED_IN,
        },
        (EmployeeStatus::Working, Some(PunchType::LunchIn)) => ClockTransition {
            next_status: EmployeeStatus::Inactive,
            punch_type: PunchType::ClockOut,
            label: LABEL_CLOCKED_OUT,
        },
        (EmployeeStatus::Working, _) => ClockTransition {
            next_status: EmployeeStatus::OnLunch,
            punch_type: PunchType::LunchOut,
            label: LABEL_STARTED_LUNCH,
        },
        (EmployeeStatus::OnLunch, _) => ClockTransition {
            next_status: EmployeeStatus::Working,
            punch_type: PunchType::LunchIn,
            label: LABEL_ENDED_LUNCH,
        },
    }
}

/// Whether deciding a transition from this status needs the last punch.
pub fn needs_lookback(status: EmployeeStatus) -> bool {
    status == EmployeeStatus::Working
}
