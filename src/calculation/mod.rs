//! Calculation logic for the time-clock engine.
//!
//! This module contains the pure parts of the engine: the clock state
//! machine's transition table, per-day punch replay, timecard and pay
//! derivation, and payroll report assembly. Nothing here touches storage.

mod clock_transition;
mod day_replay;
mod payroll_export;
mod timecard;

pub use clock_transition::{
    ClockTransition, LABEL_CLOCKED_IN, LABEL_CLOCKED_OUT, LABEL_ENDED_LUNCH, LABEL_STARTED_LUNCH,
    needs_lookback, next_transition,
};
pub use day_replay::{DayReplayResult, replay_day};
pub use payroll_export::{build_payroll_report, failed_payroll_entry, payroll_entry_from_timecard};
pub use timecard::{MS_PER_HOUR, calculate_pay, calculate_timecard, hours_from_ms, to_two_decimals};
