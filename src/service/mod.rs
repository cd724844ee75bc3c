//! Time-clock operations over the persistence ports.
//!
//! [`ClockService`] owns the clock state machine, timecard and payroll
//! computation, and employee administration. Clock actions for the same
//! employee are serialized through [`EmployeeLocks`]; timestamps come from
//! a [`TimeSource`].

mod clock_service;
mod employee_locks;
mod time_source;

pub use clock_service::{ClockActionResult, ClockService};
pub use employee_locks::EmployeeLocks;
pub use time_source::{ManualTimeSource, SystemTimeSource, TimeSource};
