//! Core data models for the time-clock engine.
//!
//! This module contains all the domain models used throughout the engine.

mod date_range;
mod employee;
mod item;
mod punch;
mod timecard;

pub use date_range::DateRange;
pub use employee::{Employee, EmployeeStatus, UnknownStatus};
pub use item::{StockItem, StockStatus};
pub use punch::{PunchEvent, PunchType};
pub use timecard::{DailyReportEntry, PayrollEntry, PayrollReport, Timecard};
