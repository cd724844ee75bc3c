//! Timecard and payroll report models.
//!
//! These are derived views: they are recomputed from the punch log on every
//! request and never persisted.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Employee, PunchEvent};

/// One calendar day of a timecard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyReportEntry {
    /// The UTC calendar date.
    pub date: NaiveDate,
    /// The day's punches in ascending timestamp order.
    pub punches: Vec<PunchEvent>,
    /// Worked duration in milliseconds.
    pub worked_ms: i64,
    /// Lunch duration in milliseconds.
    pub lunch_ms: i64,
    /// Worked hours as a two-decimal string.
    pub worked_hours: String,
    /// Lunch hours as a two-decimal string.
    pub lunch_hours: String,
}

/// Worked time and pay for one employee over a closed date range.
///
/// `total_worked_ms` always equals the sum of `days[..].worked_ms`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Timecard {
    /// Snapshot of the employee at computation time.
    pub employee: Employee,
    /// First day of the range (`YYYY-MM-DD`).
    pub start_date: String,
    /// Last day of the range (`YYYY-MM-DD`).
    pub end_date: String,
    /// Per-day breakdown, ordered by date.
    pub days: BTreeMap<NaiveDate, DailyReportEntry>,
    /// Total worked duration in milliseconds.
    pub total_worked_ms: i64,
    /// Total worked hours as a two-decimal string.
    pub total_hours: String,
    /// Total pay as a two-decimal string.
    pub total_pay: String,
}

/// One row of the payroll export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollEntry {
    /// Employee identifier.
    pub employee_id: String,
    /// Employee display name.
    pub name: String,
    /// Hourly pay rate.
    pub pay_rate: Decimal,
    /// Worked hours as a two-decimal string.
    pub total_hours: String,
    /// Pay as a two-decimal string.
    pub total_pay: String,
    /// Per-day breakdown.
    pub days: BTreeMap<NaiveDate, DailyReportEntry>,
    /// Set when the row could not be computed and failures are isolated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Payroll across all employees for one shared range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollReport {
    /// First day of the range (`YYYY-MM-DD`).
    pub start_date: String,
    /// Last day of the range (`YYYY-MM-DD`).
    pub end_date: String,
    /// One entry per employee, in store enumeration order.
    pub entries: Vec<PayrollEntry>,
    /// Sum of all rows' hours.
    pub total_hours: String,
    /// Sum of all rows' pay.
    pub total_pay: String,
    /// Number of rows that carry an error.
    pub failed_count: usize,
}
