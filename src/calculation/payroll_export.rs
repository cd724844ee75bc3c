//! Payroll report assembly.
//!
//! Turns per-employee timecards (or per-employee failures, when failures
//! are isolated) into payroll rows and a report with grand totals.

use std::collections::BTreeMap;
use std::str::FromStr;

use rust_decimal::Decimal;

use crate::models::{DateRange, PayrollEntry, PayrollReport, Timecard};

use super::timecard::{hours_from_ms, to_two_decimals};

/// Builds the payroll row for a computed timecard.
pub fn payroll_entry_from_timecard(timecard: Timecard) -> PayrollEntry {
    PayrollEntry {
        employee_id: timecard.employee.id,
        name: timecard.employee.name,
        pay_rate: timecard.employee.pay_rate,
        total_hours: timecard.total_hours,
        total_pay: timecard.total_pay,
        days: timecard.days,
        error: None,
    }
}

/// Builds a zero-valued payroll row carrying the failure message.
///
/// Takes the identifying fields rather than an
/// [`Employee`](crate::models::Employee), since the row may be for a record
/// whose status could not be mapped.
pub fn failed_payroll_entry(
    employee_id: &str,
    name: &str,
    pay_rate: Decimal,
    message: impl Into<String>,
) -> PayrollEntry {
    PayrollEntry {
        employee_id: employee_id.to_string(),
        name: name.to_string(),
        pay_rate,
        total_hours: to_two_decimals(hours_from_ms(0)),
        total_pay: to_two_decimals(Decimal::ZERO),
        days: BTreeMap::new(),
        error: Some(message.into()),
    }
}

/// Assembles the report, summing hours and pay across rows.
///
/// Grand totals add up the rows' already-rounded two-decimal figures, so
/// they match what a reader summing the report would get.
pub fn build_payroll_report(range: &DateRange, entries: Vec<PayrollEntry>) -> PayrollReport {
    let parse = |s: &str| Decimal::from_str(s).unwrap_or(Decimal::ZERO);

    let total_hours: Decimal = entries.iter().map(|e| parse(&e.total_hours)).sum();
    let total_pay: Decimal = entries.iter().map(|e| parse(&e.total_pay)).sum();
    let failed_count = entries.iter().filter(|e| e.error.is_some()).count();

    PayrollReport {
        start_date: range.start_date_string(),
        end_date: range.end_date_string(),
        entries,
        total_hours: to_two_decimals(total_hours),
        total_pay: to_two_decimals(total_pay),
        failed_count,
    }
}
