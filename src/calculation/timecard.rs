//! Timecard calculation.
//!
//! This module groups an employee's punches by UTC calendar day, replays
//! each day, and derives total worked hours and pay over the range.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::config::UnterminatedShiftPolicy;
use crate::models::{DailyReportEntry, DateRange, Employee, PunchEvent, Timecard};

use super::day_replay::replay_day;

/// Milliseconds in one hour.
pub const MS_PER_HOUR: i64 = 3_600_000;

/// Converts a millisecond duration into fractional hours.
pub fn hours_from_ms(ms: i64) -> Decimal {
    Decimal::from(ms) / Decimal::from(MS_PER_HOUR)
}

/// Rounds to two decimal places (midpoint away from zero) and renders
/// with exactly two fractional digits.
///
/// ```
/// use rust_decimal::Decimal;
/// use timeclock_engine::calculation::to_two_decimals;
///
/// assert_eq!(to_two_decimals(Decimal::new(200, 0)), "200.00");
/// assert_eq!(to_two_decimals(Decimal::new(12345, 3)), "12.35");
/// ```
pub fn to_two_decimals(value: Decimal) -> String {
    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded.to_string()
}

/// Pay for a worked duration, rounded to cents.
pub fn calculate_pay(worked_ms: i64, pay_rate: Decimal) -> Decimal {
    (hours_from_ms(worked_ms) * pay_rate)
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Builds the timecard for one employee from their punches.
///
/// Punches outside `range` are ignored; the rest are grouped by the UTC day
/// of their timestamp and replayed in ascending order. Under
/// [`UnterminatedShiftPolicy::CreditToRangeEnd`] a work segment still open
/// at the end of a day is credited up to the earliest of the next midnight,
/// `range.end` and `as_of`.
///
/// # Example
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use rust_decimal::Decimal;
/// use timeclock_engine::calculation::calculate_timecard;
/// use timeclock_engine::config::UnterminatedShiftPolicy;
/// use timeclock_engine::models::{DateRange, Employee, PunchEvent, PunchType};
///
/// let employee = Employee::new("emp_001", "Dana", Decimal::new(2500, 2));
/// let at = |h| Utc.with_ymd_and_hms(2026, 1, 15, h, 0, 0).unwrap();
/// let punches = vec![
///     PunchEvent::new("emp_001", PunchType::ClockIn, at(9), None),
///     PunchEvent::new("emp_001", PunchType::LunchOut, at(12), None),
///     PunchEvent::new("emp_001", PunchType::LunchIn, at(13), None),
///     PunchEvent::new("emp_001", PunchType::ClockOut, at(18), None),
/// ];
/// let range = DateRange::parse(Some("2026-01-12"), Some("2026-01-18")).unwrap();
///
/// let timecard = calculate_timecard(
///     &employee, &punches, &range, UnterminatedShiftPolicy::Drop, Utc::now(),
/// );
/// assert_eq!(timecard.total_hours, "8.00");
/// assert_eq!(timecard.total_pay, "200.00");
/// ```
pub fn calculate_timecard(
    employee: &Employee,
    punches: &[PunchEvent],
    range: &DateRange,
    policy: UnterminatedShiftPolicy,
    as_of: DateTime<Utc>,
) -> Timecard {
    let mut by_day: BTreeMap<NaiveDate, Vec<PunchEvent>> = BTreeMap::new();
    for punch in punches.iter().filter(|p| range.contains(p.timestamp)) {
        by_day.entry(punch.date()).or_default().push(punch.clone());
    }

    let mut days = BTreeMap::new();
    let mut total_worked_ms = 0;

    for (date, mut day_punches) in by_day {
        day_punches.sort_by_key(|p| p.timestamp);
        let replay = replay_day(&day_punches);

        let mut worked_ms = replay.worked_ms;
        if let (UnterminatedShiftPolicy::CreditToRangeEnd, Some(open_since)) =
            (policy, replay.open_since)
        {
            let cutoff = next_midnight(date).min(range.end).min(as_of);
            if cutoff > open_since {
                worked_ms += (cutoff - open_since).num_milliseconds();
            }
        }

        total_worked_ms += worked_ms;
        days.insert(
            date,
            DailyReportEntry {
                date,
                punches: day_punches,
                worked_ms,
                lunch_ms: replay.lunch_ms,
                worked_hours: to_two_decimals(hours_from_ms(worked_ms)),
                lunch_hours: to_two_decimals(hours_from_ms(replay.lunch_ms)),
            },
        );
    }

    let total_pay = calculate_pay(total_worked_ms, employee.pay_rate);

    Timecard {
        employee: employee.clone(),
        start_date: range.start_date_string(),
        end_date: range.end_date_string(),
        days,
        total_worked_ms,
        total_hours: to_two_decimals(hours_from_ms(total_worked_ms)),
        total_pay: to_two_decimals(total_pay),
    }
}

fn next_midnight(date: NaiveDate) -> DateTime<Utc> {
    date.succ_opt()
        .unwrap_or(date)
        .and_time(NaiveTime::MIN)
        .and_utc()
}
