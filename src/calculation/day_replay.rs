//! Per-day punch replay.
//!
//! This module turns one calendar day's punches into worked and lunch
//! durations by scanning them in timestamp order with two cursors: the
//! start of the current work segment and the start of the current lunch.

use chrono::{DateTime, Utc};

use crate::models::{PunchEvent, PunchType};

/// Durations accumulated while replaying one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DayReplayResult {
    /// Worked milliseconds from closed work segments.
    pub worked_ms: i64,
    /// Lunch milliseconds from closed lunch segments.
    pub lunch_ms: i64,
    /// Start of a work segment still open after the last punch.
    pub open_since: Option<DateTime<Utc>>,
}

/// Replays a day's punches, which must be sorted by ascending timestamp.
///
/// - `clock-in` sets the work cursor.
/// - `lunch-out` adds the time since the work cursor, if set, and sets the
///   lunch cursor.
/// - `lunch-in` adds the time since the lunch cursor, if set, to lunch and
///   sets the work cursor.
/// - `clock-out` adds the time since the work cursor, if set.
///
/// A punch whose cursor was never set adds nothing, so a day that starts
/// mid-shift is under-counted rather than rejected. Cursors are only ever
/// overwritten, never cleared: a second `clock-out` after one `clock-in`
/// counts again from that `clock-in`.
///
/// # Example
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use timeclock_engine::calculation::replay_day;
/// use timeclock_engine::models::{PunchEvent, PunchType};
///
/// let at = |h| Utc.with_ymd_and_hms(2026, 1, 15, h, 0, 0).unwrap();
/// let punches = vec![
///     PunchEvent::new("emp_001", PunchType::ClockIn, at(9), None),
///     PunchEvent::new("emp_001", PunchType::LunchOut, at(12), None),
///     PunchEvent::new("emp_001", PunchType::LunchIn, at(13), None),
///     PunchEvent::new("emp_001", PunchType::ClockOut, at(17), None),
/// ];
///
/// let result = replay_day(&punches);
/// assert_eq!(result.worked_ms, 7 * 3_600_000);
/// assert_eq!(result.lunch_ms, 3_600_000);
/// assert!(result.open_since.is_none());
/// ```
pub fn replay_day(punches: &[PunchEvent]) -> DayReplayResult {
    let mut result = DayReplayResult::default();
    let mut clock_in_time: Option<DateTime<Utc>> = None;
    let mut lunch_out_time: Option<DateTime<Utc>> = None;
    // Tracks whether the last work-affecting punch left a segment open.
    let mut open_since: Option<DateTime<Utc>> = None;

    for punch in punches {
        let ts = punch.timestamp;
        match punch.punch_type {
            PunchType::ClockIn => {
                clock_in_time = Some(ts);
                open_since = Some(ts);
            }
            PunchType::LunchOut => {
                if let Some(start) = clock_in_time {
                    result.worked_ms += (ts - start).num_milliseconds();
                }
                lunch_out_time = Some(ts);
                open_since = None;
            }
            PunchType::LunchIn => {
                if let Some(start) = lunch_out_time {
                    result.lunch_ms += (ts - start).num_milliseconds();
                }
                clock_in_time = Some(ts);
                open_since = Some(ts);
            }
            PunchType::ClockOut => {
                if let Some(start) = clock_in_time {
                    result.worked_ms += (ts - start).num_milliseconds();
                }
                open_since = None;
            }
        }
    }

    result.open_since = open_since;
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const HOUR_MS: i64 = 3_600_000;

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 15, h, m, 0).unwrap()
    }

    fn punch(punch_type: PunchType, h: u32, m: u32) -> PunchEvent {
        PunchEvent::new("emp_001", punch_type, at(h, m), None)
    }

    #[test]
    fn test_full_day_with_lunch() {
        let punches = vec![
            punch(PunchType::ClockIn, 9, 0),
            punch(PunchType::LunchOut, 12, 0),
            punch(PunchType::LunchIn, 13, 0),
            punch(PunchType::ClockOut, 17, 0),
        ];

        let result = replay_day(&punches);
        // 09-12 and 13-17; the lunch hour is excluded
        assert_eq!(result.worked_ms, 7 * HOUR_MS);
        assert_eq!(result.lunch_ms, HOUR_MS);
        assert_eq!(result.open_since, None);
    }

    #[test]
    fn test_clock_in_only_earns_nothing() {
        let result = replay_day(&[punch(PunchType::ClockIn, 9, 0)]);
        assert_eq!(result.worked_ms, 0);
        assert_eq!(result.open_since, Some(at(9, 0)));
    }

    #[test]
    fn test_day_starting_mid_lunch_skips_lunch_in() {
        // Range began while the employee was at lunch.
        let punches = vec![
            punch(PunchType::LunchIn, 13, 0),
            punch(PunchType::ClockOut, 17, 30),
        ];

        let result = replay_day(&punches);
        assert_eq!(result.lunch_ms, 0);
        assert_eq!(result.worked_ms, 4 * HOUR_MS + 30 * 60_000);
    }

    #[test]
    fn test_orphan_clock_out_is_skipped() {
        let result = replay_day(&[punch(PunchType::ClockOut, 17, 0)]);
        assert_eq!(result, DayReplayResult::default());
    }

    #[test]
    fn test_open_lunch_is_not_counted() {
        let punches = vec![
            punch(PunchType::ClockIn, 9, 0),
            punch(PunchType::LunchOut, 12, 0),
        ];

        let result = replay_day(&punches);
        assert_eq!(result.worked_ms, 3 * HOUR_MS);
        assert_eq!(result.lunch_ms, 0);
        assert_eq!(result.open_since, None);
    }

    #[test]
    fn test_repeated_clock_out_counts_from_same_clock_in() {
        let punches = vec![
            punch(PunchType::ClockIn, 9, 0),
            punch(PunchType::ClockOut, 11, 0),
            punch(PunchType::ClockOut, 12, 0),
        ];

        let result = replay_day(&punches);
        assert_eq!(result.worked_ms, 2 * HOUR_MS + 3 * HOUR_MS);
        assert_eq!(result.open_since, None);
    }

    #[test]
    fn test_clock_out_without_lunch_in_reuses_clock_in() {
        let punches = vec![
            punch(PunchType::ClockIn, 9, 0),
            punch(PunchType::LunchOut, 12, 0),
            punch(PunchType::ClockOut, 17, 0),
        ];

        let result = replay_day(&punches);
        assert_eq!(result.worked_ms, 3 * HOUR_MS + 8 * HOUR_MS);
        assert_eq!(result.lunch_ms, 0);
        assert_eq!(result.open_since, None);
    }

    #[test]
    fn test_lunch_in_reopens_segment() {
        let punches = vec![
            punch(PunchType::ClockIn, 9, 0),
            punch(PunchType::LunchOut, 12, 0),
            punch(PunchType::LunchIn, 12, 45),
        ];

        let result = replay_day(&punches);
        assert_eq!(result.worked_ms, 3 * HOUR_MS);
        assert_eq!(result.lunch_ms, 45 * 60_000);
        assert_eq!(result.open_since, Some(at(12, 45)));
    }

    #[test]
    fn test_split_shift_sums_both_segments() {
        let punches = vec![
            punch(PunchType::ClockIn, 6, 0),
            punch(PunchType::ClockOut, 10, 0),
            punch(PunchType::ClockIn, 14, 0),
            punch(PunchType::LunchOut, 16, 0),
            punch(PunchType::LunchIn, 16, 30),
            punch(PunchType::ClockOut, 19, 0),
        ];

        let result = replay_day(&punches);
        assert_eq!(result.worked_ms, 8 * HOUR_MS + 30 * 60_000);
        assert_eq!(result.lunch_ms, 30 * 60_000);
    }

    #[test]
    fn test_empty_day() {
        assert_eq!(replay_day(&[]), DayReplayResult::default());
    }
}
