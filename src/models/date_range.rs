//! Closed date ranges for timecard and payroll queries.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// A closed `[start, end]` range of UTC instants.
///
/// # Example
///
/// ```
/// use timeclock_engine::models::DateRange;
///
/// let range = DateRange::parse(Some("2026-01-12"), Some("2026-01-18")).unwrap();
/// assert_eq!(range.start_date_string(), "2026-01-12");
/// assert_eq!(range.end.to_rfc3339(), "2026-01-18T23:59:59.999+00:00");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// First instant included in the range.
    pub start: DateTime<Utc>,
    /// Last instant included in the range.
    pub end: DateTime<Utc>,
}

impl DateRange {
    /// Creates a range, rejecting one whose start is after its end.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> EngineResult<Self> {
        if start > end {
            return Err(EngineError::validation(
                "start_date",
                format!("start {} is after end {}", start, end),
            ));
        }
        Ok(Self { start, end })
    }

    /// Parses the boundary strings received from the HTTP layer.
    ///
    /// Each boundary is either a `YYYY-MM-DD` date or an RFC 3339 instant.
    /// A bare start date means the first millisecond of that day and a bare
    /// end date means its last millisecond, so both days are included.
    pub fn parse(start: Option<&str>, end: Option<&str>) -> EngineResult<Self> {
        let start = start
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| EngineError::validation("start_date", "is required"))?;
        let end = end
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| EngineError::validation("end_date", "is required"))?;

        let start = parse_boundary("start_date", start, NaiveTime::MIN)?;
        let end = parse_boundary("end_date", end, end_of_day())?;
        Self::new(start, end)
    }

    /// Whether the instant falls inside the range.
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.start && instant <= self.end
    }

    /// The start boundary as a calendar date string.
    pub fn start_date_string(&self) -> String {
        self.start.date_naive().to_string()
    }

    /// The end boundary as a calendar date string.
    pub fn end_date_string(&self) -> String {
        self.end.date_naive().to_string()
    }
}

fn end_of_day() -> NaiveTime {
    NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap_or(NaiveTime::MIN)
}

fn parse_boundary(field: &str, value: &str, time_of_day: NaiveTime) -> EngineResult<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(date.and_time(time_of_day).and_utc());
    }
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| {
            EngineError::validation(
                field,
                format!("'{}' is not a YYYY-MM-DD date or RFC 3339 timestamp", value),
            )
        })
}
