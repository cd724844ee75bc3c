//! Punch events recorded by the time clock.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The kind of clock punch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PunchType {
    /// Start of a shift.
    ClockIn,
    /// End of a shift.
    ClockOut,
    /// Start of the lunch break.
    LunchOut,
    /// End of the lunch break.
    LunchIn,
}

impl PunchType {
    /// Returns the wire representation of the punch type.
    pub fn as_str(&self) -> &'static str {
        match self {
            PunchType::ClockIn => "clock-in",
            PunchType::ClockOut => "clock-out",
            PunchType::LunchOut => "lunch-out",
            PunchType::LunchIn => "lunch-in",
        }
    }
}

/// An immutable, timestamped clock punch.
///
/// Punches reference the employee by id only, so they outlive the employee
/// record. Timestamps are wall-clock UTC at millisecond precision and are
/// serialized as epoch milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PunchEvent {
    /// Unique identifier of the punch.
    pub id: Uuid,
    /// The employee who punched.
    pub employee_id: String,
    /// What kind of punch this is.
    pub punch_type: PunchType,
    /// When the punch happened.
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
    /// The terminal or device the punch originated from, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_id: Option<String>,
}

impl PunchEvent {
    /// Creates a new punch with a fresh identifier.
    pub fn new(
        employee_id: impl Into<String>,
        punch_type: PunchType,
        timestamp: DateTime<Utc>,
        device_id: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            employee_id: employee_id.into(),
            punch_type,
            timestamp,
            device_id,
        }
    }

    /// The UTC calendar date the punch falls on.
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date_naive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_punch_type_serialization() {
        assert_eq!(
            serde_json::to_string(&PunchType::ClockIn).unwrap(),
            "\"clock-in\""
        );
        assert_eq!(
            serde_json::to_string(&PunchType::LunchOut).unwrap(),
            "\"lunch-out\""
        );
    }

    #[test]
    fn test_timestamp_serializes_as_epoch_millis() {
        let ts = Utc.timestamp_millis_opt(1_768_467_600_123).unwrap();
        let punch = PunchEvent::new("emp_001", PunchType::ClockIn, ts, None);

        let json = serde_json::to_value(&punch).unwrap();
        assert_eq!(json["timestamp"], 1_768_467_600_123_i64);
        assert_eq!(json["punch_type"], "clock-in");
        assert!(json.get("device_id").is_none());
    }

    #[test]
    fn test_date_uses_utc_day() {
        let ts = Utc.with_ymd_and_hms(2026, 1, 15, 23, 59, 59).unwrap();
        let punch = PunchEvent::new("emp_001", PunchType::ClockOut, ts, Some("kiosk-1".into()));
        assert_eq!(punch.date(), NaiveDate::from_ymd_opt(2026, 1, 15).unwrap());
    }
}
