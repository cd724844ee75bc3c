//! Where clock actions get their timestamps from.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, Duration, SubsecRound, Utc};

/// Supplies the current instant.
pub trait TimeSource: Send + Sync {
    /// The current instant, at millisecond precision.
    fn now(&self) -> DateTime<Utc>;
}

/// The system UTC clock, truncated to milliseconds.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now(&self) -> DateTime<Utc> {
        Utc::now().trunc_subsecs(3)
    }
}

/// A clock that only moves when told to.
///
/// # Example
///
/// ```
/// use chrono::{Duration, TimeZone, Utc};
/// use timeclock_engine::service::{ManualTimeSource, TimeSource};
///
/// let clock = ManualTimeSource::new(Utc.with_ymd_and_hms(2026, 1, 13, 9, 0, 0).unwrap());
/// clock.advance(Duration::hours(3));
/// assert_eq!(clock.now(), Utc.with_ymd_and_hms(2026, 1, 13, 12, 0, 0).unwrap());
/// ```
#[derive(Debug)]
pub struct ManualTimeSource {
    millis: AtomicI64,
}

impl ManualTimeSource {
    /// Creates a clock stopped at `start`.
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            millis: AtomicI64::new(start.timestamp_millis()),
        }
    }

    /// Moves the clock to `instant`.
    pub fn set(&self, instant: DateTime<Utc>) {
        self.millis
            .store(instant.timestamp_millis(), Ordering::SeqCst);
    }

    /// Moves the clock forward by `by`.
    pub fn advance(&self, by: Duration) {
        self.millis
            .fetch_add(by.num_milliseconds(), Ordering::SeqCst);
    }
}

impl TimeSource for ManualTimeSource {
    fn now(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(self.millis.load(Ordering::SeqCst)).unwrap_or_default()
    }
}
