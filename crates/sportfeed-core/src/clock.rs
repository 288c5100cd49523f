//! Wall-clock source and Eastern-time rendering.
//!
//! Daily files roll over at midnight in New York, so every date and
//! timestamp written by the collector is rendered in `America/New_York`.

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use chrono_tz::Tz;
use parking_lot::Mutex;
use std::sync::Arc;

/// Timezone used for file dates and stored timestamps.
pub const EASTERN: Tz = chrono_tz::America::New_York;

/// Source of the current time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    /// Current time in US Eastern time.
    fn eastern_now(&self) -> DateTime<Tz> {
        self.now().with_timezone(&EASTERN)
    }
}

/// Shared handle to a clock.
pub type SharedClock = Arc<dyn Clock>;

/// `Clock` backed by the system time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Manually driven clock for tests and replays.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(at: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(at),
        }
    }

    pub fn set(&self, at: DateTime<Utc>) {
        *self.now.lock() = at;
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock();
        *now += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock()
    }
}

/// `YYYY-MM-DD` suffix used in daily file names.
pub fn file_date_suffix(at: &DateTime<Tz>) -> String {
    at.format("%Y-%m-%d").to_string()
}

/// RFC 3339 timestamp with microseconds and the Eastern offset.
pub fn iso_timestamp(at: &DateTime<Tz>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_eastern_date_lags_utc_after_midnight() {
        // 03:30 UTC on Jan 2 is still Jan 1 in New York (UTC-5).
        let clock = ManualClock::new(Utc.with_ymd_and_hms(2025, 1, 2, 3, 30, 0).unwrap());
        assert_eq!(file_date_suffix(&clock.eastern_now()), "2025-01-01");

        clock.advance(Duration::hours(2));
        assert_eq!(file_date_suffix(&clock.eastern_now()), "2025-01-02");
    }

    #[test]
    fn test_daylight_saving_offset() {
        // July: EDT is UTC-4.
        let clock = ManualClock::new(Utc.with_ymd_and_hms(2025, 7, 1, 3, 59, 0).unwrap());
        assert_eq!(file_date_suffix(&clock.eastern_now()), "2025-06-30");

        clock.set(Utc.with_ymd_and_hms(2025, 7, 1, 4, 0, 0).unwrap());
        assert_eq!(file_date_suffix(&clock.eastern_now()), "2025-07-01");
    }

    #[test]
    fn test_iso_timestamp_format() {
        let clock = ManualClock::new(Utc.with_ymd_and_hms(2025, 1, 15, 17, 0, 0).unwrap());
        assert_eq!(
            iso_timestamp(&clock.eastern_now()),
            "2025-01-15T12:00:00.000000-05:00"
        );
    }
}
