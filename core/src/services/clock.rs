//! Time source shared by every component that reads "now"

use chrono::{DateTime, FixedOffset, Utc};

/// Clock reading the current time in one configured zone
pub trait Clock: Send + Sync {
    /// Current time in the reference zone
    fn now(&self) -> DateTime<FixedOffset>;

    /// The reference zone
    fn zone(&self) -> FixedOffset;

    fn now_utc(&self) -> DateTime<Utc> {
        self.now().with_timezone(&Utc)
    }

    fn now_unix(&self) -> i64 {
        self.now().timestamp()
    }
}

/// Wall clock
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    zone: FixedOffset,
}

impl SystemClock {
    pub fn new(zone: FixedOffset) -> Self {
        Self { zone }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Utc::now().with_timezone(&self.zone)
    }

    fn zone(&self) -> FixedOffset {
        self.zone
    }
}

#[cfg(any(test, feature = "testing"))]
pub use manual::ManualClock;

#[cfg(any(test, feature = "testing"))]
mod manual {
    use chrono::{DateTime, Duration, FixedOffset, TimeZone};
    use std::sync::Mutex;

    use super::Clock;

    /// Clock that only moves when told to
    #[derive(Debug)]
    pub struct ManualClock {
        now: Mutex<DateTime<FixedOffset>>,
    }

    impl ManualClock {
        pub fn new(start: DateTime<FixedOffset>) -> Self {
            Self {
                now: Mutex::new(start),
            }
        }

        /// Clock at a unix timestamp in UTC+08:00
        pub fn at_unix(seconds: i64) -> Self {
            let zone = FixedOffset::east_opt(8 * 3600).unwrap();
            Self::new(zone.timestamp_opt(seconds, 0).unwrap())
        }

        pub fn set(&self, to: DateTime<FixedOffset>) {
            *self.now.lock().unwrap() = to;
        }

        pub fn advance(&self, by: Duration) {
            let mut now = self.now.lock().unwrap();
            *now += by;
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> DateTime<FixedOffset> {
            *self.now.lock().unwrap()
        }

        fn zone(&self) -> FixedOffset {
            *self.now.lock().unwrap().offset()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_system_clock_reports_configured_zone() {
        let zone = FixedOffset::east_opt(8 * 3600).unwrap();
        let clock = SystemClock::new(zone);
        assert_eq!(clock.now().offset().local_minus_utc(), 8 * 3600);
        assert!((clock.now_unix() - Utc::now().timestamp()).abs() < 5);
    }

    #[test]
    fn test_manual_clock_advances() {
        let clock = ManualClock::at_unix(1_700_000_000);
        clock.advance(Duration::minutes(30));
        assert_eq!(clock.now_unix(), 1_700_000_000 + 1800);
        assert_eq!(clock.zone().local_minus_utc(), 8 * 3600);
    }
}
