//! Daily schedule of the sweeper

use chrono::{DateTime, Duration, FixedOffset, NaiveTime, TimeZone};

use sl_shared::SweeperConfig;

/// When sweeps happen
#[derive(Debug, Clone)]
pub struct SweeperSchedule {
    /// Local time of day of the daily sweep
    pub run_at: NaiveTime,
    /// Interval of the counting loop, if enabled
    pub poll_interval: Option<std::time::Duration>,
}

impl Default for SweeperSchedule {
    fn default() -> Self {
        SweeperSchedule::from(&SweeperConfig::default())
    }
}

impl From<&SweeperConfig> for SweeperSchedule {
    fn from(config: &SweeperConfig) -> Self {
        Self {
            run_at: config.run_at,
            poll_interval: config.poll_interval_seconds.map(std::time::Duration::from_secs),
        }
    }
}

/// First occurrence of `run_at` strictly after `now`, in `now`'s zone
pub fn next_run_after(now: DateTime<FixedOffset>, run_at: NaiveTime) -> DateTime<FixedOffset> {
    let zone = *now.offset();
    let today = now.date_naive().and_time(run_at);

    // A fixed offset maps every local time to exactly one instant
    let candidate = zone
        .from_local_datetime(&today)
        .single()
        .unwrap_or_else(|| now + Duration::days(1));

    if candidate > now {
        candidate
    } else {
        candidate + Duration::days(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    fn singapore(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(8 * 3600)
            .unwrap()
            .with_ymd_and_hms(y, m, d, h, min, 0)
            .unwrap()
    }

    fn five_past_midnight() -> NaiveTime {
        NaiveTime::from_hms_opt(0, 5, 0).unwrap()
    }

    #[test]
    fn test_next_run_later_today() {
        let next = next_run_after(singapore(2024, 5, 1, 0, 1), five_past_midnight());
        assert_eq!(next, singapore(2024, 5, 1, 0, 5));
    }

    #[test]
    fn test_next_run_tomorrow_once_passed() {
        let next = next_run_after(singapore(2024, 5, 1, 13, 0), five_past_midnight());
        assert_eq!(next, singapore(2024, 5, 2, 0, 5));

        let at_run_time = next_run_after(singapore(2024, 5, 1, 0, 5), five_past_midnight());
        assert_eq!(at_run_time, singapore(2024, 5, 2, 0, 5));
    }

    #[test]
    fn test_run_time_is_local_to_the_zone() {
        let next = next_run_after(singapore(2024, 12, 31, 23, 0), five_past_midnight());
        assert_eq!(next, singapore(2025, 1, 1, 0, 5));
        // 00:05 in UTC+08:00 is 16:05 UTC the previous day
        assert_eq!(next.naive_utc().hour(), 16);
    }

    #[test]
    fn test_default_schedule() {
        let schedule = SweeperSchedule::default();
        assert_eq!(schedule.run_at, five_past_midnight());
        assert!(schedule.poll_interval.is_none());
    }
}
