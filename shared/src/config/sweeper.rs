//! Schedule of the expired refresh token sweeper

use chrono::NaiveTime;

use super::{optional, ConfigError};

/// When the sweeper runs
#[derive(Debug, Clone)]
pub struct SweeperConfig {
    /// Local time of day (in the reference zone) of the daily run
    pub run_at: NaiveTime,

    /// When set, additionally count pending records at this interval
    pub poll_interval_seconds: Option<u64>,
}

impl Default for SweeperConfig {
    fn default() -> Self {
        Self {
            run_at: NaiveTime::from_hms_opt(0, 5, 0).unwrap_or_default(),
            poll_interval_seconds: None,
        }
    }
}

impl SweeperConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let raw_run_at = optional("SWEEPER_RUN_AT", "00:05");
        let run_at = NaiveTime::parse_from_str(&raw_run_at, "%H:%M").map_err(|e| {
            ConfigError::Invalid {
                key: "SWEEPER_RUN_AT".to_string(),
                reason: e.to_string(),
            }
        })?;

        let poll_interval_seconds = match std::env::var("SWEEPER_POLL_INTERVAL_SECONDS") {
            Ok(raw) if !raw.trim().is_empty() => {
                let seconds = raw.trim().parse::<u64>().map_err(|e| ConfigError::Invalid {
                    key: "SWEEPER_POLL_INTERVAL_SECONDS".to_string(),
                    reason: e.to_string(),
                })?;
                (seconds > 0).then_some(seconds)
            }
            _ => None,
        };

        Ok(Self {
            run_at,
            poll_interval_seconds,
        })
    }
}
