//! Environment-level configuration: logging and the reference time zone

use chrono::FixedOffset;

use super::{optional, parsed, ConfigError};

/// Offset of the reference zone (Asia/Singapore has no daylight saving)
pub const DEFAULT_UTC_OFFSET_HOURS: i32 = 8;

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive, e.g. `info` or `sl_core=debug`
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: String::from("info"),
        }
    }
}

impl LoggingConfig {
    pub fn from_env() -> Self {
        Self {
            filter: optional("RUST_LOG", "info"),
        }
    }
}

/// The single time zone every component reads "now" in
#[derive(Debug, Clone, Copy)]
pub struct TimeConfig {
    pub utc_offset_hours: i32,
}

impl Default for TimeConfig {
    fn default() -> Self {
        Self {
            utc_offset_hours: DEFAULT_UTC_OFFSET_HOURS,
        }
    }
}

impl TimeConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let utc_offset_hours = parsed("UTC_OFFSET_HOURS", DEFAULT_UTC_OFFSET_HOURS)?;
        let config = Self { utc_offset_hours };
        config.offset()?;
        Ok(config)
    }

    /// The configured zone as a chrono offset
    pub fn offset(&self) -> Result<FixedOffset, ConfigError> {
        FixedOffset::east_opt(self.utc_offset_hours * 3600).ok_or_else(|| ConfigError::Invalid {
            key: "UTC_OFFSET_HOURS".to_string(),
            reason: format!("{} is outside -23..=23", self.utc_offset_hours),
        })
    }
}
