//! Configuration of the cron process
//!
//! Only the sections the sweeper needs are read, so the process starts
//! without mail or signing secrets.

use sl_shared::{ConfigError, DatabaseConfig, LoggingConfig, SweeperConfig, TimeConfig};

#[derive(Debug, Clone)]
pub struct CronConfig {
    pub database: DatabaseConfig,
    pub sweeper: SweeperConfig,
    pub time: TimeConfig,
    pub logging: LoggingConfig,
}

impl CronConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            database: DatabaseConfig::from_env()?,
            sweeper: SweeperConfig::from_env()?,
            time: TimeConfig::from_env()?,
            logging: LoggingConfig::from_env(),
        })
    }
}

/// How the process runs its jobs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Stay up and sweep on the daily schedule
    Scheduled,
    /// Sweep once and exit
    Once,
}

impl RunMode {
    pub fn from_args<I>(args: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        if args.into_iter().skip(1).any(|arg| arg == "--once") {
            RunMode::Once
        } else {
            RunMode::Scheduled
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_run_mode_from_args() {
        assert_eq!(RunMode::from_args(args(&["sl_cron"])), RunMode::Scheduled);
        assert_eq!(RunMode::from_args(args(&["sl_cron", "--once"])), RunMode::Once);
        // The program name is never treated as a flag
        assert_eq!(RunMode::from_args(args(&["--once"])), RunMode::Scheduled);
    }
}
