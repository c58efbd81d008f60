//! Configuration module with business-specific sub-modules
//!
//! Every section is read from the process environment (after `.env` has been
//! loaded through `dotenvy`):
//! - `auth` - Token secrets, token TTLs and password hashing cost
//! - `cache` - Redis connection used by the revocation ledger
//! - `database` - MongoDB connection and store operation timeout
//! - `environment` - Logging filter and reference time zone
//! - `mail` - SendGrid credentials, templates and verification links
//! - `server` - HTTP bind address
//! - `sweeper` - Schedule of the expired refresh token sweeper

pub mod auth;
pub mod cache;
pub mod database;
pub mod environment;
pub mod mail;
pub mod server;
pub mod sweeper;

use thiserror::Error;

pub use auth::{parse_ttl_hours, AuthConfig, EncryptionConfig, MAX_TOKEN_TTL_HOURS};
pub use cache::CacheConfig;
pub use database::DatabaseConfig;
pub use environment::{LoggingConfig, TimeConfig};
pub use mail::MailConfig;
pub use server::ServerConfig;
pub use sweeper::SweeperConfig;

/// Errors raised while reading configuration
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(String),

    #[error("Invalid value for {key}: {reason}")]
    Invalid { key: String, reason: String },
}

/// Read a required variable
pub(crate) fn required(key: &str) -> Result<String, ConfigError> {
    std::env::var(key)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| ConfigError::Missing(key.to_string()))
}

/// Read an optional variable, falling back to `default`
pub(crate) fn optional(key: &str, default: &str) -> String {
    std::env::var(key)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Read and parse a variable, falling back to `default` when unset
pub(crate) fn parsed<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => raw.trim().parse::<T>().map_err(|e| {
            ConfigError::Invalid {
                key: key.to_string(),
                reason: e.to_string(),
            }
        }),
        _ => Ok(default),
    }
}

/// Complete configuration of the API server
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub cache: CacheConfig,
    pub auth: AuthConfig,
    pub encryption: EncryptionConfig,
    pub mail: MailConfig,
    pub time: TimeConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load every section from the environment
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let auth = AuthConfig::from_env()?;
        auth.validate()?;

        Ok(Self {
            server: ServerConfig::from_env()?,
            database: DatabaseConfig::from_env()?,
            cache: CacheConfig::from_env(),
            auth,
            encryption: EncryptionConfig::from_env()?,
            mail: MailConfig::from_env()?,
            time: TimeConfig::from_env()?,
            logging: LoggingConfig::from_env(),
        })
    }
}
