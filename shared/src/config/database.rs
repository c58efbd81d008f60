//! Database configuration module

use std::time::Duration;

use super::{optional, parsed, ConfigError};

/// Default bound on every store operation
pub const DEFAULT_STORE_TIMEOUT_SECONDS: u64 = 60;

/// MongoDB configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// MongoDB connection string
    pub uri: String,

    /// Database holding the user, mail, expense and used refresh token collections
    pub database: String,

    /// Timeout applied to each store operation, in seconds
    pub timeout_seconds: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            uri: String::from("mongodb://localhost:27017"),
            database: String::from("spendlog"),
            timeout_seconds: DEFAULT_STORE_TIMEOUT_SECONDS,
        }
    }
}

impl DatabaseConfig {
    /// Create from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            uri: optional("MONGODB_URI", "mongodb://localhost:27017"),
            database: optional("MONGODB_DATABASE", "spendlog"),
            timeout_seconds: parsed("STORE_TIMEOUT_SECONDS", DEFAULT_STORE_TIMEOUT_SECONDS)?,
        })
    }

    /// Store operation timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}
