//! Shared utilities and common types for the Spendlog server
//!
//! This crate provides functionality used across all server crates:
//! - Configuration types loaded from the process environment
//! - The JSON error body returned by the API
//! - Validation helpers (email format, expense date-time strings)

pub mod config;
pub mod errors;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, CacheConfig, ConfigError, DatabaseConfig, EncryptionConfig,
    LoggingConfig, MailConfig, ServerConfig, SweeperConfig, TimeConfig,
};
pub use errors::{error_codes, ErrorResponse};
pub use utils::validation;
