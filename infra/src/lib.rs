//! # Infrastructure Layer
//!
//! Concrete implementations of the core repository and delivery traits:
//! - **Database**: MongoDB collections `user`, `mail`, `usedRefreshToken`, `expense`
//! - **Cache**: Redis-backed revocation store
//! - **Mail**: SendGrid v3 dynamic-template sender
//!
//! Every store call is bounded by the configured store timeout and surfaces
//! as `DomainError::StoreTimeout` when it elapses. Nothing is retried.

pub mod cache;
pub mod database;
pub mod mail;
pub mod timeout;

pub use cache::{RedisClient, RedisRevocationStore};
pub use database::{
    MongoConnection, MongoExpenseRepository, MongoMailCodeRepository,
    MongoUsedRefreshTokenRepository, MongoUserRepository,
};
pub use mail::SendGridMailSender;
pub use timeout::with_timeout;

use sl_core::errors::DomainError;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// MongoDB driver error
    #[error("Database error: {0}")]
    Database(#[from] mongodb::error::Error),

    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// HTTP request error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Mail provider rejected a send
    #[error("Mail delivery error: {0}")]
    Mail(String),

    /// A store operation exceeded the configured bound
    #[error("Operation timed out: {0}")]
    Timeout(String),

    /// Stored value could not be mapped back to a domain type
    #[error("Mapping error: {0}")]
    Mapping(String),
}

impl From<InfrastructureError> for DomainError {
    fn from(err: InfrastructureError) -> Self {
        match err {
            InfrastructureError::Timeout(operation) => DomainError::StoreTimeout { operation },
            InfrastructureError::Database(e) => DomainError::StoreUnavailable {
                message: e.to_string(),
            },
            InfrastructureError::Cache(e) => DomainError::StoreUnavailable {
                message: e.to_string(),
            },
            InfrastructureError::Config(message) => DomainError::Configuration { message },
            other => DomainError::internal(other.to_string()),
        }
    }
}
