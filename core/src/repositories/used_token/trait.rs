//! Repository trait for records of refresh tokens that have been rotated out.

use async_trait::async_trait;

use crate::domain::entities::token::UsedRefreshToken;
use crate::errors::DomainError;

/// Repository trait for the `usedRefreshToken` collection
///
/// # Security Considerations
/// - Only the SHA-256 digest of a token is stored
/// - Records are purged by the sweeper once their token has expired
#[async_trait]
pub trait UsedRefreshTokenRepository: Send + Sync {
    /// Whether a token with this `jti` has already been exchanged
    async fn exists(&self, token_id: &str) -> Result<bool, DomainError>;

    /// Record a rotated-out token
    ///
    /// # Returns
    /// * `Err(DomainError::Token(TokenError::AlreadyUsed))` - A record with the
    ///   same `token_id` already exists
    async fn insert(&self, record: UsedRefreshToken) -> Result<(), DomainError>;

    /// Delete every record with `expired_at_unix <= now_unix`
    ///
    /// # Returns
    /// * `Ok(u64)` - Number of records deleted
    async fn delete_expired(&self, now_unix: i64) -> Result<u64, DomainError>;

    /// Count records with `expired_at_unix <= now_unix` without deleting them
    async fn count_expired(&self, now_unix: i64) -> Result<u64, DomainError>;
}
