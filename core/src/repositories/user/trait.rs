//! User repository trait defining the interface for user persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures_util::future::BoxFuture;

use crate::domain::entities::token::TokenPair;
use crate::domain::entities::user::User;
use crate::errors::DomainError;

/// Cache write that must succeed before a document transaction commits
pub type RevocationWrite = BoxFuture<'static, Result<(), DomainError>>;

/// Document changes applied by a password reset
#[derive(Debug, Clone)]
pub struct PasswordResetWrite {
    pub email: String,
    pub password_hash: String,
    /// Consumed reset code record
    pub mail_id: String,
    pub updated_at: DateTime<Utc>,
}

/// Repository trait for User entity persistence operations
///
/// Implementations bound every operation by the configured store timeout and
/// report it as `DomainError::StoreTimeout`.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Count users registered with an email address
    async fn count_by_email(&self, email: &str) -> Result<u64, DomainError>;

    /// Find a user by email address
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No user registered with that email
    /// * `Err(DomainError)` - Store error occurred
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Find a user by subject id
    async fn find_by_id(&self, user_id: &str) -> Result<Option<User>, DomainError>;

    /// Insert a new user
    async fn insert(&self, user: User) -> Result<User, DomainError>;

    /// Upsert the last-issued token pair onto the record keyed by `user_id`
    ///
    /// # Arguments
    /// * `user_id` - Subject the pair was issued for
    /// * `pair` - The freshly issued tokens
    /// * `updated_at` - New `updated_at` value
    async fn update_tokens(
        &self,
        user_id: &str,
        pair: &TokenPair,
        updated_at: DateTime<Utc>,
    ) -> Result<(), DomainError>;

    /// Mark the email verified and delete the consumed verification record
    /// in one document transaction
    async fn mark_email_verified(
        &self,
        user_id: &str,
        mail_id: &str,
        updated_at: DateTime<Utc>,
    ) -> Result<(), DomainError>;

    /// Replace the password hash and delete the consumed reset record in one
    /// document transaction
    ///
    /// `revoke` runs concurrently with the document writes and is awaited
    /// before commit; when it fails the transaction is aborted and the error
    /// returned, leaving the password unchanged.
    ///
    /// The cache write is not rolled back. When the document writes or the
    /// commit fail after `revoke` succeeded, both markers stay set while the
    /// password is unchanged: outstanding sessions are logged out and the
    /// old password keeps working. A document write error takes precedence
    /// over a revocation error in the returned result.
    async fn reset_password(
        &self,
        reset: PasswordResetWrite,
        revoke: RevocationWrite,
    ) -> Result<(), DomainError>;
}
