//! Mail code repository trait for emailed verification and reset codes.

use async_trait::async_trait;

use crate::domain::entities::mail::{MailCode, MailType};
use crate::errors::DomainError;

/// Repository trait for MailCode persistence operations
#[async_trait]
pub trait MailCodeRepository: Send + Sync {
    /// Find the code record for an (email, type) pair
    async fn find(&self, email: &str, mail_type: MailType)
        -> Result<Option<MailCode>, DomainError>;

    /// Insert a code or, when one already exists for the (email, type) pair,
    /// replace its code, `updated_at` and `expires_at`
    ///
    /// # Returns
    /// * `Ok(MailCode)` - The stored record (keeps the existing `mail_id`)
    async fn upsert(&self, code: MailCode) -> Result<MailCode, DomainError>;
}
