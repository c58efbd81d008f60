//! Revocation ledger: blacklist markers that force logout
//!
//! A marker for (class, subject) is a unix timestamp; a token of that class
//! for that subject is rejected when its own expiry is earlier than the
//! marker. Markers live in the cache for exactly the class TTL.

use chrono::Duration;
use futures_util::future::BoxFuture;
use std::sync::Arc;
use tracing::info;

use crate::domain::entities::token::TokenClass;
use crate::errors::DomainError;
use crate::repositories::revocation::{RevocationEntry, RevocationStore};
use crate::services::clock::Clock;
use crate::services::token::TokenServiceConfig;

/// Writes and reads blacklist markers
pub struct RevocationLedger {
    store: Arc<dyn RevocationStore>,
    config: TokenServiceConfig,
    clock: Arc<dyn Clock>,
}

impl RevocationLedger {
    pub fn new(
        store: Arc<dyn RevocationStore>,
        config: TokenServiceConfig,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            config,
            clock,
        }
    }

    /// Whether a token expiring at `expires_at` predates the marker
    pub fn is_revoked(expires_at: i64, marker: Option<i64>) -> bool {
        matches!(marker, Some(marker) if expires_at < marker)
    }

    /// Revoke both classes for a subject in one atomic write
    pub async fn revoke(&self, subject: &str) -> Result<(), DomainError> {
        let entries = vec![
            self.entry(TokenClass::Access, subject)?,
            self.entry(TokenClass::Refresh, subject)?,
        ];

        self.store.set_all(entries).await?;
        info!(user_id = %subject, "revoked access and refresh tokens");
        Ok(())
    }

    /// Owned variant of `revoke` for use inside store transactions
    pub fn revoke_owned(self: &Arc<Self>, subject: String) -> BoxFuture<'static, Result<(), DomainError>> {
        let ledger = Arc::clone(self);
        Box::pin(async move { ledger.revoke(&subject).await })
    }

    /// Revoke a single class for a subject
    pub async fn revoke_class(&self, class: TokenClass, subject: &str) -> Result<(), DomainError> {
        let entry = self.entry(class, subject)?;
        self.store.set(entry).await?;
        info!(user_id = %subject, class = %class, "revoked tokens");
        Ok(())
    }

    /// Current marker for (class, subject); `None` when never revoked or the
    /// entry has aged out
    pub async fn lookup_class(
        &self,
        class: TokenClass,
        subject: &str,
    ) -> Result<Option<i64>, DomainError> {
        self.store.get(&class.blacklist_key(subject)).await
    }

    fn entry(&self, class: TokenClass, subject: &str) -> Result<RevocationEntry, DomainError> {
        // ttl_hours is bounded to 1..=MAX_TOKEN_TTL_HOURS
        let ttl_hours = self.config.ttl_hours(class)?;
        let marker = (self.clock.now() + Duration::hours(ttl_hours)).timestamp();
        let ttl_seconds = ttl_hours as u64 * 3600;

        Ok(RevocationEntry {
            key: class.blacklist_key(subject),
            marker,
            ttl_seconds,
        })
    }
}
