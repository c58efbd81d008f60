//! MongoDB implementation of the UsedRefreshTokenRepository trait.

use async_trait::async_trait;
use mongodb::bson::{doc, Document};
use mongodb::Collection;
use tracing::{debug, warn};

use sl_core::domain::entities::UsedRefreshToken;
use sl_core::errors::{DomainError, TokenError};
use sl_core::repositories::UsedRefreshTokenRepository;

use super::is_duplicate_key;
use crate::database::connection::{MongoConnection, USED_REFRESH_TOKEN_COLLECTION};
use crate::database::documents::UsedRefreshTokenDocument;
use crate::timeout::with_timeout;

/// MongoDB implementation of UsedRefreshTokenRepository
///
/// `token_id` carries a unique index, so a concurrent second exchange of the
/// same refresh token fails on insert even when both passed the existence check.
pub struct MongoUsedRefreshTokenRepository {
    connection: MongoConnection,
    records: Collection<UsedRefreshTokenDocument>,
}

impl MongoUsedRefreshTokenRepository {
    pub fn new(connection: MongoConnection) -> Self {
        Self {
            records: connection.collection(USED_REFRESH_TOKEN_COLLECTION),
            connection,
        }
    }
}

/// Records whose token has expired at `now_unix`
pub(crate) fn expired_filter(now_unix: i64) -> Document {
    doc! { "expired_at_unix": { "$lte": now_unix } }
}

#[async_trait]
impl UsedRefreshTokenRepository for MongoUsedRefreshTokenRepository {
    async fn exists(&self, token_id: &str) -> Result<bool, DomainError> {
        let count = with_timeout(
            self.connection.timeout(),
            "usedRefreshToken.count_documents",
            self.records
                .count_documents(doc! { "token_id": token_id }, None),
        )
        .await?;
        Ok(count > 0)
    }

    async fn insert(&self, record: UsedRefreshToken) -> Result<(), DomainError> {
        let document = UsedRefreshTokenDocument::from(&record);
        match with_timeout(
            self.connection.timeout(),
            "usedRefreshToken.insert_one",
            self.records.insert_one(document, None),
        )
        .await
        {
            Ok(_) => {
                debug!("Recorded used refresh token {}", record.token_id);
                Ok(())
            }
            Err(e) if is_duplicate_key(&e) => {
                warn!("Refresh token {} was already exchanged", record.token_id);
                Err(TokenError::AlreadyUsed.into())
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn delete_expired(&self, now_unix: i64) -> Result<u64, DomainError> {
        let result = with_timeout(
            self.connection.timeout(),
            "usedRefreshToken.delete_many",
            self.records.delete_many(expired_filter(now_unix), None),
        )
        .await?;
        Ok(result.deleted_count)
    }

    async fn count_expired(&self, now_unix: i64) -> Result<u64, DomainError> {
        let count = with_timeout(
            self.connection.timeout(),
            "usedRefreshToken.count_documents",
            self.records.count_documents(expired_filter(now_unix), None),
        )
        .await?;
        Ok(count)
    }
}
