//! In-memory implementation of UsedRefreshTokenRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::token::UsedRefreshToken;
use crate::errors::{DomainError, TokenError};

use super::trait_::UsedRefreshTokenRepository;

/// Mock used refresh token repository keyed by `token_id`
pub struct MockUsedRefreshTokenRepository {
    records: Arc<RwLock<HashMap<String, UsedRefreshToken>>>,
    fail_deletes: AtomicBool,
}

impl MockUsedRefreshTokenRepository {
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
            fail_deletes: AtomicBool::new(false),
        }
    }

    /// Make `delete_expired` fail with `StoreUnavailable`
    pub fn set_fail_deletes(&self, fail: bool) {
        self.fail_deletes.store(fail, Ordering::SeqCst);
    }

    pub async fn token_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.records.read().await.keys().cloned().collect();
        ids.sort();
        ids
    }

    pub async fn get(&self, token_id: &str) -> Option<UsedRefreshToken> {
        self.records.read().await.get(token_id).cloned()
    }
}

impl Default for MockUsedRefreshTokenRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UsedRefreshTokenRepository for MockUsedRefreshTokenRepository {
    async fn exists(&self, token_id: &str) -> Result<bool, DomainError> {
        Ok(self.records.read().await.contains_key(token_id))
    }

    async fn insert(&self, record: UsedRefreshToken) -> Result<(), DomainError> {
        let mut records = self.records.write().await;

        if records.contains_key(&record.token_id) {
            return Err(TokenError::AlreadyUsed.into());
        }

        records.insert(record.token_id.clone(), record);
        Ok(())
    }

    async fn delete_expired(&self, now_unix: i64) -> Result<u64, DomainError> {
        if self.fail_deletes.load(Ordering::SeqCst) {
            return Err(DomainError::StoreUnavailable {
                message: "delete_many failed".to_string(),
            });
        }

        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|_, record| !record.is_expired(now_unix));
        Ok((before - records.len()) as u64)
    }

    async fn count_expired(&self, now_unix: i64) -> Result<u64, DomainError> {
        let records = self.records.read().await;
        Ok(records.values().filter(|r| r.is_expired(now_unix)).count() as u64)
    }
}
