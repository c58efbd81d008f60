//! In-memory implementation of RevocationStore for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::errors::DomainError;

use super::trait_::{RevocationEntry, RevocationStore};

/// Mock revocation cache
///
/// Keys never expire on their own; tests read back the recorded TTL instead.
pub struct MockRevocationStore {
    entries: Arc<RwLock<HashMap<String, RevocationEntry>>>,
    fail_writes: AtomicBool,
}

impl MockRevocationStore {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            fail_writes: AtomicBool::new(false),
        }
    }

    /// Make every write fail with `StoreUnavailable`
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// The stored TTL of a key, if present
    pub async fn ttl_of(&self, key: &str) -> Option<u64> {
        self.entries.read().await.get(key).map(|e| e.ttl_seconds)
    }

    fn check_writable(&self) -> Result<(), DomainError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(DomainError::StoreUnavailable {
                message: "revocation cache unreachable".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for MockRevocationStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RevocationStore for MockRevocationStore {
    async fn set(&self, entry: RevocationEntry) -> Result<(), DomainError> {
        self.check_writable()?;
        self.entries.write().await.insert(entry.key.clone(), entry);
        Ok(())
    }

    async fn set_all(&self, entries: Vec<RevocationEntry>) -> Result<(), DomainError> {
        self.check_writable()?;
        let mut stored = self.entries.write().await;
        for entry in entries {
            stored.insert(entry.key.clone(), entry);
        }
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<i64>, DomainError> {
        Ok(self.entries.read().await.get(key).map(|e| e.marker))
    }
}
