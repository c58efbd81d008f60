//! In-memory implementation of MailCodeRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::mail::{MailCode, MailType};
use crate::errors::DomainError;

use super::trait_::MailCodeRepository;

/// Mock mail code repository keyed by (email, type)
pub struct MockMailCodeRepository {
    codes: Arc<RwLock<HashMap<(String, MailType), MailCode>>>,
    fail_writes: AtomicBool,
}

impl MockMailCodeRepository {
    pub fn new() -> Self {
        Self {
            codes: Arc::new(RwLock::new(HashMap::new())),
            fail_writes: AtomicBool::new(false),
        }
    }

    /// Make every upsert fail with `StoreUnavailable`
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Delete a record by id, as the user transactions do
    pub async fn remove(&self, mail_id: &str) -> bool {
        let mut codes = self.codes.write().await;
        let before = codes.len();
        codes.retain(|_, code| code.mail_id != mail_id);
        codes.len() != before
    }

    /// Overwrite a record verbatim, e.g. to plant an expired code
    pub async fn put(&self, code: MailCode) {
        let mut codes = self.codes.write().await;
        codes.insert((code.email.clone(), code.mail_type), code);
    }
}

impl Default for MockMailCodeRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MailCodeRepository for MockMailCodeRepository {
    async fn find(
        &self,
        email: &str,
        mail_type: MailType,
    ) -> Result<Option<MailCode>, DomainError> {
        let codes = self.codes.read().await;
        Ok(codes.get(&(email.to_string(), mail_type)).cloned())
    }

    async fn upsert(&self, code: MailCode) -> Result<MailCode, DomainError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(DomainError::StoreUnavailable {
                message: "mail code store unreachable".to_string(),
            });
        }

        let mut codes = self.codes.write().await;
        let key = (code.email.clone(), code.mail_type);

        let stored = match codes.get(&key) {
            Some(existing) => MailCode {
                mail_id: existing.mail_id.clone(),
                created_at: existing.created_at,
                ..code
            },
            None => code,
        };

        codes.insert(key, stored.clone());
        Ok(stored)
    }
}
