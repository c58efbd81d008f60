//! In-memory implementation of UserRepository for testing

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::token::TokenPair;
use crate::domain::entities::user::User;
use crate::errors::DomainError;
use crate::repositories::mail_code::MockMailCodeRepository;

use super::trait_::{PasswordResetWrite, RevocationWrite, UserRepository};

/// Mock user repository for testing
///
/// Shares its mail code store so the transactional operations can delete the
/// consumed code together with the user update.
pub struct MockUserRepository {
    users: Arc<RwLock<HashMap<String, User>>>,
    mail_codes: Arc<MockMailCodeRepository>,
}

impl MockUserRepository {
    /// Create a new mock repository backed by `mail_codes`
    pub fn new(mail_codes: Arc<MockMailCodeRepository>) -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
            mail_codes,
        }
    }

    /// Number of stored users
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

impl Default for MockUserRepository {
    fn default() -> Self {
        Self::new(Arc::new(MockMailCodeRepository::new()))
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn count_by_email(&self, email: &str) -> Result<u64, DomainError> {
        let users = self.users.read().await;
        Ok(users.values().filter(|u| u.email == email).count() as u64)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, user_id: &str) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.get(user_id).cloned())
    }

    async fn insert(&self, user: User) -> Result<User, DomainError> {
        let mut users = self.users.write().await;

        if users.contains_key(&user.user_id) {
            return Err(DomainError::internal("duplicate user_id"));
        }

        users.insert(user.user_id.clone(), user.clone());
        Ok(user)
    }

    async fn update_tokens(
        &self,
        user_id: &str,
        pair: &TokenPair,
        updated_at: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        let mut users = self.users.write().await;

        // Upsert semantics: an unknown id gets a skeleton record
        let user = users.entry(user_id.to_string()).or_insert_with(|| User {
            user_id: user_id.to_string(),
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            phone: String::new(),
            password: String::new(),
            user_role: Default::default(),
            is_email_verified: false,
            access_token: String::new(),
            refresh_token: String::new(),
            created_at: updated_at,
            updated_at,
        });
        user.set_tokens(pair, updated_at);
        Ok(())
    }

    async fn mark_email_verified(
        &self,
        user_id: &str,
        mail_id: &str,
        updated_at: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        let mut users = self.users.write().await;
        let user = users
            .get_mut(user_id)
            .ok_or_else(|| DomainError::not_found("user"))?;

        user.is_email_verified = true;
        user.updated_at = updated_at;
        self.mail_codes.remove(mail_id).await;
        Ok(())
    }

    async fn reset_password(
        &self,
        reset: PasswordResetWrite,
        revoke: RevocationWrite,
    ) -> Result<(), DomainError> {
        // Issued before the document write is checked, as in the store
        let revoked = revoke.await;

        let mut users = self.users.write().await;
        let user = users
            .values_mut()
            .find(|u| u.email == reset.email)
            .ok_or_else(|| DomainError::not_found("user"))?;

        // Nothing is applied unless the cache write succeeded
        revoked?;

        user.password = reset.password_hash;
        user.updated_at = reset.updated_at;
        self.mail_codes.remove(&reset.mail_id).await;
        Ok(())
    }
}
