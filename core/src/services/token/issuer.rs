//! Mints signed access/refresh token pairs

use chrono::Duration;
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::token::{
    AccessClaims, RefreshClaims, SessionIdentity, TokenClass, TokenPair,
};
use crate::errors::{DomainError, TokenError};
use crate::services::clock::Clock;

use super::config::TokenServiceConfig;

/// Issues token pairs; never touches storage
pub struct TokenIssuer {
    config: TokenServiceConfig,
    clock: Arc<dyn Clock>,
    access_key: EncodingKey,
    refresh_key: EncodingKey,
}

impl TokenIssuer {
    pub fn new(config: TokenServiceConfig, clock: Arc<dyn Clock>) -> Self {
        let access_key = EncodingKey::from_secret(config.access_secret.as_bytes());
        let refresh_key = EncodingKey::from_secret(config.refresh_secret.as_bytes());

        Self {
            config,
            clock,
            access_key,
            refresh_key,
        }
    }

    /// Issues an access token with full claims and a refresh token with
    /// minimal claims, both stamped with the same issue time
    ///
    /// # Returns
    /// * `Err(DomainError::Configuration)` - A TTL is not a whole number of hours
    pub fn issue(&self, identity: &SessionIdentity) -> Result<TokenPair, DomainError> {
        let access_ttl = self.config.ttl_hours(TokenClass::Access)?;
        let refresh_ttl = self.config.ttl_hours(TokenClass::Refresh)?;
        let now = self.clock.now();

        let access_claims = AccessClaims {
            sub: identity.user_id.clone(),
            email: identity.email.clone(),
            first_name: identity.first_name.clone(),
            last_name: identity.last_name.clone(),
            user_role: identity.user_role,
            is_email_verified: identity.is_email_verified,
            iat: now.timestamp(),
            exp: (now + Duration::hours(access_ttl)).timestamp(),
        };

        let refresh_claims = RefreshClaims {
            sub: identity.user_id.clone(),
            jti: Uuid::new_v4().to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::hours(refresh_ttl)).timestamp(),
        };

        Ok(TokenPair {
            access_token: self.encode_jwt(&access_claims, &self.access_key)?,
            refresh_token: self.encode_jwt(&refresh_claims, &self.refresh_key)?,
        })
    }

    fn encode_jwt<T: Serialize>(&self, claims: &T, key: &EncodingKey) -> Result<String, DomainError> {
        encode(&Header::default(), claims, key).map_err(|e| {
            tracing::error!(error = %e, "failed to sign token");
            TokenError::GenerationFailed.into()
        })
    }
}
