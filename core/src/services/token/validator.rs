//! Verifies token signatures and expiry

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::de::DeserializeOwned;
use std::sync::Arc;

use crate::domain::entities::token::{AccessClaims, RefreshClaims, TokenClass};
use crate::errors::{DomainError, TokenError};
use crate::services::clock::Clock;

use super::config::TokenServiceConfig;

/// Validates tokens of either class
///
/// Expiry is judged against the injected clock, not the system time, so the
/// library's own `exp` check is switched off. Revocation is not consulted.
pub struct TokenValidator {
    clock: Arc<dyn Clock>,
    access_key: DecodingKey,
    refresh_key: DecodingKey,
    validation: Validation,
}

impl TokenValidator {
    pub fn new(config: &TokenServiceConfig, clock: Arc<dyn Clock>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;

        Self {
            clock,
            access_key: DecodingKey::from_secret(config.secret(TokenClass::Access).as_bytes()),
            refresh_key: DecodingKey::from_secret(config.secret(TokenClass::Refresh).as_bytes()),
            validation,
        }
    }

    /// Verify an access token and return its full claims
    ///
    /// # Returns
    /// * `Err(TokenError::InvalidSignature)` - Wrong secret or malformed token
    /// * `Err(TokenError::Expired)` - `exp` is earlier than now
    pub fn validate_access(&self, token: &str) -> Result<AccessClaims, DomainError> {
        let claims: AccessClaims = self.decode_jwt(token, &self.access_key)?;
        self.check_expiry(claims.exp)?;
        Ok(claims)
    }

    /// Verify a refresh token and return its minimal claims
    pub fn validate_refresh(&self, token: &str) -> Result<RefreshClaims, DomainError> {
        let claims: RefreshClaims = self.decode_jwt(token, &self.refresh_key)?;
        self.check_expiry(claims.exp)?;
        Ok(claims)
    }

    fn decode_jwt<T: DeserializeOwned>(&self, token: &str, key: &DecodingKey) -> Result<T, DomainError> {
        decode::<T>(token, key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!(error = %e, "token rejected");
                TokenError::InvalidSignature.into()
            })
    }

    fn check_expiry(&self, expires_at: i64) -> Result<(), DomainError> {
        if expires_at < self.clock.now_unix() {
            return Err(TokenError::Expired.into());
        }
        Ok(())
    }
}
