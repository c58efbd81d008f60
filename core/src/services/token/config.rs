//! Configuration for token issuance and validation

use sl_shared::config::parse_ttl_hours;
use sl_shared::AuthConfig;

use crate::domain::entities::token::TokenClass;
use crate::errors::DomainError;

/// Configuration for the token issuer, validator and revocation ledger
#[derive(Clone)]
pub struct TokenServiceConfig {
    /// Secret used to sign access tokens
    pub access_secret: String,
    /// Secret used to sign refresh tokens
    pub refresh_secret: String,
    /// Access token TTL in hours, as configured
    pub access_ttl: String,
    /// Refresh token TTL in hours, as configured
    pub refresh_ttl: String,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self {
            access_secret: "development-access-secret-please-change".to_string(),
            refresh_secret: "development-refresh-secret-please-change".to_string(),
            access_ttl: "1".to_string(),
            refresh_ttl: "168".to_string(),
        }
    }
}

impl From<&AuthConfig> for TokenServiceConfig {
    fn from(config: &AuthConfig) -> Self {
        Self {
            access_secret: config.access_token_secret.clone(),
            refresh_secret: config.refresh_token_secret.clone(),
            access_ttl: config.access_token_ttl.clone(),
            refresh_ttl: config.refresh_token_ttl.clone(),
        }
    }
}

impl TokenServiceConfig {
    /// TTL of a class in whole hours
    ///
    /// # Returns
    /// * `Err(DomainError::Configuration)` - The value is not an integer in
    ///   `1..=MAX_TOKEN_TTL_HOURS`
    pub fn ttl_hours(&self, class: TokenClass) -> Result<i64, DomainError> {
        let raw = match class {
            TokenClass::Access => &self.access_ttl,
            TokenClass::Refresh => &self.refresh_ttl,
        };

        parse_ttl_hours(raw).map_err(|reason| DomainError::Configuration {
            message: format!("{} TTL '{}' {}", class, raw, reason),
        })
    }

    pub fn secret(&self, class: TokenClass) -> &str {
        match class {
            TokenClass::Access => &self.access_secret,
            TokenClass::Refresh => &self.refresh_secret,
        }
    }
}

impl std::fmt::Debug for TokenServiceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenServiceConfig")
            .field("access_ttl", &self.access_ttl)
            .field("refresh_ttl", &self.refresh_ttl)
            .finish_non_exhaustive()
    }
}
