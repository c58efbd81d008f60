//! Authentication configuration: token signing and password hashing

use super::{optional, parsed, required, ConfigError};

/// Default bcrypt cost, matching the cost used by the original user records
pub const DEFAULT_BCRYPT_COST: u32 = 14;

/// Upper bound on a token TTL (ten years)
pub const MAX_TOKEN_TTL_HOURS: i64 = 87_600;

/// Parse a configured TTL into whole hours within `1..=MAX_TOKEN_TTL_HOURS`
pub fn parse_ttl_hours(raw: &str) -> Result<i64, String> {
    let hours = raw.trim().parse::<i64>().map_err(|e| e.to_string())?;
    if !(1..=MAX_TOKEN_TTL_HOURS).contains(&hours) {
        return Err(format!(
            "must be between 1 and {} hours, got {}",
            MAX_TOKEN_TTL_HOURS, hours
        ));
    }
    Ok(hours)
}

/// Token and password settings
///
/// TTLs are kept as the raw configured strings; the token issuer parses them
/// on every issuance and `validate` checks them once at startup.
#[derive(Clone)]
pub struct AuthConfig {
    /// Secret used to sign access tokens
    pub access_token_secret: String,

    /// Secret used to sign refresh tokens
    pub refresh_token_secret: String,

    /// Access token time-to-live in hours
    pub access_token_ttl: String,

    /// Refresh token time-to-live in hours
    pub refresh_token_ttl: String,

    /// bcrypt work factor
    pub bcrypt_cost: u32,
}

impl AuthConfig {
    /// Create from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            access_token_secret: required("MY_ACCESS_TOKEN_SECRET_KEY")?,
            refresh_token_secret: required("MY_REFRESH_TOKEN_SECRET_KEY")?,
            access_token_ttl: optional("ACCESS_TOKEN_TTL", "1"),
            refresh_token_ttl: optional("REFRESH_TOKEN_TTL", "168"),
            bcrypt_cost: parsed("BCRYPT_COST", DEFAULT_BCRYPT_COST)?,
        })
    }

    /// Reject out-of-range TTLs and identical signing secrets
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (key, value) in [
            ("ACCESS_TOKEN_TTL", &self.access_token_ttl),
            ("REFRESH_TOKEN_TTL", &self.refresh_token_ttl),
        ] {
            parse_ttl_hours(value).map_err(|reason| ConfigError::Invalid {
                key: key.to_string(),
                reason,
            })?;
        }

        if self.access_token_secret == self.refresh_token_secret {
            return Err(ConfigError::Invalid {
                key: "MY_REFRESH_TOKEN_SECRET_KEY".to_string(),
                reason: "must differ from the access token secret".to_string(),
            });
        }

        Ok(())
    }
}

// Secrets stay out of debug output
impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("access_token_ttl", &self.access_token_ttl)
            .field("refresh_token_ttl", &self.refresh_token_ttl)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .finish_non_exhaustive()
    }
}

/// Key material for encrypting verification links
#[derive(Clone)]
pub struct EncryptionConfig {
    /// Base64-encoded 32 byte AES-256 key
    pub aes_key: String,
}

impl EncryptionConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            aes_key: required("AES_ENCRYPTION_KEY")?,
        })
    }
}

impl std::fmt::Debug for EncryptionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EncryptionConfig").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(access_ttl: &str, refresh_ttl: &str) -> AuthConfig {
        AuthConfig {
            access_token_secret: "access".to_string(),
            refresh_token_secret: "refresh".to_string(),
            access_token_ttl: access_ttl.to_string(),
            refresh_token_ttl: refresh_ttl.to_string(),
            bcrypt_cost: 4,
        }
    }

    #[test]
    fn test_validate_accepts_whole_hours() {
        assert!(config("1", "168").validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_non_numeric_ttl() {
        let err = config("one", "168").validate().unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { ref key, .. } if key == "ACCESS_TOKEN_TTL"));

        let err = config("1", "1.5").validate().unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { ref key, .. } if key == "REFRESH_TOKEN_TTL"));
    }

    #[test]
    fn test_validate_rejects_out_of_range_ttl() {
        for ttl in ["0", "-1", "3000000000000"] {
            let err = config(ttl, "168").validate().unwrap_err();
            assert!(matches!(err, ConfigError::Invalid { ref key, .. } if key == "ACCESS_TOKEN_TTL"));
        }
        assert!(config("1", &MAX_TOKEN_TTL_HOURS.to_string()).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_shared_secret() {
        let mut config = config("1", "168");
        config.refresh_token_secret = config.access_token_secret.clone();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_debug_hides_secrets() {
        let rendered = format!("{:?}", config("1", "168"));
        assert!(!rendered.contains("access\""));
        assert!(rendered.contains("access_token_ttl"));
    }
}
