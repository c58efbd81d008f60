//! Token entities for JWT-based sessions.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::user::{User, UserRole};

/// The two token classes; each has its own secret, TTL and blacklist key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenClass {
    Access,
    Refresh,
}

impl TokenClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenClass::Access => "access_token",
            TokenClass::Refresh => "refresh_token",
        }
    }

    /// Revocation cache key for a subject
    pub fn blacklist_key(&self, subject: &str) -> String {
        format!("blacklist_{}:user_id:{}", self.as_str(), subject)
    }
}

impl fmt::Display for TokenClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity a token pair is minted from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionIdentity {
    pub user_id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub user_role: UserRole,
    pub is_email_verified: bool,
}

impl From<&User> for SessionIdentity {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.user_id.clone(),
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            user_role: user.user_role,
            is_email_verified: user.is_email_verified,
        }
    }
}

/// Full identity claims carried by access tokens
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Subject (user ID)
    pub sub: String,

    pub email: String,

    pub first_name: String,

    pub last_name: String,

    pub user_role: UserRole,

    pub is_email_verified: bool,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,
}

/// Minimal claims carried by refresh tokens
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshClaims {
    /// Subject (user ID)
    pub sub: String,

    /// Unique id, recorded once the token has been rotated out
    pub jti: String,

    pub iat: i64,

    pub exp: i64,
}

/// Access and refresh token pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Durable record of a refresh token that has been exchanged
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsedRefreshToken {
    /// The token's `jti`
    pub token_id: String,

    /// SHA-256 hex digest of the signed token
    pub refresh_token: String,

    pub issued_at_unix: i64,

    pub expired_at_unix: i64,
}

impl UsedRefreshToken {
    pub fn is_expired(&self, now_unix: i64) -> bool {
        self.expired_at_unix <= now_unix
    }
}
