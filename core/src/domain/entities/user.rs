//! User entity representing a registered account.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::token::TokenPair;

/// Role carried in access token claims
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum UserRole {
    Admin,
    #[default]
    User,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "ADMIN",
            UserRole::User => "USER",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ADMIN" => Ok(UserRole::Admin),
            "USER" => Ok(UserRole::User),
            other => Err(format!("unknown user role: {}", other)),
        }
    }
}

/// User entity as persisted in the `user` collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Stable subject id used in token claims and blacklist keys
    pub user_id: String,

    pub first_name: String,

    pub last_name: String,

    pub email: String,

    pub phone: String,

    /// bcrypt hash, never serialized to clients
    #[serde(skip_serializing)]
    pub password: String,

    pub user_role: UserRole,

    pub is_email_verified: bool,

    /// Last issued access token
    pub access_token: String,

    /// Last issued refresh token
    pub refresh_token: String,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

/// Input for creating a user during signup
#[derive(Debug, Clone)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub user_role: Option<UserRole>,
}

impl User {
    /// Creates an unverified user from a signup request and a password hash
    pub fn new(input: NewUser, password_hash: String, now: DateTime<Utc>) -> Self {
        Self {
            user_id: Uuid::new_v4().to_string(),
            first_name: input.first_name,
            last_name: input.last_name,
            email: input.email,
            phone: input.phone,
            password: password_hash,
            user_role: input.user_role.unwrap_or_default(),
            is_email_verified: false,
            access_token: String::new(),
            refresh_token: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Stores a freshly issued pair on the record
    pub fn set_tokens(&mut self, pair: &TokenPair, now: DateTime<Utc>) {
        self.access_token = pair.access_token.clone();
        self.refresh_token = pair.refresh_token.clone();
        self.updated_at = now;
    }

    /// Display name used in mail greetings
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(role: Option<UserRole>) -> User {
        User::new(
            NewUser {
                first_name: "Ada".to_string(),
                last_name: "Lovelace".to_string(),
                email: "ada@example.com".to_string(),
                phone: "+6591234567".to_string(),
                password: "plain".to_string(),
                user_role: role,
            },
            "hash".to_string(),
            Utc::now(),
        )
    }

    #[test]
    fn test_new_user_defaults() {
        let user = new_user(None);
        assert_eq!(user.user_role, UserRole::User);
        assert!(!user.is_email_verified);
        assert_eq!(user.password, "hash");
        assert!(Uuid::parse_str(&user.user_id).is_ok());
        assert!(user.access_token.is_empty());
    }

    #[test]
    fn test_password_is_not_serialized() {
        let json = serde_json::to_value(new_user(Some(UserRole::Admin))).unwrap();
        assert!(json.get("password").is_none());
        assert_eq!(json["user_role"], "ADMIN");
    }

    #[test]
    fn test_role_parsing() {
        assert_eq!("ADMIN".parse::<UserRole>(), Ok(UserRole::Admin));
        assert_eq!("USER".parse::<UserRole>(), Ok(UserRole::User));
        assert!("admin".parse::<UserRole>().is_err());
    }
}
