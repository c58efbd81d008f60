//! Emailed verification codes

use chrono::{DateTime, Duration, Utc};
use constant_time_eq::constant_time_eq;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Number of digits in an emailed code
pub const CODE_LENGTH: usize = 6;

/// Purpose of a mail code; at most one record exists per (email, type)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MailType {
    MailVerification,
    PasswordReset,
}

impl MailType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MailType::MailVerification => "MailVerification",
            MailType::PasswordReset => "PasswordReset",
        }
    }
}

impl fmt::Display for MailType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mail code record as persisted in the `mail` collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MailCode {
    pub mail_id: String,
    pub email: String,
    pub code: String,
    #[serde(rename = "type")]
    pub mail_type: MailType,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl MailCode {
    pub fn new(
        email: impl Into<String>,
        code: impl Into<String>,
        mail_type: MailType,
        now: DateTime<Utc>,
        lifetime: Duration,
    ) -> Self {
        Self {
            mail_id: Uuid::new_v4().to_string(),
            email: email.into(),
            code: code.into(),
            mail_type,
            created_at: now,
            updated_at: now,
            expires_at: now + lifetime,
        }
    }

    /// Constant-time comparison against a submitted code
    pub fn matches(&self, candidate: &str) -> bool {
        constant_time_eq(self.code.as_bytes(), candidate.as_bytes())
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at < now
    }
}
