//! Document shapes stored in each collection.
//!
//! Field names are snake_case; timestamps are BSON dates except for the unix
//! seconds kept on used refresh token records.

use chrono::{DateTime, TimeZone, Utc};
use mongodb::bson::DateTime as BsonDateTime;
use serde::{Deserialize, Serialize};

use sl_core::domain::entities::{Expense, MailCode, MailType, UsedRefreshToken, User, UserRole};

use crate::InfrastructureError;

pub(crate) fn to_bson(value: DateTime<Utc>) -> BsonDateTime {
    BsonDateTime::from_millis(value.timestamp_millis())
}

pub(crate) fn from_bson(value: BsonDateTime) -> Result<DateTime<Utc>, InfrastructureError> {
    Utc.timestamp_millis_opt(value.timestamp_millis())
        .single()
        .ok_or_else(|| {
            InfrastructureError::Mapping(format!("date out of range: {}", value.timestamp_millis()))
        })
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserDocument {
    pub user_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub user_role: UserRole,
    pub is_email_verified: bool,
    #[serde(default)]
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: String,
    pub created_at: BsonDateTime,
    pub updated_at: BsonDateTime,
}

impl From<&User> for UserDocument {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.user_id.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
            phone: user.phone.clone(),
            password: user.password.clone(),
            user_role: user.user_role,
            is_email_verified: user.is_email_verified,
            access_token: user.access_token.clone(),
            refresh_token: user.refresh_token.clone(),
            created_at: to_bson(user.created_at),
            updated_at: to_bson(user.updated_at),
        }
    }
}

impl TryFrom<UserDocument> for User {
    type Error = InfrastructureError;

    fn try_from(doc: UserDocument) -> Result<Self, Self::Error> {
        Ok(User {
            user_id: doc.user_id,
            first_name: doc.first_name,
            last_name: doc.last_name,
            email: doc.email,
            phone: doc.phone,
            password: doc.password,
            user_role: doc.user_role,
            is_email_verified: doc.is_email_verified,
            access_token: doc.access_token,
            refresh_token: doc.refresh_token,
            created_at: from_bson(doc.created_at)?,
            updated_at: from_bson(doc.updated_at)?,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailDocument {
    pub mail_id: String,
    pub email: String,
    pub code: String,
    #[serde(rename = "type")]
    pub mail_type: MailType,
    pub created_at: BsonDateTime,
    pub updated_at: BsonDateTime,
    pub expires_at: BsonDateTime,
}

impl From<&MailCode> for MailDocument {
    fn from(code: &MailCode) -> Self {
        Self {
            mail_id: code.mail_id.clone(),
            email: code.email.clone(),
            code: code.code.clone(),
            mail_type: code.mail_type,
            created_at: to_bson(code.created_at),
            updated_at: to_bson(code.updated_at),
            expires_at: to_bson(code.expires_at),
        }
    }
}

impl TryFrom<MailDocument> for MailCode {
    type Error = InfrastructureError;

    fn try_from(doc: MailDocument) -> Result<Self, Self::Error> {
        Ok(MailCode {
            mail_id: doc.mail_id,
            email: doc.email,
            code: doc.code,
            mail_type: doc.mail_type,
            created_at: from_bson(doc.created_at)?,
            updated_at: from_bson(doc.updated_at)?,
            expires_at: from_bson(doc.expires_at)?,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsedRefreshTokenDocument {
    pub token_id: String,
    /// SHA-256 hex digest
    pub refresh_token: String,
    pub issued_at_unix: i64,
    pub expired_at_unix: i64,
}

impl From<&UsedRefreshToken> for UsedRefreshTokenDocument {
    fn from(record: &UsedRefreshToken) -> Self {
        Self {
            token_id: record.token_id.clone(),
            refresh_token: record.refresh_token.clone(),
            issued_at_unix: record.issued_at_unix,
            expired_at_unix: record.expired_at_unix,
        }
    }
}

impl From<UsedRefreshTokenDocument> for UsedRefreshToken {
    fn from(doc: UsedRefreshTokenDocument) -> Self {
        UsedRefreshToken {
            token_id: doc.token_id,
            refresh_token: doc.refresh_token,
            issued_at_unix: doc.issued_at_unix,
            expired_at_unix: doc.expired_at_unix,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseDocument {
    pub expense_id: String,
    pub user_id: String,
    pub expense_label: String,
    pub expense_type: String,
    pub expense_amount: i64,
    pub expense_time: BsonDateTime,
    pub created_at: BsonDateTime,
    pub updated_at: BsonDateTime,
}

impl From<&Expense> for ExpenseDocument {
    fn from(expense: &Expense) -> Self {
        Self {
            expense_id: expense.expense_id.clone(),
            user_id: expense.user_id.clone(),
            expense_label: expense.expense_label.clone(),
            expense_type: expense.expense_type.clone(),
            expense_amount: expense.expense_amount,
            expense_time: to_bson(expense.expense_time),
            created_at: to_bson(expense.created_at),
            updated_at: to_bson(expense.updated_at),
        }
    }
}

impl TryFrom<ExpenseDocument> for Expense {
    type Error = InfrastructureError;

    fn try_from(doc: ExpenseDocument) -> Result<Self, Self::Error> {
        Ok(Expense {
            expense_id: doc.expense_id,
            user_id: doc.user_id,
            expense_label: doc.expense_label,
            expense_type: doc.expense_type,
            expense_amount: doc.expense_amount,
            expense_time: from_bson(doc.expense_time)?,
            created_at: from_bson(doc.created_at)?,
            updated_at: from_bson(doc.updated_at)?,
        })
    }
}
