//! Expense entity and the inputs that create or modify it

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Expense record owned by one user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    pub expense_id: String,
    pub user_id: String,
    pub expense_label: String,
    pub expense_type: String,
    /// Amount in minor units, never negative
    pub expense_amount: i64,
    pub expense_time: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request to record a new expense
#[derive(Debug, Clone)]
pub struct NewExpense {
    pub expense_type: String,
    /// Falls back to `expense_type` when absent or empty
    pub expense_label: Option<String>,
    /// `YYYY-MM-DD HH:MM:SS` in the reference zone
    pub expense_time: String,
    pub expense_amount: i64,
}

/// Partial update as submitted by a client
#[derive(Debug, Clone, Default)]
pub struct ExpenseUpdate {
    pub expense_type: Option<String>,
    pub expense_label: Option<String>,
    pub expense_time: Option<String>,
    pub expense_amount: Option<i64>,
}

impl ExpenseUpdate {
    pub fn is_empty(&self) -> bool {
        self.expense_type.is_none()
            && self.expense_label.is_none()
            && self.expense_time.is_none()
            && self.expense_amount.is_none()
    }
}

/// Validated changes handed to the repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseChanges {
    pub expense_type: Option<String>,
    pub expense_label: Option<String>,
    pub expense_time: Option<DateTime<Utc>>,
    pub expense_amount: Option<i64>,
    pub updated_at: DateTime<Utc>,
}

impl Expense {
    pub fn new(
        user_id: impl Into<String>,
        expense_type: String,
        expense_label: String,
        expense_amount: i64,
        expense_time: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            expense_id: Uuid::new_v4().to_string(),
            user_id: user_id.into(),
            expense_label,
            expense_type,
            expense_amount,
            expense_time,
            created_at: now,
            updated_at: now,
        }
    }

    /// Applies validated changes in place
    pub fn apply(&mut self, changes: &ExpenseChanges) {
        if let Some(expense_type) = &changes.expense_type {
            self.expense_type = expense_type.clone();
        }
        if let Some(label) = &changes.expense_label {
            self.expense_label = label.clone();
        }
        if let Some(time) = changes.expense_time {
            self.expense_time = time;
        }
        if let Some(amount) = changes.expense_amount {
            self.expense_amount = amount;
        }
        self.updated_at = changes.updated_at;
    }
}
