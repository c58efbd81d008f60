//! Expense repository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::expense::{Expense, ExpenseChanges};
use crate::errors::DomainError;

/// Repository trait for Expense persistence operations
#[async_trait]
pub trait ExpenseRepository: Send + Sync {
    /// Insert a new expense
    async fn insert(&self, expense: Expense) -> Result<Expense, DomainError>;

    /// Expenses of `user_id` with `from <= expense_time <= to`, newest first
    async fn find_in_range(
        &self,
        user_id: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Expense>, DomainError>;

    /// Apply changes to an expense owned by `user_id`
    ///
    /// # Returns
    /// * `Ok(Some(Expense))` - The updated record
    /// * `Ok(None)` - No expense with that id belongs to the user
    async fn update(
        &self,
        user_id: &str,
        expense_id: &str,
        changes: ExpenseChanges,
    ) -> Result<Option<Expense>, DomainError>;
}
