//! Expense service implementation

use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::info;

use sl_shared::validation::parse_local_date_time;

use crate::domain::entities::expense::{Expense, ExpenseChanges, ExpenseUpdate, NewExpense};
use crate::errors::DomainError;
use crate::repositories::expense::ExpenseRepository;
use crate::services::clock::Clock;

/// Creates, lists and updates expenses owned by a user
pub struct ExpenseService {
    repository: Arc<dyn ExpenseRepository>,
    clock: Arc<dyn Clock>,
}

impl ExpenseService {
    pub fn new(repository: Arc<dyn ExpenseRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    /// Record an expense for `user_id`
    ///
    /// # Arguments
    /// * `user_id` - Subject of the authorized request
    /// * `input` - Type, optional label, local time string and amount
    pub async fn create(&self, user_id: &str, input: NewExpense) -> Result<Expense, DomainError> {
        if input.expense_type.trim().is_empty() {
            return Err(DomainError::validation("expense type is required"));
        }
        check_amount(input.expense_amount)?;

        let expense_time = self.parse_time(&input.expense_time)?;
        let label = input
            .expense_label
            .filter(|label| !label.trim().is_empty())
            .unwrap_or_else(|| input.expense_type.clone());

        let expense = Expense::new(
            user_id,
            input.expense_type,
            label,
            input.expense_amount,
            expense_time,
            self.clock.now_utc(),
        );

        let expense = self.repository.insert(expense).await?;
        info!(user_id = %user_id, expense_id = %expense.expense_id, "expense created");
        Ok(expense)
    }

    /// Expenses of `user_id` between two local time strings, inclusive,
    /// newest first
    pub async fn list(&self, user_id: &str, from: &str, to: &str) -> Result<Vec<Expense>, DomainError> {
        let from = self.parse_time(from)?;
        let to = self.parse_time(to)?;

        if from > to {
            return Err(DomainError::validation("from date must not be after to date"));
        }

        self.repository.find_in_range(user_id, from, to).await
    }

    /// Apply a partial update to one of the caller's own expenses
    pub async fn update(
        &self,
        user_id: &str,
        expense_id: &str,
        update: ExpenseUpdate,
    ) -> Result<Expense, DomainError> {
        if update.is_empty() {
            return Err(DomainError::validation("nothing to update"));
        }

        if let Some(amount) = update.expense_amount {
            check_amount(amount)?;
        }

        let changes = ExpenseChanges {
            expense_time: update
                .expense_time
                .as_deref()
                .map(|time| self.parse_time(time))
                .transpose()?,
            expense_type: update.expense_type,
            expense_label: update.expense_label,
            expense_amount: update.expense_amount,
            updated_at: self.clock.now_utc(),
        };

        let expense = self
            .repository
            .update(user_id, expense_id, changes)
            .await?
            .ok_or_else(|| DomainError::not_found("expense"))?;

        info!(user_id = %user_id, expense_id = %expense_id, "expense updated");
        Ok(expense)
    }

    fn parse_time(&self, value: &str) -> Result<DateTime<Utc>, DomainError> {
        parse_local_date_time(value, self.clock.zone())
            .map(|time| time.with_timezone(&Utc))
            .ok_or_else(|| {
                DomainError::validation(format!(
                    "'{}' is not a date time in the form YYYY-MM-DD HH:MM:SS",
                    value
                ))
            })
    }
}

fn check_amount(amount: i64) -> Result<(), DomainError> {
    if amount < 0 {
        return Err(DomainError::validation("expense amount cannot be less than 0"));
    }
    Ok(())
}
