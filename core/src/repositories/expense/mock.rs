//! In-memory implementation of ExpenseRepository for testing

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::expense::{Expense, ExpenseChanges};
use crate::errors::DomainError;

use super::trait_::ExpenseRepository;

/// Mock expense repository keyed by `expense_id`
pub struct MockExpenseRepository {
    expenses: Arc<RwLock<HashMap<String, Expense>>>,
}

impl MockExpenseRepository {
    pub fn new() -> Self {
        Self {
            expenses: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for MockExpenseRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ExpenseRepository for MockExpenseRepository {
    async fn insert(&self, expense: Expense) -> Result<Expense, DomainError> {
        let mut expenses = self.expenses.write().await;
        expenses.insert(expense.expense_id.clone(), expense.clone());
        Ok(expense)
    }

    async fn find_in_range(
        &self,
        user_id: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Expense>, DomainError> {
        let expenses = self.expenses.read().await;
        let mut found: Vec<Expense> = expenses
            .values()
            .filter(|e| e.user_id == user_id && e.expense_time >= from && e.expense_time <= to)
            .cloned()
            .collect();
        found.sort_by(|a, b| b.expense_time.cmp(&a.expense_time));
        Ok(found)
    }

    async fn update(
        &self,
        user_id: &str,
        expense_id: &str,
        changes: ExpenseChanges,
    ) -> Result<Option<Expense>, DomainError> {
        let mut expenses = self.expenses.write().await;

        match expenses.get_mut(expense_id) {
            Some(expense) if expense.user_id == user_id => {
                expense.apply(&changes);
                Ok(Some(expense.clone()))
            }
            _ => Ok(None),
        }
    }
}
