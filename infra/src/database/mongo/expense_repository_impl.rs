//! MongoDB implementation of the ExpenseRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures_util::TryStreamExt;
use mongodb::bson::{doc, Document};
use mongodb::options::{FindOneAndUpdateOptions, FindOptions, ReturnDocument};
use mongodb::Collection;
use tracing::debug;

use sl_core::domain::entities::{Expense, ExpenseChanges};
use sl_core::errors::DomainError;
use sl_core::repositories::ExpenseRepository;

use crate::database::connection::{MongoConnection, EXPENSE_COLLECTION};
use crate::database::documents::{to_bson, ExpenseDocument};
use crate::timeout::with_timeout;

/// MongoDB implementation of ExpenseRepository
pub struct MongoExpenseRepository {
    connection: MongoConnection,
    expenses: Collection<ExpenseDocument>,
}

impl MongoExpenseRepository {
    pub fn new(connection: MongoConnection) -> Self {
        Self {
            expenses: connection.collection(EXPENSE_COLLECTION),
            connection,
        }
    }
}

/// `$set` document for the fields present in `changes`
pub(crate) fn changes_document(changes: &ExpenseChanges) -> Document {
    let mut set = doc! { "updated_at": to_bson(changes.updated_at) };
    if let Some(expense_type) = &changes.expense_type {
        set.insert("expense_type", expense_type.as_str());
    }
    if let Some(label) = &changes.expense_label {
        set.insert("expense_label", label.as_str());
    }
    if let Some(time) = changes.expense_time {
        set.insert("expense_time", to_bson(time));
    }
    if let Some(amount) = changes.expense_amount {
        set.insert("expense_amount", amount);
    }
    doc! { "$set": set }
}

#[async_trait]
impl ExpenseRepository for MongoExpenseRepository {
    async fn insert(&self, expense: Expense) -> Result<Expense, DomainError> {
        let document = ExpenseDocument::from(&expense);
        with_timeout(
            self.connection.timeout(),
            "expense.insert_one",
            self.expenses.insert_one(document, None),
        )
        .await?;
        debug!("Inserted expense {} for user {}", expense.expense_id, expense.user_id);
        Ok(expense)
    }

    async fn find_in_range(
        &self,
        user_id: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Expense>, DomainError> {
        let filter = doc! {
            "user_id": user_id,
            "expense_time": { "$gte": to_bson(from), "$lte": to_bson(to) },
        };
        let options = FindOptions::builder()
            .sort(doc! { "expense_time": -1 })
            .build();

        let documents = with_timeout(self.connection.timeout(), "expense.find", async {
            let cursor = self.expenses.find(filter, options).await?;
            cursor.try_collect::<Vec<ExpenseDocument>>().await
        })
        .await?;

        let expenses = documents
            .into_iter()
            .map(Expense::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        debug!("Found {} expenses for user {}", expenses.len(), user_id);
        Ok(expenses)
    }

    async fn update(
        &self,
        user_id: &str,
        expense_id: &str,
        changes: ExpenseChanges,
    ) -> Result<Option<Expense>, DomainError> {
        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();
        let updated = with_timeout(
            self.connection.timeout(),
            "expense.find_one_and_update",
            self.expenses.find_one_and_update(
                doc! { "expense_id": expense_id, "user_id": user_id },
                changes_document(&changes),
                options,
            ),
        )
        .await?;
        Ok(updated.map(Expense::try_from).transpose()?)
    }
}
