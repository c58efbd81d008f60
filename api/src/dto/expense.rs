use serde::{Deserialize, Serialize};
use validator::Validate;

use sl_core::domain::entities::{ExpenseUpdate, NewExpense};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewExpenseRequest {
    #[validate(length(min = 1))]
    pub expense_type: String,
    pub expense_label: Option<String>,
    /// `YYYY-MM-DD HH:MM:SS`
    #[validate(length(min = 1))]
    pub expense_time: String,
    pub expense_amount: i64,
}

impl From<NewExpenseRequest> for NewExpense {
    fn from(request: NewExpenseRequest) -> Self {
        NewExpense {
            expense_type: request.expense_type,
            expense_label: request.expense_label,
            expense_time: request.expense_time,
            expense_amount: request.expense_amount,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ExpenseRangeRequest {
    #[validate(length(min = 1))]
    pub from_date: String,
    #[validate(length(min = 1))]
    pub to_date: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ExpenseUpdateRequest {
    #[validate(length(min = 1))]
    pub expense_id: String,
    pub expense_type: Option<String>,
    pub expense_label: Option<String>,
    pub expense_time: Option<String>,
    pub expense_amount: Option<i64>,
}

impl ExpenseUpdateRequest {
    pub fn into_parts(self) -> (String, ExpenseUpdate) {
        (
            self.expense_id,
            ExpenseUpdate {
                expense_type: self.expense_type,
                expense_label: self.expense_label,
                expense_time: self.expense_time,
                expense_amount: self.expense_amount,
            },
        )
    }
}
