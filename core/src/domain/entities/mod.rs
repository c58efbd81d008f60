//! Domain entities representing core business objects.

pub mod expense;
pub mod mail;
pub mod token;
pub mod user;

// Re-export commonly used types
pub use expense::{Expense, ExpenseChanges, ExpenseUpdate, NewExpense};
pub use mail::{MailCode, MailType, CODE_LENGTH};
pub use token::{
    AccessClaims, RefreshClaims, SessionIdentity, TokenClass, TokenPair, UsedRefreshToken,
};
pub use user::{NewUser, User, UserRole};
