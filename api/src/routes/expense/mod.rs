//! Expense route handlers; every route sits behind `JwtAuth`

pub mod create;
pub mod list;
pub mod update;

pub use create::create_new_expense;
pub use list::get_expenses;
pub use update::update_expense;
