//! Expense recording and lookup for authenticated users

mod service;


pub use service::ExpenseService;
