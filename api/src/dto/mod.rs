pub mod auth;
pub mod expense;

pub use auth::*;
pub use expense::*;
