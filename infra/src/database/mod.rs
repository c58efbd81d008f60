//! Database module - MongoDB implementations
//!
//! This module provides the document store layer:
//! - Client and database handle management
//! - Document mappings for each collection
//! - Repository implementations, including multi-document transactions

pub mod connection;
pub mod documents;
pub mod mongo;

#[cfg(test)]
mod tests;

pub use connection::{MongoConnection, EXPENSE_COLLECTION, MAIL_COLLECTION, USED_REFRESH_TOKEN_COLLECTION, USER_COLLECTION};
pub use mongo::{
    MongoExpenseRepository, MongoMailCodeRepository, MongoUsedRefreshTokenRepository,
    MongoUserRepository,
};
