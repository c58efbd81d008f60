//! # Spendlog Core
//!
//! Core business logic and domain layer for the Spendlog backend.
//! This crate contains domain entities, business services, repository interfaces,
//! and error types that form the foundation of the application architecture.
//!
//! The `testing` feature exposes in-memory repositories and a manual clock so
//! the API crate can exercise the services without MongoDB or Redis.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;
