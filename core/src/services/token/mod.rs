//! Token service module for JWT management
//!
//! This module handles all token-related operations including:
//! - Access and refresh token issuance (HS256, one secret per class)
//! - Signature and expiry validation against the injected clock

mod config;
mod issuer;
mod validator;

#[cfg(test)]
mod tests;

pub use config::TokenServiceConfig;
pub use issuer::TokenIssuer;
pub use validator::TokenValidator;
