//! Error types for authentication, session tokens and verification codes

use thiserror::Error;

/// Authentication-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Unknown email and wrong password share this variant
    #[error("email or password is incorrect")]
    InvalidCredentials,

    #[error("No authorization header provided")]
    Unauthenticated,

    #[error("user email already exists")]
    UserAlreadyExists,

    #[error("verification code does not match")]
    InvalidVerificationCode,

    #[error("verification mail has expired")]
    VerificationCodeExpired,
}

/// Token-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("invalid token")]
    InvalidSignature,

    #[error("token has expired")]
    Expired,

    /// Forced logout; clients see the same message as a natural expiry
    #[error("token has expired")]
    Revoked,

    #[error("refresh token has already been used")]
    AlreadyUsed,

    #[error("token generation failed")]
    GenerationFailed,
}
