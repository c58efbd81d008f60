//! Session service: login, refresh, authorization and the account flows
//! that issue or revoke tokens (signup, email verification, password reset)

mod service;

#[cfg(test)]
mod tests;

pub use service::{
    bearer_token, PasswordReset, PasswordResetGrant, SessionComponents, SessionService,
};
