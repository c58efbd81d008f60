//! Repository interfaces over the credential store (MongoDB) and the
//! revocation cache (Redis), with in-memory implementations for tests.

pub mod expense;
pub mod mail_code;
pub mod revocation;
pub mod used_token;
pub mod user;

pub use expense::ExpenseRepository;
pub use mail_code::MailCodeRepository;
pub use revocation::{RevocationEntry, RevocationStore};
pub use used_token::UsedRefreshTokenRepository;
pub use user::{PasswordResetWrite, RevocationWrite, UserRepository};

#[cfg(any(test, feature = "testing"))]
pub use expense::MockExpenseRepository;
#[cfg(any(test, feature = "testing"))]
pub use mail_code::MockMailCodeRepository;
#[cfg(any(test, feature = "testing"))]
pub use revocation::MockRevocationStore;
#[cfg(any(test, feature = "testing"))]
pub use used_token::MockUsedRefreshTokenRepository;
#[cfg(any(test, feature = "testing"))]
pub use user::MockUserRepository;
