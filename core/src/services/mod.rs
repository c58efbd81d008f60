//! Business services containing domain logic and use cases.

pub mod clock;
pub mod encryption;
pub mod expense;
pub mod mail;
pub mod password;
pub mod revocation;
pub mod session;
pub mod sweeper;
pub mod token;

// Re-export commonly used types
pub use clock::{Clock, SystemClock};
pub use encryption::LinkCipher;
pub use expense::ExpenseService;
pub use mail::{
    MailDelivery, MailDispatcher, MailRequest, MailSender, MailSettings, VerificationMailService,
};
pub use password::PasswordHasher;
pub use revocation::RevocationLedger;
pub use session::{PasswordReset, PasswordResetGrant, SessionComponents, SessionService};
pub use sweeper::{ExpirationSweeper, SweepResult, SweeperSchedule};
pub use token::{TokenIssuer, TokenServiceConfig, TokenValidator};

#[cfg(any(test, feature = "testing"))]
pub use clock::ManualClock;
#[cfg(any(test, feature = "testing"))]
pub use mail::RecordingMailSender;
