//! Handlers behind the links mailed through SendGrid

pub mod password_reset;
pub mod verification;

pub use password_reset::{send_password_reset_mail, verify_password_reset_mail};
pub use verification::verify_verification_mail;
