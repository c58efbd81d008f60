//! Transactional mail: emailed codes, encrypted links and fire-and-forget
//! dispatch

mod code;
mod dispatcher;
mod verification;

pub use code::generate_code;
pub use dispatcher::{MailDelivery, MailDispatcher, MailRequest, MailSender};
pub use verification::{MailSettings, VerificationMailService};

#[cfg(any(test, feature = "testing"))]
pub use dispatcher::RecordingMailSender;
