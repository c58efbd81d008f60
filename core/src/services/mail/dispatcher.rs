//! Mail sender seam and the background dispatcher

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::domain::entities::mail::MailType;
use crate::errors::DomainError;

/// One templated mail to one recipient
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailRequest {
    pub mail_type: MailType,
    pub to_name: String,
    pub to_email: String,
    /// Values substituted into the provider's dynamic template
    pub template_data: HashMap<String, String>,
}

/// Delivers a mail through an external provider
#[async_trait]
pub trait MailSender: Send + Sync {
    async fn send(&self, request: &MailRequest) -> Result<(), DomainError>;
}

/// Outcome of a dispatched mail
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MailDelivery {
    Sent {
        mail_type: MailType,
    },
    Failed {
        mail_type: MailType,
        reason: String,
    },
}

impl MailDelivery {
    pub fn is_sent(&self) -> bool {
        matches!(self, MailDelivery::Sent { .. })
    }
}

/// Spawns mail sends so request handlers never wait on the provider
#[derive(Clone)]
pub struct MailDispatcher {
    sender: Arc<dyn MailSender>,
}

impl MailDispatcher {
    pub fn new(sender: Arc<dyn MailSender>) -> Self {
        Self { sender }
    }

    /// Send in a background task; the outcome is logged and also returned
    /// through the handle for callers that want it
    pub fn dispatch(&self, request: MailRequest) -> JoinHandle<MailDelivery> {
        let sender = Arc::clone(&self.sender);

        tokio::spawn(async move {
            let mail_type = request.mail_type;
            match sender.send(&request).await {
                Ok(()) => {
                    info!(mail_type = %mail_type, "mail sent");
                    MailDelivery::Sent { mail_type }
                }
                Err(e) => {
                    warn!(mail_type = %mail_type, error = %e, "mail delivery failed");
                    MailDelivery::Failed {
                        mail_type,
                        reason: e.to_string(),
                    }
                }
            }
        })
    }
}

#[cfg(any(test, feature = "testing"))]
pub use recording::RecordingMailSender;

#[cfg(any(test, feature = "testing"))]
mod recording {
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, Ordering};
    use tokio::sync::Mutex;

    use super::{MailRequest, MailSender};
    use crate::errors::DomainError;

    /// Keeps every request instead of sending it
    #[derive(Default)]
    pub struct RecordingMailSender {
        sent: Mutex<Vec<MailRequest>>,
        fail: AtomicBool,
    }

    impl RecordingMailSender {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn set_fail(&self, fail: bool) {
            self.fail.store(fail, Ordering::SeqCst);
        }

        pub async fn sent(&self) -> Vec<MailRequest> {
            self.sent.lock().await.clone()
        }
    }

    #[async_trait]
    impl MailSender for RecordingMailSender {
        async fn send(&self, request: &MailRequest) -> Result<(), DomainError> {
            if self.fail.load(Ordering::SeqCst) {
                return Err(DomainError::StoreUnavailable {
                    message: "mail provider rejected the request".to_string(),
                });
            }
            self.sent.lock().await.push(request.clone());
            Ok(())
        }
    }
}
