//! SendGrid v3 mail send implementation
//!
//! Every mail is a dynamic template send with one recipient. The template id
//! is chosen by mail type; template data is passed through untouched.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::{debug, error};

use sl_core::domain::entities::MailType;
use sl_core::errors::DomainError;
use sl_core::services::{MailRequest, MailSender};
use sl_shared::MailConfig;

use crate::InfrastructureError;

#[derive(Debug, Serialize, PartialEq)]
pub(crate) struct Address<'a> {
    pub email: &'a str,
    pub name: &'a str,
}

#[derive(Debug, Serialize, PartialEq)]
pub(crate) struct Personalization<'a> {
    pub to: Vec<Address<'a>>,
    pub dynamic_template_data: &'a HashMap<String, String>,
}

/// Body of `POST /v3/mail/send`
#[derive(Debug, Serialize, PartialEq)]
pub(crate) struct SendGridPayload<'a> {
    pub from: Address<'a>,
    pub template_id: &'a str,
    pub personalizations: Vec<Personalization<'a>>,
}

/// SendGrid-backed MailSender
pub struct SendGridMailSender {
    http: Client,
    config: MailConfig,
    send_url: String,
}

impl SendGridMailSender {
    /// Build a sender whose requests are bounded by `timeout`
    pub fn new(config: MailConfig, timeout: Duration) -> Result<Self, InfrastructureError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            send_url: config.send_url(),
            http,
            config,
        })
    }

    fn template_id(&self, mail_type: MailType) -> &str {
        match mail_type {
            MailType::MailVerification => &self.config.verification_template_id,
            MailType::PasswordReset => &self.config.password_reset_template_id,
        }
    }

    pub(crate) fn payload<'a>(&'a self, request: &'a MailRequest) -> SendGridPayload<'a> {
        SendGridPayload {
            from: Address {
                email: &self.config.from_email,
                name: &self.config.from_name,
            },
            template_id: self.template_id(request.mail_type),
            personalizations: vec![Personalization {
                to: vec![Address {
                    email: &request.to_email,
                    name: &request.to_name,
                }],
                dynamic_template_data: &request.template_data,
            }],
        }
    }

    async fn post(&self, request: &MailRequest) -> Result<(), InfrastructureError> {
        let response = self
            .http
            .post(&self.send_url)
            .bearer_auth(&self.config.api_key)
            .json(&self.payload(request))
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            debug!("SendGrid accepted {} mail with status {}", request.mail_type, status);
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        error!("SendGrid rejected {} mail: {} {}", request.mail_type, status, body);
        Err(InfrastructureError::Mail(format!("status {}: {}", status, body)))
    }
}

#[async_trait]
impl MailSender for SendGridMailSender {
    async fn send(&self, request: &MailRequest) -> Result<(), DomainError> {
        Ok(self.post(request).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> MailConfig {
        MailConfig {
            api_key: "SG.key".to_string(),
            api_host: "https://api.sendgrid.com".to_string(),
            api_endpoint: "/v3/mail/send".to_string(),
            from_name: "Spendlog".to_string(),
            from_email: "noreply@spendlog.test".to_string(),
            verification_template_id: "d-verify".to_string(),
            password_reset_template_id: "d-reset".to_string(),
            verification_link_base: "http://localhost:8000".to_string(),
            password_reset_link_base: "http://localhost:3000".to_string(),
            verification_code_expiry_hours: 24,
            password_reset_code_expiry_hours: 1,
        }
    }

    fn request(mail_type: MailType) -> MailRequest {
        let mut template_data = HashMap::new();
        template_data.insert("Full_Name".to_string(), "Ada Lovelace".to_string());
        MailRequest {
            mail_type,
            to_name: "Ada Lovelace".to_string(),
            to_email: "ada@example.com".to_string(),
            template_data,
        }
    }

    #[test]
    fn test_template_follows_mail_type() {
        let sender = SendGridMailSender::new(config(), Duration::from_secs(5)).unwrap();

        let verify = request(MailType::MailVerification);
        assert_eq!(sender.payload(&verify).template_id, "d-verify");

        let reset = request(MailType::PasswordReset);
        assert_eq!(sender.payload(&reset).template_id, "d-reset");
    }

    #[test]
    fn test_payload_json_shape() {
        let sender = SendGridMailSender::new(config(), Duration::from_secs(5)).unwrap();
        let req = request(MailType::MailVerification);

        let json = serde_json::to_value(sender.payload(&req)).unwrap();

        assert_eq!(json["from"]["email"], "noreply@spendlog.test");
        assert_eq!(json["from"]["name"], "Spendlog");
        assert_eq!(json["template_id"], "d-verify");
        assert_eq!(json["personalizations"][0]["to"][0]["email"], "ada@example.com");
        assert_eq!(
            json["personalizations"][0]["dynamic_template_data"]["Full_Name"],
            "Ada Lovelace"
        );
    }

    #[test]
    fn test_send_url_joins_host_and_endpoint() {
        let sender = SendGridMailSender::new(config(), Duration::from_secs(5)).unwrap();
        assert_eq!(sender.send_url, "https://api.sendgrid.com/v3/mail/send");
    }
}
