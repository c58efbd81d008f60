//! Transactional mail configuration (SendGrid)

use super::{optional, parsed, required, ConfigError};

/// SendGrid credentials, templates and the links embedded in mails
#[derive(Clone)]
pub struct MailConfig {
    /// SendGrid API key
    pub api_key: String,

    /// SendGrid API host, e.g. `https://api.sendgrid.com`
    pub api_host: String,

    /// SendGrid mail send endpoint, e.g. `/v3/mail/send`
    pub api_endpoint: String,

    /// Sender display name
    pub from_name: String,

    /// Sender address
    pub from_email: String,

    /// Dynamic template used for the signup verification mail
    pub verification_template_id: String,

    /// Dynamic template used for the password reset mail
    pub password_reset_template_id: String,

    /// Base URL the verification link points at
    pub verification_link_base: String,

    /// Base URL the password reset link points at
    pub password_reset_link_base: String,

    /// Lifetime of a verification code in hours
    pub verification_code_expiry_hours: i64,

    /// Lifetime of a password reset code in hours
    pub password_reset_code_expiry_hours: i64,
}

impl MailConfig {
    /// Create from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let verification_host = optional("VERIFICATION_MAIL_RETURN_HOST", "http://localhost");
        let verification_port = optional("VERIFICATION_MAIL_RETURN_PORT", "8000");
        let reset_host = optional("PASSWORD_RESET_MAIL_RETURN_HOST", "http://localhost");
        let reset_port = optional("PASSWORD_RESET_MAIL_RETURN_PORT", "3000");

        Ok(Self {
            api_key: required("SENDGRID_API_KEY")?,
            api_host: optional("SENDGRID_API_HOST", "https://api.sendgrid.com"),
            api_endpoint: optional("SENDGRID_API_ENDPOINT", "/v3/mail/send"),
            from_name: optional("SENDGRID_FROM_NAME", "Spendlog"),
            from_email: required("SENDGRID_FROM_EMAIL")?,
            verification_template_id: required("SENDGRID_MAIL_VERIFICATION_DYNAMIC_TEMPLATE_ID")?,
            password_reset_template_id: required(
                "SENDGRID_MAIL_PASSWORD_RESET_DYNAMIC_TEMPLATE_ID",
            )?,
            verification_link_base: format!("{}:{}", verification_host, verification_port),
            password_reset_link_base: format!("{}:{}", reset_host, reset_port),
            verification_code_expiry_hours: parsed("VERIFICATION_MAIL_CODE_EXPIRATION", 24)?,
            password_reset_code_expiry_hours: parsed("PASSWORD_RESET_MAIL_CODE_EXPIRATION", 1)?,
        })
    }

    /// Full URL of the SendGrid send endpoint
    pub fn send_url(&self) -> String {
        format!(
            "{}/{}",
            self.api_host.trim_end_matches('/'),
            self.api_endpoint.trim_start_matches('/')
        )
    }
}

impl std::fmt::Debug for MailConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MailConfig")
            .field("api_host", &self.api_host)
            .field("from_email", &self.from_email)
            .field("verification_template_id", &self.verification_template_id)
            .field("password_reset_template_id", &self.password_reset_template_id)
            .finish_non_exhaustive()
    }
}
