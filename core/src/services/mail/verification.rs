//! Emailed codes for email verification and password reset

use chrono::Duration;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::info;

use sl_shared::MailConfig;

use crate::domain::entities::mail::{MailCode, MailType};
use crate::domain::entities::user::User;
use crate::errors::{AuthError, DomainError};
use crate::repositories::mail_code::MailCodeRepository;
use crate::services::clock::Clock;
use crate::services::encryption::LinkCipher;

use super::code::generate_code;
use super::dispatcher::{MailDelivery, MailDispatcher, MailRequest};

/// Route the verification link lands on
pub const VERIFY_MAIL_PATH: &str = "/api/send-grid/verify-verification-mail";

/// Front-end page the password reset link lands on
pub const PASSWORD_RESET_PATH: &str = "/reset-password";

/// Link targets and code lifetimes
#[derive(Debug, Clone)]
pub struct MailSettings {
    pub verification_link_base: String,
    pub password_reset_link_base: String,
    pub verification_code_lifetime: Duration,
    pub password_reset_code_lifetime: Duration,
}

impl Default for MailSettings {
    fn default() -> Self {
        Self {
            verification_link_base: "http://localhost:8000".to_string(),
            password_reset_link_base: "http://localhost:3000".to_string(),
            verification_code_lifetime: Duration::hours(24),
            password_reset_code_lifetime: Duration::hours(1),
        }
    }
}

impl From<&MailConfig> for MailSettings {
    fn from(config: &MailConfig) -> Self {
        Self {
            verification_link_base: config.verification_link_base.clone(),
            password_reset_link_base: config.password_reset_link_base.clone(),
            verification_code_lifetime: Duration::hours(config.verification_code_expiry_hours),
            password_reset_code_lifetime: Duration::hours(config.password_reset_code_expiry_hours),
        }
    }
}

/// Issues and checks emailed codes
pub struct VerificationMailService {
    codes: Arc<dyn MailCodeRepository>,
    cipher: Arc<LinkCipher>,
    dispatcher: MailDispatcher,
    settings: MailSettings,
    clock: Arc<dyn Clock>,
}

impl VerificationMailService {
    pub fn new(
        codes: Arc<dyn MailCodeRepository>,
        cipher: Arc<LinkCipher>,
        dispatcher: MailDispatcher,
        settings: MailSettings,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            codes,
            cipher,
            dispatcher,
            settings,
            clock,
        }
    }

    /// Store a fresh code for `user` and dispatch the mail carrying its link
    ///
    /// The mail is sent in the background; the returned handle resolves to
    /// the delivery outcome and may be dropped.
    pub async fn send_code(
        &self,
        user: &User,
        mail_type: MailType,
    ) -> Result<JoinHandle<MailDelivery>, DomainError> {
        let lifetime = match mail_type {
            MailType::MailVerification => self.settings.verification_code_lifetime,
            MailType::PasswordReset => self.settings.password_reset_code_lifetime,
        };

        let code = MailCode::new(
            user.email.clone(),
            generate_code(),
            mail_type,
            self.clock.now_utc(),
            lifetime,
        );
        let stored = self.codes.upsert(code).await?;
        info!(user_id = %user.user_id, mail_type = %mail_type, "mail code stored");

        let link = self.build_link(mail_type, &stored)?;
        let link_key = match mail_type {
            MailType::MailVerification => "Verify_Mail_Link",
            MailType::PasswordReset => "Password_Reset_Mail_Link",
        };

        let mut template_data = HashMap::new();
        template_data.insert("Full_Name".to_string(), user.full_name());
        template_data.insert(link_key.to_string(), link);

        Ok(self.dispatcher.dispatch(MailRequest {
            mail_type,
            to_name: user.full_name(),
            to_email: user.email.clone(),
            template_data,
        }))
    }

    /// Decrypt link parameters and check the code they carry
    ///
    /// # Returns
    /// * `Ok(MailCode)` - The matching, unexpired record
    pub async fn check_link(
        &self,
        encrypted_email: &str,
        encrypted_code: &str,
        mail_type: MailType,
    ) -> Result<MailCode, DomainError> {
        let email = self.cipher.decrypt(encrypted_email)?;
        let code = self.cipher.decrypt(encrypted_code)?;
        self.check_code(&email, &code, mail_type).await
    }

    /// Check a plaintext code against the stored record
    pub async fn check_code(
        &self,
        email: &str,
        code: &str,
        mail_type: MailType,
    ) -> Result<MailCode, DomainError> {
        let stored = self
            .codes
            .find(email, mail_type)
            .await?
            .ok_or_else(|| DomainError::not_found("mail code"))?;

        if !stored.matches(code) {
            return Err(AuthError::InvalidVerificationCode.into());
        }

        if stored.is_expired(self.clock.now_utc()) {
            return Err(AuthError::VerificationCodeExpired.into());
        }

        Ok(stored)
    }

    fn build_link(&self, mail_type: MailType, code: &MailCode) -> Result<String, DomainError> {
        let (base, path) = match mail_type {
            MailType::MailVerification => (&self.settings.verification_link_base, VERIFY_MAIL_PATH),
            MailType::PasswordReset => (&self.settings.password_reset_link_base, PASSWORD_RESET_PATH),
        };

        Ok(format!(
            "{}{}?email={}&code={}",
            base.trim_end_matches('/'),
            path,
            self.cipher.encrypt(&code.email)?,
            self.cipher.encrypt(&code.code)?,
        ))
    }
}
