//! Main session service implementation

use sha2::{Digest, Sha256};
use std::sync::Arc;
use tracing::{info, warn};

use sl_shared::validation::is_valid_email;

use crate::domain::entities::mail::MailType;
use crate::domain::entities::token::{
    AccessClaims, SessionIdentity, TokenClass, UsedRefreshToken,
};
use crate::domain::entities::user::{NewUser, User};
use crate::errors::{AuthError, DomainError, TokenError};
use crate::repositories::used_token::UsedRefreshTokenRepository;
use crate::repositories::user::{PasswordResetWrite, UserRepository};
use crate::services::clock::Clock;
use crate::services::mail::VerificationMailService;
use crate::services::password::PasswordHasher;
use crate::services::revocation::RevocationLedger;
use crate::services::token::{TokenIssuer, TokenServiceConfig, TokenValidator};

/// Everything the session service is composed from
pub struct SessionComponents {
    pub users: Arc<dyn UserRepository>,
    pub used_tokens: Arc<dyn UsedRefreshTokenRepository>,
    pub ledger: Arc<RevocationLedger>,
    pub mail: Arc<VerificationMailService>,
    pub passwords: PasswordHasher,
    pub token_config: TokenServiceConfig,
    pub clock: Arc<dyn Clock>,
}

/// Password reset submission
#[derive(Debug, Clone)]
pub struct PasswordReset {
    pub email: String,
    pub code: String,
    pub password: String,
    pub confirm_password: String,
}

/// Decrypted contents of a valid password reset link
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordResetGrant {
    pub email: String,
    pub code: String,
}

/// Extract the token from an `Authorization: Bearer <token>` header value
///
/// # Returns
/// * `Err(AuthError::Unauthenticated)` - Header absent or not a bearer credential
pub fn bearer_token(header: Option<&str>) -> Result<&str, DomainError> {
    let mut parts = header.unwrap_or_default().split_whitespace();

    match (parts.next(), parts.next(), parts.next()) {
        (Some(scheme), Some(token), None) if scheme.eq_ignore_ascii_case("Bearer") => Ok(token),
        _ => Err(AuthError::Unauthenticated.into()),
    }
}

/// Composes issuer, validator, ledger and the credential store into the
/// session workflows exposed to request handlers
pub struct SessionService {
    users: Arc<dyn UserRepository>,
    used_tokens: Arc<dyn UsedRefreshTokenRepository>,
    ledger: Arc<RevocationLedger>,
    mail: Arc<VerificationMailService>,
    passwords: PasswordHasher,
    issuer: TokenIssuer,
    validator: TokenValidator,
    clock: Arc<dyn Clock>,
}

impl SessionService {
    pub fn new(components: SessionComponents) -> Self {
        let SessionComponents {
            users,
            used_tokens,
            ledger,
            mail,
            passwords,
            token_config,
            clock,
        } = components;

        Self {
            issuer: TokenIssuer::new(token_config.clone(), clock.clone()),
            validator: TokenValidator::new(&token_config, clock.clone()),
            users,
            used_tokens,
            ledger,
            mail,
            passwords,
            clock,
        }
    }

    /// Register an unverified user, store its first token pair and mail a
    /// verification link
    pub async fn signup(&self, input: NewUser) -> Result<User, DomainError> {
        if !is_valid_email(&input.email) {
            return Err(DomainError::validation("email is not valid"));
        }

        if input.password.is_empty() {
            return Err(DomainError::validation("password is required"));
        }

        if self.users.count_by_email(&input.email).await? > 0 {
            return Err(AuthError::UserAlreadyExists.into());
        }

        let password_hash = self.passwords.hash(&input.password).await?;
        let now = self.clock.now_utc();
        let mut user = User::new(input, password_hash, now);

        let pair = self.issuer.issue(&SessionIdentity::from(&user))?;
        user.set_tokens(&pair, now);

        let user = self.users.insert(user).await?;
        info!(user_id = %user.user_id, "user signed up");

        // The account exists from here on; a mail failure is only logged
        if let Err(e) = self.mail.send_code(&user, MailType::MailVerification).await {
            warn!(user_id = %user.user_id, error = %e, "verification mail not sent");
        }

        Ok(user)
    }

    /// Authenticate with email and password
    ///
    /// Unknown email and wrong password fail identically.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, DomainError> {
        let user = match self.users.find_by_email(email).await? {
            Some(user) => user,
            None => return Err(AuthError::InvalidCredentials.into()),
        };

        if !self.passwords.verify(password, &user.password).await? {
            warn!(user_id = %user.user_id, "login rejected");
            return Err(AuthError::InvalidCredentials.into());
        }

        let user = self.issue_and_persist(&user).await?;
        info!(user_id = %user.user_id, "user logged in");
        Ok(user)
    }

    /// Exchange a refresh token for a new pair
    ///
    /// The presented token is recorded as used before the new pair is issued,
    /// so each refresh token can be exchanged once.
    pub async fn refresh(&self, refresh_token: &str) -> Result<User, DomainError> {
        let claims = self.validator.validate_refresh(refresh_token)?;

        let marker = self.ledger.lookup_class(TokenClass::Refresh, &claims.sub).await?;
        if RevocationLedger::is_revoked(claims.exp, marker) {
            warn!(user_id = %claims.sub, "revoked refresh token presented");
            return Err(TokenError::Revoked.into());
        }

        if self.used_tokens.exists(&claims.jti).await? {
            warn!(user_id = %claims.sub, "refresh token replayed");
            return Err(TokenError::AlreadyUsed.into());
        }

        let user = self
            .users
            .find_by_id(&claims.sub)
            .await?
            .ok_or_else(|| DomainError::not_found("user"))?;

        self.used_tokens
            .insert(UsedRefreshToken {
                token_id: claims.jti,
                refresh_token: hash_token(refresh_token),
                issued_at_unix: claims.iat,
                expired_at_unix: claims.exp,
            })
            .await?;

        let user = self.issue_and_persist(&user).await?;
        info!(user_id = %user.user_id, "tokens refreshed");
        Ok(user)
    }

    /// Authorize a request from its `Authorization` header value
    pub async fn authorize(&self, header: Option<&str>) -> Result<AccessClaims, DomainError> {
        let token = bearer_token(header)?;
        let claims = self.validator.validate_access(token)?;

        let marker = self.ledger.lookup_class(TokenClass::Access, &claims.sub).await?;
        if RevocationLedger::is_revoked(claims.exp, marker) {
            warn!(user_id = %claims.sub, "revoked access token presented");
            return Err(TokenError::Revoked.into());
        }

        Ok(claims)
    }

    /// Confirm an email address from the encrypted link parameters and
    /// issue a pair whose claims reflect the verified address
    pub async fn verify_email(
        &self,
        encrypted_email: &str,
        encrypted_code: &str,
    ) -> Result<User, DomainError> {
        let code = self
            .mail
            .check_link(encrypted_email, encrypted_code, MailType::MailVerification)
            .await?;

        let user = self
            .users
            .find_by_email(&code.email)
            .await?
            .ok_or_else(|| DomainError::not_found("user"))?;

        self.users
            .mark_email_verified(&user.user_id, &code.mail_id, self.clock.now_utc())
            .await?;

        let verified = self
            .users
            .find_by_id(&user.user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("user"))?;

        let verified = self.issue_and_persist(&verified).await?;
        info!(user_id = %verified.user_id, "email verified");
        Ok(verified)
    }

    /// Mail a password reset link to a registered address
    pub async fn request_password_reset(&self, email: &str) -> Result<(), DomainError> {
        if !is_valid_email(email) {
            return Err(DomainError::validation("email is not valid"));
        }

        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or_else(|| DomainError::not_found("user"))?;

        drop(self.mail.send_code(&user, MailType::PasswordReset).await?);
        info!(user_id = %user.user_id, "password reset requested");
        Ok(())
    }

    /// Check a password reset link and return what it grants
    pub async fn verify_password_reset(
        &self,
        encrypted_email: &str,
        encrypted_code: &str,
    ) -> Result<PasswordResetGrant, DomainError> {
        let code = self
            .mail
            .check_link(encrypted_email, encrypted_code, MailType::PasswordReset)
            .await?;

        Ok(PasswordResetGrant {
            email: code.email,
            code: code.code,
        })
    }

    /// Replace the password, consume the reset code and revoke every
    /// outstanding token of the user, all or nothing
    pub async fn reset_password(&self, reset: PasswordReset) -> Result<(), DomainError> {
        if reset.password.is_empty() {
            return Err(DomainError::validation("password is required"));
        }

        if reset.password != reset.confirm_password {
            return Err(DomainError::validation("passwords do not match"));
        }

        let code = self
            .mail
            .check_code(&reset.email, &reset.code, MailType::PasswordReset)
            .await?;

        let user = self
            .users
            .find_by_email(&reset.email)
            .await?
            .ok_or_else(|| DomainError::not_found("user"))?;

        let password_hash = self.passwords.hash(&reset.password).await?;
        let write = PasswordResetWrite {
            email: user.email.clone(),
            password_hash,
            mail_id: code.mail_id,
            updated_at: self.clock.now_utc(),
        };

        self.users
            .reset_password(write, self.ledger.revoke_owned(user.user_id.clone()))
            .await?;

        info!(user_id = %user.user_id, "password reset");
        Ok(())
    }

    /// Issue a pair for `user`, upsert it onto the record and return the
    /// re-read record
    async fn issue_and_persist(&self, user: &User) -> Result<User, DomainError> {
        let pair = self.issuer.issue(&SessionIdentity::from(user))?;
        self.users
            .update_tokens(&user.user_id, &pair, self.clock.now_utc())
            .await?;

        self.users
            .find_by_id(&user.user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("user"))
    }
}

/// SHA-256 hex digest of a signed token
pub(crate) fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}
