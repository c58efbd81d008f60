//! Unit tests for the session service

mod signup_tests;

use std::sync::Arc;

use crate::domain::entities::mail::MailType;
use crate::domain::entities::user::{NewUser, User};
use crate::repositories::{
    MailCodeRepository, MockMailCodeRepository, MockRevocationStore,
    MockUsedRefreshTokenRepository, MockUserRepository, UserRepository,
};
use crate::services::clock::ManualClock;
use crate::services::encryption::LinkCipher;
use crate::services::mail::{MailDispatcher, MailSettings, RecordingMailSender, VerificationMailService};
use crate::services::password::PasswordHasher;
use crate::services::revocation::RevocationLedger;
use crate::services::session::{SessionComponents, SessionService};
use crate::services::token::{TokenServiceConfig, TokenValidator};

/// T used by the timing scenarios
pub(super) const T: i64 = 1_700_000_000;

pub(super) const PASSWORD: &str = "s3cret-pass";

pub(super) struct Fixture {
    pub clock: Arc<ManualClock>,
    pub users: Arc<MockUserRepository>,
    pub codes: Arc<MockMailCodeRepository>,
    pub used_tokens: Arc<MockUsedRefreshTokenRepository>,
    pub cache: Arc<MockRevocationStore>,
    pub sender: Arc<RecordingMailSender>,
    pub cipher: Arc<LinkCipher>,
    pub ledger: Arc<RevocationLedger>,
    pub validator: TokenValidator,
    pub service: SessionService,
}

impl Fixture {
    pub fn new() -> Self {
        let clock = Arc::new(ManualClock::at_unix(T));
        let codes = Arc::new(MockMailCodeRepository::new());
        let users = Arc::new(MockUserRepository::new(codes.clone()));
        let used_tokens = Arc::new(MockUsedRefreshTokenRepository::new());
        let cache = Arc::new(MockRevocationStore::new());
        let sender = Arc::new(RecordingMailSender::new());
        let cipher = Arc::new(LinkCipher::with_key(&[11u8; 32]).unwrap());
        let config = TokenServiceConfig::default();

        let ledger = Arc::new(RevocationLedger::new(cache.clone(), config.clone(), clock.clone()));
        let mail = Arc::new(VerificationMailService::new(
            codes.clone(),
            cipher.clone(),
            MailDispatcher::new(sender.clone()),
            MailSettings::default(),
            clock.clone(),
        ));

        let service = SessionService::new(SessionComponents {
            users: users.clone(),
            used_tokens: used_tokens.clone(),
            ledger: ledger.clone(),
            mail,
            passwords: PasswordHasher::new(4),
            token_config: config.clone(),
            clock: clock.clone(),
        });

        Self {
            validator: TokenValidator::new(&config, clock.clone()),
            clock,
            users,
            codes,
            used_tokens,
            cache,
            sender,
            cipher,
            ledger,
            service,
        }
    }

    pub fn new_user(email: &str) -> NewUser {
        NewUser {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: email.to_string(),
            phone: "+6591234567".to_string(),
            password: PASSWORD.to_string(),
            user_role: None,
        }
    }

    /// Sign up a user and return the stored record
    pub async fn signed_up(&self, email: &str) -> User {
        self.service.signup(Self::new_user(email)).await.unwrap()
    }

    /// Sign up then log in, returning the logged-in record
    pub async fn logged_in(&self, email: &str) -> User {
        self.signed_up(email).await;
        self.service.login(email, PASSWORD).await.unwrap()
    }

    /// Plaintext code currently stored for (email, type)
    pub async fn stored_code(&self, email: &str, mail_type: MailType) -> String {
        self.codes.find(email, mail_type).await.unwrap().unwrap().code
    }

    pub async fn reload(&self, user_id: &str) -> User {
        self.users.find_by_id(user_id).await.unwrap().unwrap()
    }
}
