//! Shared harness: the real app over in-memory stores and a manual clock

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use actix_web::{body::MessageBody, dev::ServiceResponse, http::StatusCode, test, web};
use serde_json::{json, Value};

use sl_api::app::AppState;
use sl_core::domain::entities::MailType;
use sl_core::repositories::{
    MockExpenseRepository, MockMailCodeRepository, MockRevocationStore,
    MockUsedRefreshTokenRepository, MockUserRepository,
};
use sl_core::services::{
    ExpenseService, LinkCipher, MailDispatcher, MailRequest, MailSettings, ManualClock,
    PasswordHasher, RecordingMailSender, RevocationLedger, SessionComponents, SessionService,
    TokenServiceConfig, VerificationMailService,
};

/// 2023-11-14 22:13:20 UTC
pub const T: i64 = 1_700_000_000;

pub const PASSWORD: &str = "s3cret-pass";

pub struct TestHarness {
    pub clock: Arc<ManualClock>,
    pub users: Arc<MockUserRepository>,
    pub used_tokens: Arc<MockUsedRefreshTokenRepository>,
    pub cache: Arc<MockRevocationStore>,
    pub sender: Arc<RecordingMailSender>,
    pub expenses: Arc<MockExpenseRepository>,
    pub state: web::Data<AppState>,
}

impl TestHarness {
    pub fn new() -> Self {
        let clock = Arc::new(ManualClock::at_unix(T));
        let codes = Arc::new(MockMailCodeRepository::new());
        let users = Arc::new(MockUserRepository::new(codes.clone()));
        let used_tokens = Arc::new(MockUsedRefreshTokenRepository::new());
        let cache = Arc::new(MockRevocationStore::new());
        let sender = Arc::new(RecordingMailSender::new());
        let expenses = Arc::new(MockExpenseRepository::new());
        let cipher = Arc::new(LinkCipher::with_key(&[11u8; 32]).unwrap());
        let config = TokenServiceConfig::default();

        let ledger = Arc::new(RevocationLedger::new(
            cache.clone(),
            config.clone(),
            clock.clone(),
        ));
        let mail = Arc::new(VerificationMailService::new(
            codes,
            cipher,
            MailDispatcher::new(sender.clone()),
            MailSettings::default(),
            clock.clone(),
        ));

        let sessions = SessionService::new(SessionComponents {
            users: users.clone(),
            used_tokens: used_tokens.clone(),
            ledger,
            mail,
            passwords: PasswordHasher::new(4),
            token_config: config,
            clock: clock.clone(),
        });
        let expense_service = ExpenseService::new(expenses.clone(), clock.clone());

        let state = web::Data::new(AppState::new(
            Arc::new(sessions),
            Arc::new(expense_service),
        ));

        Self {
            clock,
            users,
            used_tokens,
            cache,
            sender,
            expenses,
            state,
        }
    }

    /// Wait for the background dispatcher to deliver `count` mails
    pub async fn wait_for_mails(&self, count: usize) -> Vec<MailRequest> {
        for _ in 0..100 {
            let sent = self.sender.sent().await;
            if sent.len() >= count {
                return sent;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!("expected {} mails to be delivered", count);
    }

    /// Query string (`email=..&code=..`) of the latest mail of `mail_type`
    pub async fn link_query(&self, mail_type: MailType, count: usize) -> String {
        let mail = self
            .wait_for_mails(count)
            .await
            .into_iter()
            .rev()
            .find(|mail| mail.mail_type == mail_type)
            .expect("mail of the requested type");

        let link = mail
            .template_data
            .values()
            .find(|value| value.contains("?email="))
            .expect("link in template data")
            .clone();

        link.split_once('?').expect("query string").1.to_string()
    }
}

pub fn signup_body(email: &str) -> Value {
    json!({
        "first_name": "Ada",
        "last_name": "Lovelace",
        "email": email,
        "phone": "+61400000000",
        "password": PASSWORD,
    })
}

pub fn post(uri: &str, body: Value) -> test::TestRequest {
    test::TestRequest::post().uri(uri).set_json(body)
}

pub fn login_request(email: &str, password: &str) -> test::TestRequest {
    post(
        "/api/auth/login",
        json!({ "email": email, "password": password }),
    )
}

pub fn bearer(user: &Value) -> String {
    format!("Bearer {}", user["access_token"].as_str().unwrap())
}

/// Status and JSON body of a response; non-JSON bodies read as `Null`
pub async fn read_json<B: MessageBody>(resp: ServiceResponse<B>) -> (StatusCode, Value) {
    let status = resp.status();
    let bytes = test::read_body(resp).await;
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

/// Status and JSON body of an error raised by middleware
pub async fn error_json(err: actix_web::Error) -> (StatusCode, Value) {
    let resp = err.error_response();
    let status = resp.status();
    let bytes = actix_web::body::to_bytes(resp.into_body())
        .await
        .unwrap_or_default();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

/// Run a request built from a `TestRequest` and read its JSON response
macro_rules! call_json {
    ($app:expr, $req:expr) => {
        async {
            match actix_web::test::try_call_service($app, $req.to_request()).await {
                Ok(resp) => $crate::common::read_json(resp).await,
                Err(err) => $crate::common::error_json(err).await,
            }
        }
    };
}

/// Sign up and log in, yielding the login response body
macro_rules! sign_in {
    ($app:expr, $email:expr) => {{
        let (status, _) = call_json!(
            $app,
            $crate::common::post("/api/auth/signup", $crate::common::signup_body($email))
        )
        .await;
        assert_eq!(status, actix_web::http::StatusCode::OK);

        let (status, body) = call_json!(
            $app,
            $crate::common::login_request($email, $crate::common::PASSWORD)
        )
        .await;
        assert_eq!(status, actix_web::http::StatusCode::OK);
        body
    }};
}
