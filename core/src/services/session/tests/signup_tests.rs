//! Signup and email verification

use tokio::task::yield_now;

use crate::domain::entities::mail::MailType;
use crate::domain::entities::user::UserRole;
use crate::errors::{AuthError, DomainError};
use crate::repositories::MailCodeRepository;

use super::{Fixture, PASSWORD};

#[tokio::test]
async fn test_signup_creates_unverified_user_with_tokens() {
    let f = Fixture::new();
    let user = f.signed_up("ada@example.com").await;

    assert_eq!(user.user_role, UserRole::User);
    assert!(!user.is_email_verified);
    assert_ne!(user.password, PASSWORD);
    assert!(!user.access_token.is_empty());

    let claims = f.validator.validate_access(&user.access_token).unwrap();
    assert_eq!(claims.sub, user.user_id);
    assert!(!claims.is_email_verified);

    assert!(f
        .codes
        .find("ada@example.com", MailType::MailVerification)
        .await
        .unwrap()
        .is_some());
}

#[tokio::test]
async fn test_signup_dispatches_verification_mail() {
    let f = Fixture::new();
    f.signed_up("ada@example.com").await;

    // Dispatch runs on a spawned task
    for _ in 0..10 {
        if !f.sender.sent().await.is_empty() {
            break;
        }
        yield_now().await;
    }

    let sent = f.sender.sent().await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].mail_type, MailType::MailVerification);
    assert_eq!(sent[0].to_email, "ada@example.com");
}

#[tokio::test]
async fn test_signup_rejects_duplicate_and_malformed_email() {
    let f = Fixture::new();
    f.signed_up("ada@example.com").await;

    assert!(matches!(
        f.service.signup(Fixture::new_user("ada@example.com")).await,
        Err(DomainError::Auth(AuthError::UserAlreadyExists))
    ));
    assert!(matches!(
        f.service.signup(Fixture::new_user("not-an-email")).await,
        Err(DomainError::Validation { .. })
    ));
    assert_eq!(f.users.len().await, 1);
}

#[tokio::test]
async fn test_signup_survives_failed_code_write() {
    let f = Fixture::new();
    f.codes.set_fail_writes(true);

    let user = f.signed_up("ada@example.com").await;
    assert!(!user.is_email_verified);
    assert_eq!(f.users.len().await, 1);

    f.codes.set_fail_writes(false);
    assert!(f
        .codes
        .find("ada@example.com", MailType::MailVerification)
        .await
        .unwrap()
        .is_none());
    assert!(f.sender.sent().await.is_empty());

    // A retry reports the existing account rather than a store failure
    assert!(matches!(
        f.service.signup(Fixture::new_user("ada@example.com")).await,
        Err(DomainError::Auth(AuthError::UserAlreadyExists))
    ));
}

#[tokio::test]
async fn test_verify_email_marks_verified_and_consumes_code() {
    let f = Fixture::new();
    let user = f.signed_up("ada@example.com").await;
    let code = f.stored_code("ada@example.com", MailType::MailVerification).await;

    let email = f.cipher.encrypt("ada@example.com").unwrap();
    let sealed_code = f.cipher.encrypt(&code).unwrap();

    let verified = f.service.verify_email(&email, &sealed_code).await.unwrap();
    assert!(verified.is_email_verified);
    assert_eq!(verified.user_id, user.user_id);

    let claims = f.validator.validate_access(&verified.access_token).unwrap();
    assert!(claims.is_email_verified);

    assert!(f
        .codes
        .find("ada@example.com", MailType::MailVerification)
        .await
        .unwrap()
        .is_none());

    // Second use of the same link finds nothing
    assert!(matches!(
        f.service.verify_email(&email, &sealed_code).await,
        Err(DomainError::NotFound { .. })
    ));
}

#[tokio::test]
async fn test_verify_email_with_wrong_code_changes_nothing() {
    let f = Fixture::new();
    let user = f.signed_up("ada@example.com").await;
    let code = f.stored_code("ada@example.com", MailType::MailVerification).await;
    let wrong = if code == "999999" { "000000" } else { "999999" };

    let result = f
        .service
        .verify_email(
            &f.cipher.encrypt("ada@example.com").unwrap(),
            &f.cipher.encrypt(wrong).unwrap(),
        )
        .await;

    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::InvalidVerificationCode))
    ));
    assert!(!f.reload(&user.user_id).await.is_email_verified);
}
