//! Unit tests for token validation

use chrono::Duration;
use std::sync::Arc;

use crate::errors::{DomainError, TokenError};
use crate::services::clock::ManualClock;
use crate::services::token::{TokenIssuer, TokenServiceConfig, TokenValidator};

use super::issuer_tests::identity;

const T: i64 = 1_700_000_000;

fn setup() -> (Arc<ManualClock>, TokenIssuer, TokenValidator) {
    let clock = Arc::new(ManualClock::at_unix(T));
    let config = TokenServiceConfig::default();
    let issuer = TokenIssuer::new(config.clone(), clock.clone());
    let validator = TokenValidator::new(&config, clock.clone());
    (clock, issuer, validator)
}

#[test]
fn test_access_token_expires_after_ttl() {
    let (clock, issuer, validator) = setup();
    let pair = issuer.issue(&identity()).unwrap();

    clock.advance(Duration::minutes(30));
    assert!(validator.validate_access(&pair.access_token).is_ok());

    clock.advance(Duration::minutes(31));
    assert!(matches!(
        validator.validate_access(&pair.access_token),
        Err(DomainError::Token(TokenError::Expired))
    ));

    // Refresh token outlives the access token
    assert!(validator.validate_refresh(&pair.refresh_token).is_ok());
}

#[test]
fn test_token_valid_at_exact_expiry() {
    let (clock, issuer, validator) = setup();
    let pair = issuer.issue(&identity()).unwrap();

    clock.advance(Duration::hours(1));
    assert!(validator.validate_access(&pair.access_token).is_ok());

    clock.advance(Duration::seconds(1));
    assert!(validator.validate_access(&pair.access_token).is_err());
}

#[test]
fn test_classes_do_not_cross_validate() {
    let (_clock, issuer, validator) = setup();
    let pair = issuer.issue(&identity()).unwrap();

    assert!(matches!(
        validator.validate_access(&pair.refresh_token),
        Err(DomainError::Token(TokenError::InvalidSignature))
    ));
    assert!(matches!(
        validator.validate_refresh(&pair.access_token),
        Err(DomainError::Token(TokenError::InvalidSignature))
    ));
}

#[test]
fn test_foreign_secret_and_garbage_are_invalid_signatures() {
    let (clock, _issuer, validator) = setup();
    let foreign = TokenIssuer::new(
        TokenServiceConfig {
            access_secret: "someone-else".to_string(),
            ..TokenServiceConfig::default()
        },
        clock,
    );
    let pair = foreign.issue(&identity()).unwrap();

    assert!(matches!(
        validator.validate_access(&pair.access_token),
        Err(DomainError::Token(TokenError::InvalidSignature))
    ));
    assert!(matches!(
        validator.validate_access("not.a.jwt"),
        Err(DomainError::Token(TokenError::InvalidSignature))
    ));
    assert!(validator.validate_access("").is_err());
}
