//! Translation of domain failures into HTTP responses
//!
//! Every error body is the shared `ErrorResponse`: `{error, message, timestamp}`
//! plus optional field details for validation failures.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use tracing::{error, warn};

use sl_core::errors::{AuthError, DomainError, TokenError};
use sl_shared::{error_codes, ErrorResponse};

const INTERNAL_MESSAGE: &str = "An internal error occurred";

/// Error type returned by handlers and middleware
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("invalid request")]
    Validation(#[from] validator::ValidationErrors),

    /// Malformed body or query string
    #[error("{0}")]
    BadRequest(String),
}

/// Status, error code and client-facing message for a domain error
pub fn classify(error: &DomainError) -> (StatusCode, &'static str, String) {
    match error {
        DomainError::Validation { message } => (
            StatusCode::BAD_REQUEST,
            error_codes::VALIDATION_ERROR,
            message.clone(),
        ),
        DomainError::NotFound { resource } => (
            StatusCode::NOT_FOUND,
            error_codes::NOT_FOUND,
            format!("{} not found", resource),
        ),
        DomainError::StoreTimeout { .. } => (
            StatusCode::GATEWAY_TIMEOUT,
            error_codes::STORE_TIMEOUT,
            "store operation timed out".to_string(),
        ),
        DomainError::StoreUnavailable { .. } => (
            StatusCode::SERVICE_UNAVAILABLE,
            error_codes::STORE_UNAVAILABLE,
            "store is unavailable".to_string(),
        ),
        DomainError::Configuration { .. } | DomainError::Internal { .. } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            error_codes::INTERNAL_ERROR,
            INTERNAL_MESSAGE.to_string(),
        ),
        DomainError::Auth(auth) => classify_auth(auth),
        DomainError::Token(token) => classify_token(token),
    }
}

fn classify_auth(error: &AuthError) -> (StatusCode, &'static str, String) {
    let (status, code) = match error {
        AuthError::InvalidCredentials => (StatusCode::UNAUTHORIZED, error_codes::INVALID_CREDENTIALS),
        AuthError::Unauthenticated => (StatusCode::UNAUTHORIZED, error_codes::UNAUTHORIZED),
        AuthError::UserAlreadyExists => (StatusCode::CONFLICT, error_codes::CONFLICT),
        AuthError::InvalidVerificationCode => {
            (StatusCode::BAD_REQUEST, error_codes::VERIFICATION_CODE_INVALID)
        }
        AuthError::VerificationCodeExpired => {
            (StatusCode::BAD_REQUEST, error_codes::VERIFICATION_CODE_EXPIRED)
        }
    };
    (status, code, error.to_string())
}

fn classify_token(error: &TokenError) -> (StatusCode, &'static str, String) {
    let (status, code) = match error {
        TokenError::InvalidSignature => (StatusCode::UNAUTHORIZED, error_codes::TOKEN_INVALID),
        // Forced logout is indistinguishable from natural expiry
        TokenError::Expired | TokenError::Revoked => {
            (StatusCode::UNAUTHORIZED, error_codes::TOKEN_EXPIRED)
        }
        TokenError::AlreadyUsed => (StatusCode::UNAUTHORIZED, error_codes::TOKEN_ALREADY_USED),
        TokenError::GenerationFailed => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                error_codes::INTERNAL_ERROR,
                INTERNAL_MESSAGE.to_string(),
            )
        }
    };
    (status, code, error.to_string())
}

/// Handle domain errors and convert them to appropriate HTTP responses
pub fn handle_domain_error(error: DomainError) -> HttpResponse {
    let (status, code, message) = classify(&error);
    if status.is_server_error() {
        error!("Request failed: {}", error);
    } else {
        warn!("Request rejected: {}", error);
    }
    HttpResponse::build(status).json(ErrorResponse::new(code, message))
}

fn validation_response(errors: &validator::ValidationErrors) -> HttpResponse {
    let mut body = ErrorResponse::new(error_codes::VALIDATION_ERROR, "invalid request");
    for (field, field_errors) in errors.field_errors() {
        let messages: Vec<String> = field_errors
            .iter()
            .map(|e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string())
            })
            .collect();
        body = body.add_detail(field, messages);
    }
    HttpResponse::BadRequest().json(body)
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Domain(e) => classify(e).0,
            ApiError::Validation(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            ApiError::Domain(e) => {
                let (status, code, message) = classify(e);
                if status.is_server_error() {
                    error!("Request failed: {}", e);
                }
                HttpResponse::build(status).json(ErrorResponse::new(code, message))
            }
            ApiError::Validation(errors) => validation_response(errors),
            ApiError::BadRequest(message) => HttpResponse::BadRequest()
                .json(ErrorResponse::new(error_codes::VALIDATION_ERROR, message.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authentication_failures_are_unauthorized() {
        for error in [
            DomainError::from(AuthError::InvalidCredentials),
            DomainError::from(AuthError::Unauthenticated),
            DomainError::from(TokenError::InvalidSignature),
            DomainError::from(TokenError::Expired),
            DomainError::from(TokenError::Revoked),
            DomainError::from(TokenError::AlreadyUsed),
        ] {
            assert_eq!(classify(&error).0, StatusCode::UNAUTHORIZED, "{error:?}");
        }
    }

    #[test]
    fn test_revoked_reads_as_expired() {
        let revoked = classify(&TokenError::Revoked.into());
        let expired = classify(&TokenError::Expired.into());
        assert_eq!(revoked, expired);
        assert_eq!(revoked.2, "token has expired");
    }

    #[test]
    fn test_store_failures() {
        let timeout = DomainError::StoreTimeout {
            operation: "user.find_one".to_string(),
        };
        assert_eq!(classify(&timeout).0, StatusCode::GATEWAY_TIMEOUT);

        let unavailable = DomainError::StoreUnavailable {
            message: "connection refused".to_string(),
        };
        let (status, code, message) = classify(&unavailable);
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(code, error_codes::STORE_UNAVAILABLE);
        assert!(!message.contains("connection refused"));
    }

    #[test]
    fn test_request_level_failures() {
        assert_eq!(
            classify(&DomainError::validation("bad")).0,
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            classify(&AuthError::UserAlreadyExists.into()).0,
            StatusCode::CONFLICT
        );
        assert_eq!(
            classify(&AuthError::InvalidVerificationCode.into()).0,
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            classify(&AuthError::VerificationCodeExpired.into()).0,
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            classify(&DomainError::not_found("expense")),
            (
                StatusCode::NOT_FOUND,
                error_codes::NOT_FOUND,
                "expense not found".to_string()
            )
        );
    }

    #[test]
    fn test_internal_details_are_hidden() {
        let (status, _, message) = classify(&DomainError::internal("bcrypt exploded"));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(message, INTERNAL_MESSAGE);
    }
}
