//! Route handlers grouped by scope
//!
//! - `/api/auth`: signup, login, token refresh, password reset
//! - `/api/send-grid`: emailed link requests and checks
//! - `/api/expense`: expense records of the authenticated user

pub mod auth;
pub mod expense;
pub mod health;
pub mod mail;

use actix_web::ResponseError;
use validator::Validate;

use crate::handlers::ApiError;

/// Run derive-based validation, producing the error response on failure
pub(crate) fn validate<T: Validate>(request: &T) -> Result<(), actix_web::HttpResponse> {
    request
        .validate()
        .map_err(|errors| ApiError::from(errors).error_response())
}
