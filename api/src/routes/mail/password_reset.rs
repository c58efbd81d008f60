use actix_web::{web, HttpResponse};

use crate::app::AppState;
use crate::dto::{MailLinkQuery, MessageResponse, PasswordResetGrantResponse, PasswordResetMailRequest};
use crate::handlers::handle_domain_error;
use crate::routes::validate;

/// Handler for POST /api/send-grid/send-password-reset-mail
pub async fn send_password_reset_mail(
    state: web::Data<AppState>,
    request: web::Json<PasswordResetMailRequest>,
) -> HttpResponse {
    if let Err(response) = validate(&*request) {
        return response;
    }

    match state.sessions.request_password_reset(&request.email).await {
        Ok(()) => HttpResponse::Ok().json(MessageResponse::new("password reset mail sent")),
        Err(error) => handle_domain_error(error),
    }
}

/// Handler for GET /api/send-grid/verify-password-reset-mail?email=..&code=..
///
/// Answers with the plaintext email and code the client submits with the
/// new password.
pub async fn verify_password_reset_mail(
    state: web::Data<AppState>,
    query: web::Query<MailLinkQuery>,
) -> HttpResponse {
    if let Err(response) = validate(&*query) {
        return response;
    }

    match state
        .sessions
        .verify_password_reset(&query.email, &query.code)
        .await
    {
        Ok(grant) => HttpResponse::Ok().json(PasswordResetGrantResponse {
            email: grant.email,
            code: grant.code,
        }),
        Err(error) => handle_domain_error(error),
    }
}
