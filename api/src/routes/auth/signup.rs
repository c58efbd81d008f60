use actix_web::{web, HttpResponse};

use crate::app::AppState;
use crate::dto::SignupRequest;
use crate::handlers::handle_domain_error;
use crate::routes::validate;

/// Handler for POST /api/auth/signup
///
/// Registers an unverified user and mails a verification link.
///
/// ## Errors
/// - 400 Bad Request: Invalid fields
/// - 409 Conflict: Email already registered
pub async fn signup(
    state: web::Data<AppState>,
    request: web::Json<SignupRequest>,
) -> HttpResponse {
    let request = request.into_inner();
    if let Err(response) = validate(&request) {
        return response;
    }

    match state.sessions.signup(request.into()).await {
        Ok(user) => HttpResponse::Ok().json(user),
        Err(error) => handle_domain_error(error),
    }
}
