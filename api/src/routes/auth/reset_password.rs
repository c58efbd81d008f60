use actix_web::{web, HttpResponse};

use crate::app::AppState;
use crate::dto::{MessageResponse, ResetPasswordRequest};
use crate::handlers::handle_domain_error;
use crate::routes::validate;

/// Handler for POST /api/auth/reset-user-password
///
/// Replaces the password and revokes every outstanding token of the user.
pub async fn reset_user_password(
    state: web::Data<AppState>,
    request: web::Json<ResetPasswordRequest>,
) -> HttpResponse {
    let request = request.into_inner();
    if let Err(response) = validate(&request) {
        return response;
    }

    match state.sessions.reset_password(request.into()).await {
        Ok(()) => HttpResponse::Ok().json(MessageResponse::new("password has been reset")),
        Err(error) => handle_domain_error(error),
    }
}
