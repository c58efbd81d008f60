use actix_web::{web, HttpResponse};

use crate::app::AppState;
use crate::dto::RefreshTokenRequest;
use crate::handlers::handle_domain_error;
use crate::routes::validate;

/// Handler for POST /api/auth/refresh-token
///
/// # Request Body
///
/// ```json
/// {
///     "refresh_token": "string"
/// }
/// ```
///
/// ## Errors
/// - 401 Unauthorized: Invalid, expired, revoked or already exchanged token
/// - 404 Not Found: The token's user no longer exists
pub async fn refresh_token(
    state: web::Data<AppState>,
    request: web::Json<RefreshTokenRequest>,
) -> HttpResponse {
    if let Err(response) = validate(&*request) {
        return response;
    }

    match state.sessions.refresh(&request.refresh_token).await {
        Ok(user) => HttpResponse::Ok().json(user),
        Err(error) => handle_domain_error(error),
    }
}
