use actix_web::{web, HttpResponse};

use crate::app::AppState;
use crate::dto::LoginRequest;
use crate::handlers::handle_domain_error;
use crate::routes::validate;

/// Handler for POST /api/auth/login
///
/// ## Errors
/// - 401 Unauthorized: "email or password is incorrect", for an unknown
///   email as well as a wrong password
pub async fn login(
    state: web::Data<AppState>,
    request: web::Json<LoginRequest>,
) -> HttpResponse {
    if let Err(response) = validate(&*request) {
        return response;
    }

    match state.sessions.login(&request.email, &request.password).await {
        Ok(user) => HttpResponse::Ok().json(user),
        Err(error) => handle_domain_error(error),
    }
}
