use actix_web::{web, HttpResponse};

use crate::app::AppState;
use crate::dto::MailLinkQuery;
use crate::handlers::handle_domain_error;
use crate::routes::validate;

/// Handler for GET /api/send-grid/verify-verification-mail?email=..&code=..
///
/// Both query values are encrypted. Answers with the verified user record.
pub async fn verify_verification_mail(
    state: web::Data<AppState>,
    query: web::Query<MailLinkQuery>,
) -> HttpResponse {
    if let Err(response) = validate(&*query) {
        return response;
    }

    match state.sessions.verify_email(&query.email, &query.code).await {
        Ok(user) => HttpResponse::Ok().json(user),
        Err(error) => handle_domain_error(error),
    }
}
