use actix_web::{web, HttpResponse};

use crate::app::AppState;
use crate::dto::ExpenseRangeRequest;
use crate::handlers::handle_domain_error;
use crate::middleware::AuthContext;
use crate::routes::validate;

/// Handler for POST /api/expense/get-expenses
///
/// Lists the caller's expenses between `from_date` and `to_date`
/// (`YYYY-MM-DD HH:MM:SS`, inclusive), newest first.
pub async fn get_expenses(
    state: web::Data<AppState>,
    auth: AuthContext,
    request: web::Json<ExpenseRangeRequest>,
) -> HttpResponse {
    if let Err(response) = validate(&*request) {
        return response;
    }

    match state
        .expenses
        .list(&auth.user_id, &request.from_date, &request.to_date)
        .await
    {
        Ok(expenses) => HttpResponse::Ok().json(expenses),
        Err(error) => handle_domain_error(error),
    }
}
