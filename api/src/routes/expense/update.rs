use actix_web::{web, HttpResponse};

use crate::app::AppState;
use crate::dto::ExpenseUpdateRequest;
use crate::handlers::handle_domain_error;
use crate::middleware::AuthContext;
use crate::routes::validate;

/// Handler for PATCH /api/expense/update-expense
///
/// ## Errors
/// - 400 Bad Request: No field to change, or a negative amount
/// - 404 Not Found: No such expense belongs to the caller
pub async fn update_expense(
    state: web::Data<AppState>,
    auth: AuthContext,
    request: web::Json<ExpenseUpdateRequest>,
) -> HttpResponse {
    let request = request.into_inner();
    if let Err(response) = validate(&request) {
        return response;
    }

    let (expense_id, update) = request.into_parts();
    match state
        .expenses
        .update(&auth.user_id, &expense_id, update)
        .await
    {
        Ok(expense) => HttpResponse::Ok().json(expense),
        Err(error) => handle_domain_error(error),
    }
}
