use actix_web::{web, HttpResponse};

use crate::app::AppState;
use crate::dto::NewExpenseRequest;
use crate::handlers::handle_domain_error;
use crate::middleware::AuthContext;
use crate::routes::validate;

/// Handler for POST /api/expense/create-new-expense
pub async fn create_new_expense(
    state: web::Data<AppState>,
    auth: AuthContext,
    request: web::Json<NewExpenseRequest>,
) -> HttpResponse {
    let request = request.into_inner();
    if let Err(response) = validate(&request) {
        return response;
    }

    match state.expenses.create(&auth.user_id, request.into()).await {
        Ok(expense) => HttpResponse::Ok().json(expense),
        Err(error) => handle_domain_error(error),
    }
}
