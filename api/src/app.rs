//! Application state and factory
//!
//! `AppState` is the single container built at startup; handlers and the
//! auth middleware reach the services through `web::Data<AppState>`.

use std::sync::Arc;

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    web, App, HttpResponse,
};
use tracing_actix_web::TracingLogger;

use sl_core::services::{ExpenseService, SessionService};
use sl_shared::{error_codes, ErrorResponse};

use crate::handlers::ApiError;
use crate::middleware::{cors::create_cors, JwtAuth};
use crate::routes::{auth, expense, health::health_check, mail};

/// Services shared by every request
pub struct AppState {
    pub sessions: Arc<SessionService>,
    pub expenses: Arc<ExpenseService>,
}

impl AppState {
    pub fn new(sessions: Arc<SessionService>, expenses: Arc<ExpenseService>) -> Self {
        Self { sessions, expenses }
    }
}

/// Create and configure the application with all dependencies
pub fn create_app(
    app_state: web::Data<AppState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(app_state)
        .app_data(json_config())
        .app_data(query_config())
        .wrap(create_cors())
        .wrap(TracingLogger::default())
        .route("/health", web::get().to(health_check))
        .service(web::scope("/api").configure(configure_routes))
        .default_service(web::route().to(not_found))
}

/// Route table under `/api`
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .route("/signup", web::post().to(auth::signup))
            .route("/login", web::post().to(auth::login))
            .route("/refresh-token", web::post().to(auth::refresh_token))
            .route("/reset-user-password", web::post().to(auth::reset_user_password)),
    )
    .service(
        web::scope("/send-grid")
            .route(
                "/send-password-reset-mail",
                web::post().to(mail::send_password_reset_mail),
            )
            .route(
                "/verify-verification-mail",
                web::get().to(mail::verify_verification_mail),
            )
            .route(
                "/verify-password-reset-mail",
                web::get().to(mail::verify_password_reset_mail),
            ),
    )
    .service(
        web::scope("/expense")
            .wrap(JwtAuth::new())
            .route("/create-new-expense", web::post().to(expense::create_new_expense))
            .route("/get-expenses", web::post().to(expense::get_expenses))
            .route("/update-expense", web::patch().to(expense::update_expense)),
    );
}

fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| ApiError::BadRequest(err.to_string()).into())
}

fn query_config() -> web::QueryConfig {
    web::QueryConfig::default()
        .error_handler(|err, _req| ApiError::BadRequest(err.to_string()).into())
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        error_codes::NOT_FOUND,
        "The requested resource was not found",
    ))
}
