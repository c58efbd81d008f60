//! Integration tests for emailed links: verification and password reset

#[macro_use]
mod common;

use actix_web::{http::StatusCode, test};
use chrono::Duration;
use serde_json::json;

use sl_api::app::create_app;
use sl_core::domain::entities::MailType;
use sl_shared::error_codes;

use common::{bearer, login_request, post, signup_body, TestHarness, PASSWORD};

#[actix_web::test]
async fn test_verification_link_marks_email_verified() {
    let harness = TestHarness::new();
    let app = test::init_service(create_app(harness.state.clone())).await;

    let (status, _) = call_json!(&app, post("/api/auth/signup", signup_body("ada@example.com"))).await;
    assert_eq!(status, StatusCode::OK);

    let query = harness.link_query(MailType::MailVerification, 1).await;
    let uri = format!("/api/send-grid/verify-verification-mail?{}", query);
    let (status, body) = call_json!(&app, test::TestRequest::get().uri(&uri)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "ada@example.com");
    assert_eq!(body["is_email_verified"], true);

    // The code is consumed by the verification
    let (status, _) = call_json!(&app, test::TestRequest::get().uri(&uri)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_tampered_link_is_rejected() {
    let harness = TestHarness::new();
    let app = test::init_service(create_app(harness.state.clone())).await;

    let (status, _) = call_json!(&app, post("/api/auth/signup", signup_body("ada@example.com"))).await;
    assert_eq!(status, StatusCode::OK);
    harness.wait_for_mails(1).await;

    let req = test::TestRequest::get()
        .uri("/api/send-grid/verify-verification-mail?email=AAAAAAAAAAAAAAAAAAAAAAAA&code=AAAA");
    let (status, body) = call_json!(&app, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], error_codes::VALIDATION_ERROR);

    let req = test::TestRequest::get().uri("/api/send-grid/verify-verification-mail");
    let (status, _) = call_json!(&app, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_password_reset_request_for_unknown_email() {
    let harness = TestHarness::new();
    let app = test::init_service(create_app(harness.state.clone())).await;

    let (status, body) = call_json!(
        &app,
        post(
            "/api/send-grid/send-password-reset-mail",
            json!({ "email": "nobody@example.com" })
        )
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], error_codes::NOT_FOUND);
}

#[actix_web::test]
async fn test_password_reset_flow_revokes_outstanding_tokens() {
    let harness = TestHarness::new();
    let app = test::init_service(create_app(harness.state.clone())).await;
    let user = sign_in!(&app, "ada@example.com");

    let (status, _) = call_json!(
        &app,
        post(
            "/api/send-grid/send-password-reset-mail",
            json!({ "email": "ada@example.com" })
        )
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // Signup mail plus the reset mail
    let query = harness.link_query(MailType::PasswordReset, 2).await;
    let uri = format!("/api/send-grid/verify-password-reset-mail?{}", query);
    let (status, grant) = call_json!(&app, test::TestRequest::get().uri(&uri)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(grant["email"], "ada@example.com");

    let (status, body) = call_json!(
        &app,
        post(
            "/api/auth/reset-user-password",
            json!({
                "email": grant["email"],
                "code": grant["code"],
                "password": "new-pass-1",
                "confirm_password": "new-pass-2",
            })
        )
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], error_codes::VALIDATION_ERROR);

    harness.clock.advance(Duration::seconds(1));
    let (status, _) = call_json!(
        &app,
        post(
            "/api/auth/reset-user-password",
            json!({
                "email": grant["email"],
                "code": grant["code"],
                "password": "new-pass-1",
                "confirm_password": "new-pass-1",
            })
        )
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // Tokens issued before the reset read as expired
    let req = test::TestRequest::post()
        .uri("/api/expense/get-expenses")
        .insert_header(("Authorization", bearer(&user)))
        .set_json(json!({ "from_date": "2024-03-01 00:00:00", "to_date": "2024-03-31 23:59:59" }));
    let (status, body) = call_json!(&app, req).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], error_codes::TOKEN_EXPIRED);

    let (status, body) = call_json!(
        &app,
        post(
            "/api/auth/refresh-token",
            json!({ "refresh_token": user["refresh_token"] })
        )
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], error_codes::TOKEN_EXPIRED);

    let (status, _) = call_json!(&app, login_request("ada@example.com", PASSWORD)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let (status, _) = call_json!(&app, login_request("ada@example.com", "new-pass-1")).await;
    assert_eq!(status, StatusCode::OK);
}
