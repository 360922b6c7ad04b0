//! Integration tests for client sign-up, verification, login and reset

#[macro_use]
mod common;

use actix_web::http::{header, StatusCode};
use actix_web::test::TestRequest;
use chrono::Duration;
use serde_json::json;

use common::{client_body, uri, TestContext, CLIENT_PASSWORD};
use eb_core::domain::value_objects::NotificationKind;

fn other_code(code: &str) -> String {
    if code == "000000" {
        "111111".to_string()
    } else {
        "000000".to_string()
    }
}

#[actix_web::test]
async fn test_register_verify_login() {
    let ctx = TestContext::new().await;
    let app = init_app!(ctx);

    let (status, body, _) = send!(
        app,
        TestRequest::post()
            .uri(&uri("/client/create"))
            .set_json(client_body(1, "ada@acme.ng"))
    );
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "Success");
    assert_eq!(body["data"]["verified"], false);
    assert_eq!(body["data"]["approved"], false);
    assert_eq!(body["data"]["companyName"], "Acme Logistics 1");
    assert!(body["data"].get("credentialHash").is_none());

    // Not verified yet
    let (status, body, _) = send!(
        app,
        TestRequest::post()
            .uri(&uri("/client/login"))
            .set_json(json!({ "email": "ada@acme.ng", "password": CLIENT_PASSWORD }))
    );
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "ACCOUNT_NOT_VERIFIED");

    let code = ctx.last_code_for("ada@acme.ng");
    let (status, body, _) = send!(
        app,
        TestRequest::post()
            .uri(&uri("/client/verify-email"))
            .set_json(json!({ "email": "ada@acme.ng", "code": code }))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["verified"], true);

    let (status, body, headers) = send!(
        app,
        TestRequest::post()
            .uri(&uri("/client/login"))
            .set_json(json!({ "email": "ada@acme.ng", "password": CLIENT_PASSWORD }))
    );
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"]["token"].as_str().is_some());
    assert_eq!(body["data"]["account"]["role"], "client");
    assert_eq!(body["data"]["account"]["approved"], false);

    let cookie = headers
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap();
    assert!(cookie.starts_with("client_auth_token="));
    assert!(cookie.contains("HttpOnly"));

    assert_eq!(
        ctx.dispatcher.kinds(),
        vec![NotificationKind::VerificationCode, NotificationKind::Welcome]
    );
}

#[actix_web::test]
async fn test_duplicate_registration_names_field() {
    let ctx = TestContext::new().await;
    let app = init_app!(ctx);

    let (status, _, _) = send!(
        app,
        TestRequest::post()
            .uri(&uri("/client/create"))
            .set_json(client_body(1, "ada@acme.ng"))
    );
    assert_eq!(status, StatusCode::CREATED);

    // Same email in another case, every other field distinct
    let (status, body, _) = send!(
        app,
        TestRequest::post()
            .uri(&uri("/client/create"))
            .set_json(client_body(2, "ADA@acme.ng"))
    );
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "DUPLICATE_FIELD");
    assert_eq!(body["details"]["field"], "email");
}

#[actix_web::test]
async fn test_registration_reports_missing_fields() {
    let ctx = TestContext::new().await;
    let app = init_app!(ctx);

    let (status, body, _) = send!(
        app,
        TestRequest::post()
            .uri(&uri("/client/create"))
            .set_json(json!({ "email": "ada@acme.ng" }))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "VALIDATION_ERROR");
    assert!(ctx.dispatcher.sent().is_empty());
}

#[actix_web::test]
async fn test_wrong_code_and_unknown_email_look_alike() {
    let ctx = TestContext::new().await;
    let app = init_app!(ctx);

    send!(
        app,
        TestRequest::post()
            .uri(&uri("/client/create"))
            .set_json(client_body(1, "ada@acme.ng"))
    );
    let wrong = other_code(&ctx.last_code_for("ada@acme.ng"));

    let (wrong_status, wrong_body, _) = send!(
        app,
        TestRequest::post()
            .uri(&uri("/client/verify-email"))
            .set_json(json!({ "email": "ada@acme.ng", "code": wrong }))
    );
    let (unknown_status, unknown_body, _) = send!(
        app,
        TestRequest::post()
            .uri(&uri("/client/verify-email"))
            .set_json(json!({ "email": "nobody@acme.ng", "code": "123456" }))
    );

    assert_eq!(wrong_status, StatusCode::BAD_REQUEST);
    assert_eq!(unknown_status, wrong_status);
    assert_eq!(wrong_body["error"], "VERIFICATION_CODE_INVALID");
    assert_eq!(unknown_body["error"], wrong_body["error"]);
    assert_eq!(unknown_body["message"], wrong_body["message"]);
}

#[actix_web::test]
async fn test_expired_code_then_resend() {
    let ctx = TestContext::new().await;
    let app = init_app!(ctx);

    send!(
        app,
        TestRequest::post()
            .uri(&uri("/client/create"))
            .set_json(client_body(1, "ada@acme.ng"))
    );
    let stale = ctx.last_code_for("ada@acme.ng");
    ctx.clock.advance(Duration::minutes(11));

    let (status, body, _) = send!(
        app,
        TestRequest::post()
            .uri(&uri("/client/verify-email"))
            .set_json(json!({ "email": "ada@acme.ng", "code": stale }))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "VERIFICATION_CODE_EXPIRED");

    let (status, _, _) = send!(
        app,
        TestRequest::post()
            .uri(&uri("/client/verify-email/resend"))
            .set_json(json!({ "email": "ada@acme.ng" }))
    );
    assert_eq!(status, StatusCode::ACCEPTED);

    let fresh = ctx.last_code_for("ada@acme.ng");
    let (status, _, _) = send!(
        app,
        TestRequest::post()
            .uri(&uri("/client/verify-email"))
            .set_json(json!({ "email": "ada@acme.ng", "code": fresh }))
    );
    assert_eq!(status, StatusCode::OK);

    // A verified account gets the same answer as an unknown one, and no code
    let sent_before = ctx.dispatcher.sent().len();
    let (verified_status, verified_body, _) = send!(
        app,
        TestRequest::post()
            .uri(&uri("/client/verify-email/resend"))
            .set_json(json!({ "email": "ada@acme.ng" }))
    );
    let (unknown_status, unknown_body, _) = send!(
        app,
        TestRequest::post()
            .uri(&uri("/client/verify-email/resend"))
            .set_json(json!({ "email": "nobody@acme.ng" }))
    );
    assert_eq!(verified_status, StatusCode::ACCEPTED);
    assert_eq!(unknown_status, verified_status);
    assert_eq!(verified_body, unknown_body);
    assert_eq!(ctx.dispatcher.sent().len(), sent_before);
}

#[actix_web::test]
async fn test_resend_for_unknown_email_is_accepted() {
    let ctx = TestContext::new().await;
    let app = init_app!(ctx);

    let (status, body, _) = send!(
        app,
        TestRequest::post()
            .uri(&uri("/client/verify-email/resend"))
            .set_json(json!({ "email": "nobody@acme.ng" }))
    );
    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(body["status"], "Success");
    assert!(ctx.dispatcher.sent().is_empty());
}

#[actix_web::test]
async fn test_forgot_and_reset_password() {
    let ctx = TestContext::new().await;
    let app = init_app!(ctx);
    verified_client!(app, ctx, 1, "ada@acme.ng");

    let (known_status, known_body, _) = send!(
        app,
        TestRequest::post()
            .uri(&uri("/client/forgot-password"))
            .set_json(json!({ "email": "ada@acme.ng" }))
    );
    let (unknown_status, unknown_body, _) = send!(
        app,
        TestRequest::post()
            .uri(&uri("/client/forgot-password"))
            .set_json(json!({ "email": "nobody@acme.ng" }))
    );
    assert_eq!(known_status, StatusCode::ACCEPTED);
    assert_eq!(unknown_status, StatusCode::ACCEPTED);
    assert_eq!(known_body["message"], unknown_body["message"]);

    let code = ctx.last_code_for("ada@acme.ng");
    let (status, body, _) = send!(
        app,
        TestRequest::put()
            .uri(&uri("/client/reset-password"))
            .set_json(json!({
                "email": "ada@acme.ng",
                "code": code,
                "newPassword": "a-brand-new-secret",
            }))
    );
    assert_eq!(status, StatusCode::OK, "{body}");

    // The code is spent
    let (status, body, _) = send!(
        app,
        TestRequest::put()
            .uri(&uri("/client/reset-password"))
            .set_json(json!({
                "email": "ada@acme.ng",
                "code": code,
                "newPassword": "yet-another-secret",
            }))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "VERIFICATION_CODE_INVALID");

    let (status, body, _) = send!(
        app,
        TestRequest::post()
            .uri(&uri("/client/login"))
            .set_json(json!({ "email": "ada@acme.ng", "password": CLIENT_PASSWORD }))
    );
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "INVALID_CREDENTIALS");

    login_token!(
        app,
        "/client/login",
        json!({ "email": "ada@acme.ng", "password": "a-brand-new-secret" })
    );
}

#[actix_web::test]
async fn test_short_new_password_rejected() {
    let ctx = TestContext::new().await;
    let app = init_app!(ctx);

    let (status, body, _) = send!(
        app,
        TestRequest::put()
            .uri(&uri("/client/reset-password"))
            .set_json(json!({ "email": "ada@acme.ng", "code": "123456", "newPassword": "short" }))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "VALIDATION_ERROR");
    assert!(body["details"]["new_password"].is_array());
}

#[actix_web::test]
async fn test_unknown_login_matches_wrong_password() {
    let ctx = TestContext::new().await;
    let app = init_app!(ctx);
    verified_client!(app, ctx, 1, "ada@acme.ng");

    let (wrong_status, wrong_body, _) = send!(
        app,
        TestRequest::post()
            .uri(&uri("/client/login"))
            .set_json(json!({ "email": "ada@acme.ng", "password": "not-the-password" }))
    );
    let (unknown_status, unknown_body, _) = send!(
        app,
        TestRequest::post()
            .uri(&uri("/client/login"))
            .set_json(json!({ "email": "nobody@acme.ng", "password": "not-the-password" }))
    );

    assert_eq!(wrong_status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_status, wrong_status);
    assert_eq!(wrong_body["message"], unknown_body["message"]);
}

#[actix_web::test]
async fn test_logout_clears_cookie() {
    let ctx = TestContext::new().await;
    let app = init_app!(ctx);

    let (status, _, headers) = send!(app, TestRequest::post().uri(&uri("/client/logout")));
    assert_eq!(status, StatusCode::OK);

    let cookie = headers
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap();
    assert!(cookie.starts_with("client_auth_token=;"));
    assert!(cookie.contains("Max-Age=0"));
}

#[actix_web::test]
async fn test_malformed_json_is_validation_error() {
    let ctx = TestContext::new().await;
    let app = init_app!(ctx);

    let (status, body, _) = send!(
        app,
        TestRequest::post()
            .uri(&uri("/client/login"))
            .insert_header((header::CONTENT_TYPE, "application/json"))
            .set_payload("{not json")
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "VALIDATION_ERROR");
}
