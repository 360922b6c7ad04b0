//! Shared setup for the API integration tests
//!
//! Everything runs on the in-memory repositories with a recording
//! dispatcher, so tests read issued codes straight from the outbox.

#![allow(dead_code)]

use std::sync::Arc;

use actix_web::web;
use chrono::{TimeZone, Utc};
use serde_json::{json, Value};

use eb_api::{AppState, SessionManager};
use eb_core::repositories::{InMemoryAccountRepository, InMemoryAuctionRepository};
use eb_core::services::{
    AuctionService, LifecycleService, LifecycleServiceConfig, ManualClock, NewAdmin,
    RecordingDispatcher,
};
use eb_shared::{AuthConfig, CorsConfig};

pub type TestState = AppState<InMemoryAccountRepository, InMemoryAuctionRepository>;

pub const ADMIN_USER_NAME: &str = "opslead";
pub const ADMIN_EMAIL: &str = "lead@e-biding.ng";
pub const ADMIN_PASSWORD: &str = "admin-password-1";
pub const CLIENT_PASSWORD: &str = "client-password-1";
pub const MAX_PAYLOAD: usize = 256 * 1024;

pub struct TestContext {
    pub state: web::Data<TestState>,
    pub dispatcher: RecordingDispatcher,
    pub clock: Arc<ManualClock>,
    pub cors: CorsConfig,
}

impl TestContext {
    /// Services over empty stores, plus one seeded admin
    pub async fn new() -> Self {
        let dispatcher = RecordingDispatcher::new();
        let clock = Arc::new(ManualClock::new(
            Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap(),
        ));

        let config = LifecycleServiceConfig {
            credential_hash_cost: 4,
            ..LifecycleServiceConfig::default()
        };
        let lifecycle = LifecycleService::new(
            Arc::new(InMemoryAccountRepository::new()),
            Arc::new(dispatcher.clone()),
            config,
        )
        .unwrap()
        .with_clock(clock.clone());

        lifecycle
            .create_admin(NewAdmin {
                first_name: "Ops".to_string(),
                last_name: "Lead".to_string(),
                user_name: ADMIN_USER_NAME.to_string(),
                email: ADMIN_EMAIL.to_string(),
                password: ADMIN_PASSWORD.to_string(),
            })
            .await
            .unwrap();

        let auctions = AuctionService::new(Arc::new(InMemoryAuctionRepository::new()))
            .with_clock(clock.clone());
        let sessions = SessionManager::new(&AuthConfig::new("api-test-secret"));

        Self {
            state: web::Data::new(AppState::new(lifecycle, auctions, sessions)),
            dispatcher,
            clock,
            cors: CorsConfig::development(),
        }
    }

    pub fn last_code_for(&self, email: &str) -> String {
        self.dispatcher
            .last_code_for(email)
            .unwrap_or_else(|| panic!("no code sent to {email}"))
    }
}

pub fn uri(path: &str) -> String {
    format!("{}{}", eb_api::API_PREFIX, path)
}

/// Registration body; `n` keeps the unique fields distinct
pub fn client_body(n: u32, email: &str) -> Value {
    json!({
        "companyName": format!("Acme Logistics {n}"),
        "companyAddress": "12 Marina Road, Lagos",
        "phoneNumber": format!("0803000{n:04}"),
        "alternatePhoneNumber": format!("0809000{n:04}"),
        "rcNumber": format!("RC{n:06}"),
        "postalCode": "101001",
        "name": "Ada Obi",
        "email": email,
        "password": CLIENT_PASSWORD,
        "cacDocument": format!("uploads/cac/{n}.pdf"),
    })
}

pub fn auction_body() -> Value {
    json!({
        "auctionDescription": "Fleet disposal",
        "itemDescription": "Four 2016 Toyota Hilux pickups",
        "categories": ["vehicles"],
        "requirements": ["Valid CAC certificate"],
        "imageUrl": "https://img.example/hilux.jpg",
        "startingAmount": 2_500_000,
        "startDate": "2026-03-01T09:00:00Z",
        "endDate": "2026-03-20T17:00:00Z",
    })
}

/// Build the full application over a [`TestContext`]
macro_rules! init_app {
    ($ctx:expr) => {
        actix_web::test::init_service(eb_api::create_app(
            $ctx.state.clone(),
            &$ctx.cors,
            common::MAX_PAYLOAD,
        ))
        .await
    };
}

/// Send a `TestRequest`; yields `(status, json body, headers)`
///
/// Errors raised by middleware come back as `Err` from the service and are
/// rendered the way the server would render them.
macro_rules! send {
    ($app:expr, $req:expr) => {{
        match actix_web::test::try_call_service(&$app, $req.to_request()).await {
            Ok(resp) => {
                let status = resp.status();
                let headers = resp.headers().clone();
                let bytes = actix_web::test::read_body(resp).await;
                let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
                (status, body, headers)
            }
            Err(err) => {
                let resp = err.error_response();
                let status = resp.status();
                let headers = resp.headers().clone();
                let bytes = actix_web::body::to_bytes(resp.into_body()).await.unwrap();
                let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
                (status, body, headers)
            }
        }
    }};
}

/// Register, verify and return the account id of a client
macro_rules! verified_client {
    ($app:expr, $ctx:expr, $n:expr, $email:expr) => {{
        let (status, body, _) = send!(
            $app,
            actix_web::test::TestRequest::post()
                .uri(&common::uri("/client/create"))
                .set_json(common::client_body($n, $email))
        );
        assert_eq!(status, actix_web::http::StatusCode::CREATED, "{body}");

        let code = $ctx.last_code_for($email);
        let (status, body, _) = send!(
            $app,
            actix_web::test::TestRequest::post()
                .uri(&common::uri("/client/verify-email"))
                .set_json(serde_json::json!({ "email": $email, "code": code }))
        );
        assert_eq!(status, actix_web::http::StatusCode::OK, "{body}");
        body["data"]["id"].as_str().unwrap().to_string()
    }};
}

/// Log in with JSON `$body` at `$path` and return the session token
macro_rules! login_token {
    ($app:expr, $path:expr, $body:expr) => {{
        let (status, body, _) = send!(
            $app,
            actix_web::test::TestRequest::post()
                .uri(&common::uri($path))
                .set_json($body)
        );
        assert_eq!(status, actix_web::http::StatusCode::OK, "{body}");
        body["data"]["token"].as_str().unwrap().to_string()
    }};
}

macro_rules! admin_token {
    ($app:expr) => {
        login_token!(
            $app,
            "/admin/login",
            serde_json::json!({
                "userName": common::ADMIN_USER_NAME,
                "password": common::ADMIN_PASSWORD,
            })
        )
    };
}

pub fn bearer(token: &str) -> (actix_web::http::header::HeaderName, String) {
    (actix_web::http::header::AUTHORIZATION, format!("Bearer {token}"))
}
