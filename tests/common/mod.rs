//! Shared helpers for the HTTP API tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::StatusCode;
use axum_test::{TestResponse, TestServer};
use serde_json::{json, Value};

use jobportal::auth::TokenService;
use jobportal::web::handlers::AppState;
use jobportal::web::middleware::RateLimitState;
use jobportal::web::router::create_router;
use jobportal::Database;

pub const TEST_SECRET: &str = "test-secret-key-for-testing-only";
pub const PASSWORD: &str = "secret1";

/// A running test API plus a handle on its database.
pub struct TestApp {
    pub server: TestServer,
    pub db: Database,
    pub tokens: Arc<TokenService>,
}

/// Create a test server with an in-memory database.
pub async fn create_test_app() -> TestApp {
    create_test_app_with_limits(100, 1000).await
}

/// Create a test server with explicit rate limits.
pub async fn create_test_app_with_limits(login_rate_limit: u32, api_rate_limit: u32) -> TestApp {
    let db = Database::open_in_memory()
        .await
        .expect("Failed to create test database");
    let tokens = Arc::new(TokenService::new(TEST_SECRET, 86_400));
    let app_state = Arc::new(AppState::new(db.clone(), tokens.clone()));
    let rate_limits = Arc::new(RateLimitState::new(login_rate_limit, api_rate_limit));

    let router = create_router(app_state, rate_limits, &[]);
    let server = TestServer::new(router).expect("Failed to create test server");

    TestApp { server, db, tokens }
}

/// Register an account and return its ID.
pub async fn register(server: &TestServer, email: &str, role: &str) -> i64 {
    let response = server
        .post("/api/users/register")
        .json(&json!({
            "fullname": "Test User",
            "email": email,
            "phoneNumber": "555-0100",
            "password": PASSWORD,
            "role": role
        }))
        .await;
    response.assert_status(StatusCode::CREATED);
    response.json::<Value>()["data"]["userId"]
        .as_i64()
        .expect("userId in response")
}

/// Log in and return the raw response.
pub async fn login_response(
    server: &TestServer,
    email: &str,
    password: &str,
    role: &str,
) -> TestResponse {
    server
        .post("/api/users/login")
        .json(&json!({
            "email": email,
            "password": password,
            "role": role
        }))
        .await
}

/// Log in and return the session token taken from the `token` cookie.
pub async fn login(server: &TestServer, email: &str, role: &str) -> String {
    let response = login_response(server, email, PASSWORD, role).await;
    response.assert_status_ok();
    token_from_set_cookie(&response).expect("token cookie set on login")
}

/// Register and log in, returning (user ID, token).
pub async fn register_and_login(server: &TestServer, email: &str, role: &str) -> (i64, String) {
    let id = register(server, email, role).await;
    let token = login(server, email, role).await;
    (id, token)
}

/// Extract the `token` cookie value from a response's Set-Cookie header.
pub fn token_from_set_cookie(response: &TestResponse) -> Option<String> {
    let header = response.header(SET_COOKIE);
    let set_cookie = header.to_str().ok()?;
    let pair = set_cookie.split(';').next()?;
    let value = pair.trim().strip_prefix("token=")?;
    Some(value.to_string())
}

/// Cookie header value for a session token.
pub fn cookie(token: &str) -> String {
    format!("token={}", token)
}

/// Create a company as the given recruiter and return its ID.
pub async fn create_company(server: &TestServer, token: &str, name: &str) -> i64 {
    let response = server
        .post("/api/company")
        .add_header(COOKIE, cookie(token))
        .json(&json!({ "name": name, "location": "Berlin" }))
        .await;
    response.assert_status(StatusCode::CREATED);
    response.json::<Value>()["data"]["id"].as_i64().expect("company id")
}

/// Post a job under a company and return its ID.
pub async fn create_job(server: &TestServer, token: &str, company_id: i64, title: &str) -> i64 {
    let response = server
        .post("/api/jobs")
        .add_header(COOKIE, cookie(token))
        .json(&json!({
            "title": title,
            "description": "Build and run services",
            "requirements": ["rust", "sql"],
            "salary": 90000,
            "location": "Remote",
            "jobType": "full-time",
            "position": "Engineer",
            "companyId": company_id
        }))
        .await;
    response.assert_status(StatusCode::CREATED);
    response.json::<Value>()["data"]["id"].as_i64().expect("job id")
}

/// The error code of an error response.
pub fn error_code(response: &TestResponse) -> String {
    response.json::<Value>()["error"]["code"]
        .as_str()
        .unwrap_or_default()
        .to_string()
}
