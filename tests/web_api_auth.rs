//! Web API Authentication Tests
//!
//! Registration, login, cookie sessions and profile endpoints.

mod common;

use axum::http::header::{HeaderName, COOKIE, SET_COOKIE};
use axum::http::StatusCode;
use serde_json::{json, Value};

use common::{
    cookie, create_test_app, create_test_app_with_limits, error_code, login, login_response,
    register, register_and_login, token_from_set_cookie, PASSWORD,
};
use jobportal::Role;

#[tokio::test]
async fn test_end_to_end_login_flow() {
    let app = create_test_app().await;
    let server = &app.server;

    let response = server
        .post("/api/users/register")
        .json(&json!({
            "fullname": "A",
            "email": "a@x.com",
            "phoneNumber": "1",
            "password": "secret1",
            "role": "student"
        }))
        .await;
    response.assert_status(StatusCode::CREATED);

    let response = login_response(server, "a@x.com", "secret1", "recruiter").await;
    response.assert_status(StatusCode::FORBIDDEN);

    let response = login_response(server, "a@x.com", "secret1", "student").await;
    response.assert_status_ok();
    assert!(token_from_set_cookie(&response).is_some());

    let response = server.get("/api/users/profile").await;
    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_register_returns_user_id() {
    let app = create_test_app().await;
    let response = app
        .server
        .post("/api/users/register")
        .json(&json!({
            "fullname": "Ada Lovelace",
            "email": "ada@example.com",
            "phoneNumber": "555-0101",
            "password": PASSWORD,
            "role": "recruiter"
        }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    assert!(body["data"]["userId"].as_i64().unwrap() > 0);
}

#[tokio::test]
async fn test_register_duplicate_email_any_case() {
    let app = create_test_app().await;
    register(&app.server, "dup@example.com", "student").await;

    let response = app
        .server
        .post("/api/users/register")
        .json(&json!({
            "fullname": "Other",
            "email": "DUP@Example.com",
            "phoneNumber": "555-0102",
            "password": PASSWORD,
            "role": "recruiter"
        }))
        .await;

    response.assert_status(StatusCode::CONFLICT);
    assert_eq!(error_code(&response), "CONFLICT");
}

#[tokio::test]
async fn test_register_validation() {
    let app = create_test_app().await;

    let response = app
        .server
        .post("/api/users/register")
        .json(&json!({
            "fullname": "Short",
            "email": "short@example.com",
            "phoneNumber": "1",
            "password": "abc",
            "role": "student"
        }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&response), "VALIDATION_ERROR");

    let response = app
        .server
        .post("/api/users/register")
        .json(&json!({
            "fullname": "Admin",
            "email": "admin@example.com",
            "phoneNumber": "1",
            "password": PASSWORD,
            "role": "admin"
        }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&response), "BAD_REQUEST");

    let response = app
        .server
        .post("/api/users/register")
        .json(&json!({
            "fullname": "   ",
            "email": "blank@example.com",
            "phoneNumber": "1",
            "password": PASSWORD,
            "role": "student"
        }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&response), "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_login_sets_session_cookie() {
    let app = create_test_app().await;
    let id = register(&app.server, "cookie@example.com", "student").await;

    let response = login_response(&app.server, "cookie@example.com", PASSWORD, "student").await;
    response.assert_status_ok();

    let set_cookie = response.header(SET_COOKIE);
    let set_cookie = set_cookie.to_str().unwrap();
    assert!(set_cookie.starts_with("token="));
    assert!(set_cookie.contains("HttpOnly"));
    assert!(set_cookie.contains("Max-Age=86400"));
    assert!(set_cookie.contains("Path=/"));

    let body: Value = response.json();
    assert_eq!(body["data"]["user"]["id"], id);
    assert_eq!(body["data"]["user"]["role"], "student");
    assert!(body["data"]["user"].get("password").is_none());
    assert_eq!(body["data"]["expiresIn"], 86_400);
    assert_eq!(
        body["data"]["token"].as_str(),
        token_from_set_cookie(&response).as_deref()
    );
}

#[tokio::test]
async fn test_login_role_mismatch_regardless_of_password() {
    let app = create_test_app().await;
    register(&app.server, "role@example.com", "recruiter").await;

    let response = login_response(&app.server, "role@example.com", PASSWORD, "student").await;
    response.assert_status(StatusCode::FORBIDDEN);

    let response =
        login_response(&app.server, "role@example.com", "wrong-password", "student").await;
    response.assert_status(StatusCode::FORBIDDEN);
    assert_eq!(error_code(&response), "FORBIDDEN");
}

#[tokio::test]
async fn test_login_wrong_password() {
    let app = create_test_app().await;
    register(&app.server, "pw@example.com", "student").await;

    let response = login_response(&app.server, "pw@example.com", "wrong-password", "student").await;
    response.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(error_code(&response), "UNAUTHORIZED");
}

// Unknown emails get the same 401 as a wrong password so login cannot be
// used to discover which addresses are registered.
#[tokio::test]
async fn test_login_unknown_email() {
    let app = create_test_app().await;
    register(&app.server, "known@example.com", "student").await;

    let unknown = login_response(&app.server, "nobody@example.com", PASSWORD, "student").await;
    unknown.assert_status(StatusCode::UNAUTHORIZED);
    let wrong = login_response(&app.server, "known@example.com", "wrong-password", "student").await;
    wrong.assert_status(StatusCode::UNAUTHORIZED);

    let unknown: Value = unknown.json();
    let wrong: Value = wrong.json();
    assert_eq!(unknown["error"], wrong["error"]);
}

#[tokio::test]
async fn test_login_email_case_insensitive() {
    let app = create_test_app().await;
    register(&app.server, "mixed@example.com", "student").await;

    let response = login_response(&app.server, "Mixed@Example.COM", PASSWORD, "student").await;
    response.assert_status_ok();
}

#[tokio::test]
async fn test_profile_with_cookie() {
    let app = create_test_app().await;
    let (id, token) = register_and_login(&app.server, "me@example.com", "student").await;

    let response = app
        .server
        .get("/api/users/profile")
        .add_header(COOKIE, cookie(&token))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["data"]["id"], id);
    assert_eq!(body["data"]["email"], "me@example.com");
    assert_eq!(body["data"]["phoneNumber"], "555-0100");
}

#[tokio::test]
async fn test_profile_rejects_bad_tokens() {
    let app = create_test_app().await;
    let id = register(&app.server, "bad@example.com", "student").await;

    let response = app
        .server
        .get("/api/users/profile")
        .add_header(COOKIE, cookie("not-a-token"))
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);

    let expired = app
        .tokens
        .issue_at(id, Role::Candidate, chrono::Utc::now().timestamp() - 86_400 - 60)
        .unwrap();
    let response = app
        .server
        .get("/api/users/profile")
        .add_header(COOKIE, cookie(&expired))
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);

    let foreign = jobportal::TokenService::new("some-other-secret", 86_400)
        .issue(id, Role::Candidate)
        .unwrap();
    let response = app
        .server
        .get("/api/users/profile")
        .add_header(COOKIE, cookie(&foreign))
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_bearer_header_is_not_accepted() {
    let app = create_test_app().await;
    let (_, token) = register_and_login(&app.server, "bearer@example.com", "student").await;

    let response = app
        .server
        .get("/api/users/profile")
        .add_header(
            axum::http::header::AUTHORIZATION,
            format!("Bearer {}", token),
        )
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_clears_cookie() {
    let app = create_test_app().await;

    for response in [
        app.server.get("/api/users/logout").await,
        app.server.post("/api/users/logout").await,
    ] {
        response.assert_status_ok();
        let set_cookie = response.header(SET_COOKIE);
        let set_cookie = set_cookie.to_str().unwrap();
        assert!(set_cookie.starts_with("token=;"));
        assert!(set_cookie.contains("Max-Age=0"));
    }
}

#[tokio::test]
async fn test_update_profile() {
    let app = create_test_app().await;
    let (_, token) = register_and_login(&app.server, "edit@example.com", "student").await;

    let response = app
        .server
        .put("/api/users/update-profile")
        .add_header(COOKIE, cookie(&token))
        .json(&json!({
            "bio": "Rustacean",
            "skills": ["rust", " tokio "],
            "resume": "https://files.example.com/cv.pdf",
            "resumeOriginalName": "cv.pdf"
        }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    let profile = &body["data"]["profile"];
    assert_eq!(profile["bio"], "Rustacean");
    assert_eq!(profile["skills"], json!(["rust", "tokio"]));
    assert_eq!(profile["resumeOriginalName"], "cv.pdf");

    // Fields left out are unchanged.
    let response = app
        .server
        .put("/api/users/update-profile")
        .add_header(COOKIE, cookie(&token))
        .json(&json!({ "profilePhoto": "https://files.example.com/me.png" }))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["data"]["profile"]["bio"], "Rustacean");
    assert_eq!(
        body["data"]["profile"]["profilePhoto"],
        "https://files.example.com/me.png"
    );
}

#[tokio::test]
async fn test_update_profile_requires_login() {
    let app = create_test_app().await;
    let response = app
        .server
        .put("/api/users/update-profile")
        .json(&json!({ "bio": "x" }))
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_rate_limit() {
    let app = create_test_app_with_limits(2, 1000).await;
    register(&app.server, "limited@example.com", "student").await;

    login(&app.server, "limited@example.com", "student").await;
    login(&app.server, "limited@example.com", "student").await;

    let response = login_response(&app.server, "limited@example.com", PASSWORD, "student").await;
    response.assert_status(StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(error_code(&response), "TOO_MANY_REQUESTS");

    // Other endpoints are unaffected.
    app.server.get("/api/jobs").await.assert_status_ok();
}

#[tokio::test]
async fn test_login_rate_limit_ignores_spoofed_forwarding_headers() {
    let app = create_test_app_with_limits(2, 1000).await;
    register(&app.server, "spoof@example.com", "student").await;

    for i in 0..3 {
        let response = app
            .server
            .post("/api/users/login")
            .add_header(
                HeaderName::from_static("x-forwarded-for"),
                format!("203.0.113.{}", i),
            )
            .add_header(
                HeaderName::from_static("x-real-ip"),
                format!("198.51.100.{}", i),
            )
            .json(&json!({
                "email": "spoof@example.com",
                "password": PASSWORD,
                "role": "student"
            }))
            .await;
        if i < 2 {
            response.assert_status_ok();
        } else {
            response.assert_status(StatusCode::TOO_MANY_REQUESTS);
        }
    }
}

#[tokio::test]
async fn test_health_check() {
    let app = create_test_app().await;
    let response = app.server.get("/health").await;
    response.assert_status_ok();
    response.assert_text("OK");
}
