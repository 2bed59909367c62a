//! Web API Application Tests
//!
//! Applying to jobs and reviewing applications.

mod common;

use axum::http::header::COOKIE;
use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{json, Value};

use common::{
    cookie, create_company, create_job, create_test_app, error_code, register_and_login,
};

struct Posting {
    recruiter: String,
    job: i64,
}

async fn posting(server: &TestServer, email: &str, company: &str) -> Posting {
    let (_, recruiter) = register_and_login(server, email, "recruiter").await;
    let company = create_company(server, &recruiter, company).await;
    let job = create_job(server, &recruiter, company, "Backend Engineer").await;
    Posting { recruiter, job }
}

async fn apply(server: &TestServer, token: &str, job: i64) -> axum_test::TestResponse {
    server
        .post("/api/applications/apply")
        .add_header(COOKIE, cookie(token))
        .json(&json!({ "jobId": job }))
        .await
}

#[tokio::test]
async fn test_apply_twice_conflicts() {
    let app = create_test_app().await;
    let post = posting(&app.server, "r@corp.com", "Acme").await;
    let (student_id, student) = register_and_login(&app.server, "s@uni.edu", "student").await;

    let response = apply(&app.server, &student, post.job).await;
    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["data"]["status"], "pending");
    assert_eq!(body["data"]["applicantId"], student_id);

    let response = apply(&app.server, &student, post.job).await;
    response.assert_status(StatusCode::CONFLICT);
    assert_eq!(error_code(&response), "CONFLICT");
}

#[tokio::test]
async fn test_apply_unknown_job() {
    let app = create_test_app().await;
    let (_, student) = register_and_login(&app.server, "s@uni.edu", "student").await;

    apply(&app.server, &student, 9999)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_apply_requires_student() {
    let app = create_test_app().await;
    let post = posting(&app.server, "r@corp.com", "Acme").await;

    apply(&app.server, &post.recruiter, post.job)
        .await
        .assert_status(StatusCode::FORBIDDEN);

    app.server
        .post("/api/applications/apply")
        .json(&json!({ "jobId": post.job }))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_my_applications() {
    let app = create_test_app().await;
    let post = posting(&app.server, "r@corp.com", "Acme").await;
    let (_, student) = register_and_login(&app.server, "s@uni.edu", "student").await;
    apply(&app.server, &student, post.job).await;

    let response = app
        .server
        .get("/api/applications/my-applications")
        .add_header(COOKIE, cookie(&student))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    let apps = body["data"].as_array().unwrap();
    assert_eq!(apps.len(), 1);
    assert_eq!(apps[0]["job"]["id"], post.job);
    assert_eq!(apps[0]["job"]["title"], "Backend Engineer");
    assert_eq!(apps[0]["job"]["company"], "Acme");
    assert_eq!(apps[0]["status"], "pending");
}

#[tokio::test]
async fn test_job_applicants_visible_only_to_job_creator() {
    let app = create_test_app().await;
    let post = posting(&app.server, "r@corp.com", "Acme").await;
    let other = posting(&app.server, "o@corp.com", "Globex").await;
    let (_, student) = register_and_login(&app.server, "s@uni.edu", "student").await;
    apply(&app.server, &student, post.job).await;

    let response = app
        .server
        .get(&format!("/api/applications/job/{}", post.job))
        .add_header(COOKIE, cookie(&post.recruiter))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"][0]["applicant"]["email"], "s@uni.edu");

    app.server
        .get(&format!("/api/applications/job/{}", post.job))
        .add_header(COOKIE, cookie(&other.recruiter))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_status_by_job_creator() {
    let app = create_test_app().await;
    let post = posting(&app.server, "r@corp.com", "Acme").await;
    let (_, student) = register_and_login(&app.server, "s@uni.edu", "student").await;
    let response = apply(&app.server, &student, post.job).await;
    let application = response.json::<Value>()["data"]["id"].as_i64().unwrap();

    let response = app
        .server
        .put(&format!("/api/applications/{}/status", application))
        .add_header(COOKIE, cookie(&post.recruiter))
        .json(&json!({ "status": "accepted" }))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["data"]["status"], "accepted");

    let response = app
        .server
        .get("/api/applications/my-applications")
        .add_header(COOKIE, cookie(&student))
        .await;
    let body: Value = response.json();
    assert_eq!(body["data"][0]["status"], "accepted");
}

#[tokio::test]
async fn test_update_status_by_other_recruiter_is_not_found() {
    let app = create_test_app().await;
    let post = posting(&app.server, "r@corp.com", "Acme").await;
    let other = posting(&app.server, "o@corp.com", "Globex").await;
    let (_, student) = register_and_login(&app.server, "s@uni.edu", "student").await;
    let response = apply(&app.server, &student, post.job).await;
    let application = response.json::<Value>()["data"]["id"].as_i64().unwrap();

    app.server
        .put(&format!("/api/applications/{}/status", application))
        .add_header(COOKIE, cookie(&other.recruiter))
        .json(&json!({ "status": "rejected" }))
        .await
        .assert_status(StatusCode::NOT_FOUND);

    // The applicant cannot accept their own application either.
    app.server
        .put(&format!("/api/applications/{}/status", application))
        .add_header(COOKIE, cookie(&student))
        .json(&json!({ "status": "accepted" }))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_status_invalid_value() {
    let app = create_test_app().await;
    let post = posting(&app.server, "r@corp.com", "Acme").await;
    let (_, student) = register_and_login(&app.server, "s@uni.edu", "student").await;
    let response = apply(&app.server, &student, post.job).await;
    let application = response.json::<Value>()["data"]["id"].as_i64().unwrap();

    let response = app
        .server
        .put(&format!("/api/applications/{}/status", application))
        .add_header(COOKIE, cookie(&post.recruiter))
        .json(&json!({ "status": "hired" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&response), "BAD_REQUEST");
}
