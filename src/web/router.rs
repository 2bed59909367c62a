//! Router configuration for Web API.

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use super::handlers::{application, auth, company, job, AppState};
use super::middleware::{
    api_rate_limit, create_cors_layer, login_rate_limit, token_auth, RateLimitState,
};

/// Create the main API router.
pub fn create_router(
    app_state: Arc<AppState>,
    rate_limits: Arc<RateLimitState>,
    cors_origins: &[String],
) -> Router {
    let login_limits = rate_limits.clone();
    let login_route = Router::new()
        .route("/login", post(auth::login))
        .route_layer(middleware::from_fn(move |req, next| {
            login_rate_limit(login_limits.clone(), req, next)
        }));

    let user_routes = Router::new()
        .route("/register", post(auth::register))
        .route("/logout", get(auth::logout).post(auth::logout))
        .route("/profile", get(auth::profile))
        .route("/update-profile", put(auth::update_profile))
        .merge(login_route);

    let company_routes = Router::new()
        .route(
            "/",
            post(company::create_company).get(company::list_my_companies),
        )
        .route("/all", get(company::list_all_companies))
        .route(
            "/:id",
            put(company::update_company).delete(company::delete_company),
        );

    let job_routes = Router::new()
        .route("/", post(job::create_job).get(job::list_jobs))
        .route("/my-jobs", get(job::list_my_jobs))
        .route(
            "/:id",
            get(job::get_job).put(job::update_job).delete(job::delete_job),
        );

    let application_routes = Router::new()
        .route("/apply", post(application::apply))
        .route(
            "/my-applications",
            get(application::list_my_applications),
        )
        .route("/job/:job_id", get(application::list_job_applications))
        .route("/:id/status", put(application::update_status));

    let api_routes = Router::new()
        .nest("/users", user_routes)
        .nest("/company", company_routes)
        .nest("/jobs", job_routes)
        .nest("/applications", application_routes);

    let tokens = app_state.tokens.clone();
    let api_limits = rate_limits;

    Router::new()
        .nest("/api", api_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(create_cors_layer(cors_origins))
                .layer(middleware::from_fn(move |req, next| {
                    api_rate_limit(api_limits.clone(), req, next)
                }))
                .layer(middleware::from_fn(move |req, next| {
                    token_auth(tokens.clone(), req, next)
                })),
        )
        .with_state(app_state)
        .merge(create_health_router())
}

/// Create a health check router.
pub fn create_health_router() -> Router {
    Router::new().route("/health", get(health_check))
}

/// Health check handler.
async fn health_check() -> &'static str {
    "OK"
}
