//! Account handlers: registration, login, logout and profile.

use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use std::sync::Arc;

use super::AppState;
use crate::auth::{hash_password, verify_password, TOKEN_COOKIE};
use crate::db::{NewUser, UserRepository};
use crate::web::dto::{
    ApiResponse, LoginRequest, LoginResponse, MessageResponse, RegisterRequest, RegisterResponse,
    UpdateProfileRequest, UserResponse, ValidatedJson,
};
use crate::web::error::ApiError;
use crate::web::middleware::AuthUser;

const INVALID_CREDENTIALS: &str = "Invalid email or password";

fn session_cookie(state: &AppState, token: String) -> Cookie<'static> {
    Cookie::build((TOKEN_COOKIE, token))
        .http_only(true)
        .secure(state.cookie_secure)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(time::Duration::seconds(state.tokens.lifetime_secs()))
        .build()
}

fn expired_cookie(state: &AppState) -> Cookie<'static> {
    Cookie::build((TOKEN_COOKIE, ""))
        .http_only(true)
        .secure(state.cookie_secure)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(time::Duration::ZERO)
        .build()
}

/// POST /api/users/register - Create an account.
pub async fn register(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<RegisterResponse>>), ApiError> {
    let repo = UserRepository::new(state.db.pool());

    if repo.email_exists(&req.email).await? {
        return Err(ApiError::conflict("Email is already registered"));
    }

    let password_hash = hash_password(&req.password)?;
    let new_user = NewUser::new(
        &req.fullname,
        &req.email,
        &req.phone_number,
        password_hash,
        req.role,
    );

    // A concurrent registration surfaces here as a unique violation (409).
    let user = repo.create(&new_user).await?;
    tracing::info!(user_id = user.id, role = %user.role, "User registered");

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(RegisterResponse {
            user_id: user.id,
            message: "User registered successfully".to_string(),
        })),
    ))
}

/// POST /api/users/login - Authenticate and set the session cookie.
///
/// The requested role is compared before the password, so a role mismatch
/// is reported as 403 whether or not the password is right.
pub async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<(CookieJar, Json<ApiResponse<LoginResponse>>), ApiError> {
    let repo = UserRepository::new(state.db.pool());

    let user = repo
        .get_by_email(&req.email)
        .await?
        .ok_or_else(|| ApiError::unauthorized(INVALID_CREDENTIALS))?;

    if user.role != req.role {
        tracing::debug!(user_id = user.id, "Login with mismatched role");
        return Err(ApiError::forbidden(format!(
            "This email is registered as a {}. Please login as {}.",
            user.role, user.role
        )));
    }

    verify_password(&req.password, &user.password).map_err(|e| {
        tracing::debug!(user_id = user.id, "Password verification failed: {}", e);
        ApiError::unauthorized(INVALID_CREDENTIALS)
    })?;

    let token = state.tokens.issue(user.id, user.role)?;
    let jar = jar.add(session_cookie(&state, token.clone()));
    tracing::info!(user_id = user.id, "User logged in");

    Ok((
        jar,
        Json(ApiResponse::new(LoginResponse {
            token,
            expires_in: state.tokens.lifetime_secs(),
            user: user.into(),
        })),
    ))
}

/// GET|POST /api/users/logout - Clear the session cookie.
///
/// Tokens are not revoked server-side; the cookie is simply expired.
pub async fn logout(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
) -> (CookieJar, Json<ApiResponse<MessageResponse>>) {
    (
        jar.add(expired_cookie(&state)),
        Json(ApiResponse::new(MessageResponse::new(
            "Logged out successfully",
        ))),
    )
}

/// GET /api/users/profile - The caller's own account.
pub async fn profile(
    State(state): State<Arc<AppState>>,
    AuthUser(identity): AuthUser,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    let user = UserRepository::new(state.db.pool())
        .get_by_id(identity.id)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    Ok(Json(ApiResponse::new(user.into())))
}

/// PUT /api/users/update-profile - Update the caller's profile fields.
pub async fn update_profile(
    State(state): State<Arc<AppState>>,
    AuthUser(identity): AuthUser,
    ValidatedJson(req): ValidatedJson<UpdateProfileRequest>,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    let update = req.into_update();
    let user = UserRepository::new(state.db.pool())
        .update_profile(identity.id, &update)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    Ok(Json(ApiResponse::new(user.into())))
}
