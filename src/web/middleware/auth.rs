//! Cookie-based session authentication.

use axum::{
    async_trait,
    body::Body,
    extract::FromRequestParts,
    http::{request::Parts, Request},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;

use crate::auth::{Identity, TokenService, TOKEN_COOKIE};
use crate::web::error::ApiError;

/// Extractor for authenticated callers.
///
/// Reads the `token` cookie and verifies it with the [`TokenService`]
/// placed in the request extensions by [`token_auth`]. Missing, invalid
/// and expired tokens are all rejected with 401.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser(pub Identity);

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let tokens = parts
            .extensions
            .get::<Arc<TokenService>>()
            .cloned()
            .ok_or_else(|| ApiError::internal("Token service not configured"))?;

        let jar = CookieJar::from_headers(&parts.headers);
        let claims = tokens.verify(jar.get(TOKEN_COOKIE).map(|c| c.value()))?;

        Ok(AuthUser(Identity::from(&claims)))
    }
}

/// Middleware function to inject the token service into request extensions.
pub async fn token_auth(
    tokens: Arc<TokenService>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    request.extensions_mut().insert(tokens);
    next.run(request).await
}
