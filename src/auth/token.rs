//! Session token issuing and verification.
//!
//! Tokens are HS256 JWTs carrying the identity ID and role. They are not
//! persisted anywhere; expiry is the only way a token stops being valid.

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::db::Role;

/// Default token lifetime (24 hours).
pub const DEFAULT_TOKEN_LIFETIME_SECS: i64 = 86_400;

/// Name of the cookie carrying the token.
pub const TOKEN_COOKIE: &str = "token";

/// Claims embedded in a session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Identity ID.
    pub sub: i64,
    /// Role at issue time.
    pub role: Role,
    /// Issued at (unix seconds).
    pub iat: i64,
    /// Expiry (unix seconds).
    pub exp: i64,
}

/// Token verification errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// No token was presented.
    #[error("missing token")]
    MissingToken,

    /// Bad signature, malformed token or unexpected algorithm.
    #[error("invalid token")]
    InvalidToken,

    /// Token is past its expiry.
    #[error("token expired")]
    ExpiredToken,

    /// Signing failed.
    #[error("token signing failed: {0}")]
    Signing(String),
}

/// Issues and verifies session tokens with a fixed signing key.
///
/// Built once at startup and shared read-only.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    lifetime_secs: i64,
}

impl TokenService {
    /// Create a token service from a shared secret.
    pub fn new(secret: &str, lifetime_secs: i64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked in `verify_at` so the boundary is exact.
        validation.validate_exp = false;
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            lifetime_secs,
        }
    }

    /// Token lifetime in seconds.
    pub fn lifetime_secs(&self) -> i64 {
        self.lifetime_secs
    }

    /// Issue a token for an identity, valid from now.
    pub fn issue(&self, user_id: i64, role: Role) -> Result<String, TokenError> {
        self.issue_at(user_id, role, chrono::Utc::now().timestamp())
    }

    /// Issue a token as if the current time were `now`.
    pub fn issue_at(&self, user_id: i64, role: Role, now: i64) -> Result<String, TokenError> {
        let exp = now
            .checked_add(self.lifetime_secs)
            .ok_or_else(|| TokenError::Signing("token expiry overflows".to_string()))?;
        let claims = Claims {
            sub: user_id,
            role,
            iat: now,
            exp,
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    /// Verify a presented token against the current time.
    pub fn verify(&self, token: Option<&str>) -> Result<Claims, TokenError> {
        match token {
            Some(token) if !token.is_empty() => {
                self.verify_at(token, chrono::Utc::now().timestamp())
            }
            _ => Err(TokenError::MissingToken),
        }
    }

    /// Verify a token as if the current time were `now`.
    ///
    /// A token is still valid at exactly `exp`.
    pub fn verify_at(&self, token: &str, now: i64) -> Result<Claims, TokenError> {
        if token.is_empty() {
            return Err(TokenError::MissingToken);
        }

        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            tracing::debug!("Token decode failed: {}", e);
            TokenError::InvalidToken
        })?;

        if now > data.claims.exp {
            return Err(TokenError::ExpiredToken);
        }
        Ok(data.claims)
    }
}
