//! API handlers.

pub mod application;
pub mod auth;
pub mod company;
pub mod job;

use std::sync::Arc;

use crate::auth::TokenService;
use crate::config::Config;
use crate::Database;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database handle (the pool is internally shared).
    pub db: Database,
    /// Session token issuer and verifier.
    pub tokens: Arc<TokenService>,
    /// Mark the session cookie `Secure`.
    pub cookie_secure: bool,
}

impl AppState {
    /// Create a new application state.
    pub fn new(db: Database, tokens: Arc<TokenService>) -> Self {
        Self {
            db,
            tokens,
            cookie_secure: false,
        }
    }

    /// Create the state from configuration.
    pub fn from_config(db: Database, config: &Config) -> Self {
        let lifetime = i64::try_from(config.auth.token_expiry_secs).unwrap_or(i64::MAX);
        let tokens = Arc::new(TokenService::new(&config.auth.jwt_secret, lifetime));
        Self::new(db, tokens).with_cookie_secure(config.auth.cookie_secure)
    }

    /// Set whether the session cookie is marked `Secure`.
    pub fn with_cookie_secure(mut self, secure: bool) -> Self {
        self.cookie_secure = secure;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::TokenError;
    use crate::Role;

    #[tokio::test]
    async fn test_from_config_uses_configured_expiry() {
        let db = Database::open_in_memory().await.unwrap();
        let mut config = Config::default();
        config.auth.jwt_secret = "secret".to_string();
        config.auth.token_expiry_secs = 3600;
        config.auth.cookie_secure = true;

        let state = AppState::from_config(db, &config);
        assert_eq!(state.tokens.lifetime_secs(), 3600);
        assert!(state.cookie_secure);
    }

    #[tokio::test]
    async fn test_huge_expiry_fails_issue_instead_of_overflowing() {
        let db = Database::open_in_memory().await.unwrap();
        let mut config = Config::default();
        config.auth.jwt_secret = "secret".to_string();
        config.auth.token_expiry_secs = u64::MAX;
        assert!(config.validate().is_err());

        let state = AppState::from_config(db, &config);
        assert!(matches!(
            state.tokens.issue(1, Role::Candidate),
            Err(TokenError::Signing(_))
        ));
    }
}
