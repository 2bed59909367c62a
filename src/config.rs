//! Configuration module for the job portal.

use serde::Deserialize;
use std::path::Path;

use crate::{PortalError, Result};

/// Environment variable that overrides the token signing secret.
pub const JWT_SECRET_ENV: &str = "JOBPORTAL_JWT_SECRET";

/// Upper bound for `auth.token_expiry_secs` (10 years).
pub const MAX_TOKEN_EXPIRY_SECS: u64 = 10 * 365 * 86_400;

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port number to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_db_path")]
    pub path: String,
}

fn default_db_path() -> String {
    "data/jobportal.db".to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

/// Authentication configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Secret used to sign session tokens (must be set).
    #[serde(default)]
    pub jwt_secret: String,
    /// Session token lifetime in seconds.
    #[serde(default = "default_token_expiry")]
    pub token_expiry_secs: u64,
    /// Mark the session cookie `Secure` (requires HTTPS).
    #[serde(default)]
    pub cookie_secure: bool,
}

fn default_token_expiry() -> u64 {
    86_400 // 24 hours
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            token_expiry_secs: default_token_expiry(),
            cookie_secure: false,
        }
    }
}

/// Web API configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct WebConfig {
    /// CORS allowed origins.
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,
    /// Rate limit for the login endpoint (requests per minute).
    #[serde(default = "default_login_rate_limit")]
    pub login_rate_limit: u32,
    /// Rate limit for general API endpoints (requests per minute).
    #[serde(default = "default_api_rate_limit")]
    pub api_rate_limit: u32,
    /// Take client addresses from `X-Forwarded-For` / `X-Real-IP`.
    /// Enable only behind a reverse proxy that overwrites those headers.
    #[serde(default)]
    pub trust_proxy: bool,
}

fn default_cors_origins() -> Vec<String> {
    vec!["http://localhost:5173".to_string()]
}

fn default_login_rate_limit() -> u32 {
    10
}

fn default_api_rate_limit() -> u32 {
    300
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            cors_origins: default_cors_origins(),
            login_rate_limit: default_login_rate_limit(),
            api_rate_limit: default_api_rate_limit(),
            trust_proxy: false,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Path to the log file.
    #[serde(default = "default_log_file")]
    pub file: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> String {
    "logs/jobportal.log".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

/// Main configuration structure.
///
/// Built once at process start and handed to the server; nothing reads
/// configuration from ambient global state afterwards.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Authentication configuration.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Web API configuration.
    #[serde(default)]
    pub web: WebConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(PortalError::Io)?;
        Self::parse(&content)
    }

    /// Load configuration from a TOML file and apply environment variable overrides.
    pub fn load_with_env<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| PortalError::Config(format!("config parse error: {e}")))
    }

    /// Apply environment variable overrides.
    ///
    /// - `JOBPORTAL_JWT_SECRET`: token signing secret
    pub fn apply_env_overrides(&mut self) {
        if let Ok(secret) = std::env::var(JWT_SECRET_ENV) {
            if !secret.is_empty() {
                self.auth.jwt_secret = secret;
            }
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.auth.jwt_secret.is_empty() {
            return Err(PortalError::Config(format!(
                "auth.jwt_secret is not set. Set it in config.toml or via {JWT_SECRET_ENV}."
            )));
        }
        if self.auth.token_expiry_secs == 0 {
            return Err(PortalError::Config(
                "auth.token_expiry_secs must be greater than zero".to_string(),
            ));
        }
        if self.auth.token_expiry_secs > MAX_TOKEN_EXPIRY_SECS {
            return Err(PortalError::Config(format!(
                "auth.token_expiry_secs must not exceed {MAX_TOKEN_EXPIRY_SECS}"
            )));
        }
        Ok(())
    }
}
