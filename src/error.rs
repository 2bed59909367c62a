//! Error types for the job portal.

use thiserror::Error;

/// Common error type for the job portal.
#[derive(Error, Debug)]
pub enum PortalError {
    /// Database error.
    ///
    /// Errors from sqlx are converted automatically, except unique-constraint
    /// violations which become [`PortalError::Conflict`].
    #[error("database error: {0}")]
    Database(String),

    /// Database connection error.
    #[error("database connection error: {0}")]
    DatabaseConnection(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Authentication error.
    #[error("authentication error: {0}")]
    Auth(String),

    /// Permission denied error.
    #[error("permission denied: {0}")]
    Permission(String),

    /// Validation error for user input.
    #[error("validation error: {0}")]
    Validation(String),

    /// Resource not found (or hidden by an ownership filter).
    #[error("{0} not found")]
    NotFound(String),

    /// Duplicate unique key.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl From<sqlx::Error> for PortalError {
    fn from(e: sqlx::Error) -> Self {
        if let Some(db_err) = e.as_database_error() {
            if db_err.is_unique_violation() {
                return PortalError::Conflict(db_err.message().to_string());
            }
        }
        PortalError::Database(e.to_string())
    }
}

/// Result type alias for job portal operations.
pub type Result<T> = std::result::Result<T, PortalError>;
