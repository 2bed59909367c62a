//! Authentication and authorization.
//!
//! Secret hashing, session tokens and the ownership guard.

pub mod guard;
mod password;
pub mod token;

pub use guard::{
    authorize_job_creation, authorize_owner, require_role, Decision, DenialReason, Identity,
};
pub use password::{
    hash_password, validate_password, verify_password, PasswordError, MAX_PASSWORD_LENGTH,
    MIN_PASSWORD_LENGTH,
};
pub use token::{Claims, TokenError, TokenService, DEFAULT_TOKEN_LIFETIME_SECS, TOKEN_COOKIE};
