//! jobportal - job portal backend.
//!
//! Recruiters register companies and post jobs; candidates browse and
//! apply. Sessions are signed tokens carried in an HttpOnly cookie, and
//! every mutation is checked against the resource's owner.

pub mod application;
pub mod auth;
pub mod company;
pub mod config;
pub mod db;
pub mod error;
pub mod job;
pub mod logging;
pub mod web;

pub use auth::{hash_password, validate_password, verify_password, PasswordError, TokenService};
pub use config::Config;
pub use db::{Database, NewUser, Role, User, UserRepository};
pub use error::{PortalError, Result};
pub use web::WebServer;
