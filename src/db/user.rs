//! Identity model.
//!
//! Defines the `User` record and the `Role` it was registered with.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Role an identity registers with. Immutable after creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Job seeker. Spelled `student` on the wire and in storage.
    #[serde(rename = "student")]
    Candidate,
    /// Posts companies and jobs.
    #[serde(rename = "recruiter")]
    Recruiter,
}

impl Role {
    /// Wire / database representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Candidate => "student",
            Role::Recruiter => "recruiter",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "student" => Ok(Role::Candidate),
            "recruiter" => Ok(Role::Recruiter),
            _ => Err(format!("unknown role: {s}")),
        }
    }
}

/// A registered identity.
#[derive(Debug, Clone)]
pub struct User {
    /// Unique user ID.
    pub id: i64,
    /// Display name.
    pub fullname: String,
    /// Email address, stored lower-cased.
    pub email: String,
    /// Phone number.
    pub phone_number: String,
    /// Password hash (Argon2 PHC string).
    pub password: String,
    /// Registered role.
    pub role: Role,
    /// Self-introduction.
    pub bio: Option<String>,
    /// Skill tags.
    pub skills: Vec<String>,
    /// Resume URL.
    pub resume: Option<String>,
    /// Original file name of the resume.
    pub resume_original_name: Option<String>,
    /// Profile photo URL (empty when unset).
    pub profile_photo: String,
    /// Company the user is affiliated with.
    pub company_id: Option<i64>,
    /// Creation timestamp.
    pub created_at: String,
    /// Last update timestamp.
    pub updated_at: String,
}

/// Data for creating a new user.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub fullname: String,
    pub email: String,
    pub phone_number: String,
    /// Pre-hashed password.
    pub password: String,
    pub role: Role,
}

impl NewUser {
    /// Create a new user record. The email is normalized.
    pub fn new(
        fullname: impl Into<String>,
        email: &str,
        phone_number: impl Into<String>,
        password: impl Into<String>,
        role: Role,
    ) -> Self {
        Self {
            fullname: fullname.into(),
            email: normalize_email(email),
            phone_number: phone_number.into(),
            password: password.into(),
            role,
        }
    }
}

/// Profile fields to change. `None` leaves a field untouched.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub bio: Option<String>,
    pub skills: Option<Vec<String>>,
    pub resume: Option<String>,
    pub resume_original_name: Option<String>,
    pub profile_photo: Option<String>,
    pub company_id: Option<i64>,
}

impl ProfileUpdate {
    /// Check if no fields are set.
    pub fn is_empty(&self) -> bool {
        self.bio.is_none()
            && self.skills.is_none()
            && self.resume.is_none()
            && self.resume_original_name.is_none()
            && self.profile_photo.is_none()
            && self.company_id.is_none()
    }
}

/// Normalize an email for storage and lookup (trimmed, lower-cased).
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
