//! Application model.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Review status of an application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    #[default]
    Pending,
    Accepted,
    Rejected,
}

impl ApplicationStatus {
    /// Convert to database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::Accepted => "accepted",
            ApplicationStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApplicationStatus {
    type Err = String;

    /// Case-insensitive, so `"Accepted"` from a form is accepted too.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(ApplicationStatus::Pending),
            "accepted" => Ok(ApplicationStatus::Accepted),
            "rejected" => Ok(ApplicationStatus::Rejected),
            _ => Err(format!("unknown application status: {s}")),
        }
    }
}

/// An application of a candidate to a job.
#[derive(Debug, Clone)]
pub struct Application {
    pub id: i64,
    pub job_id: i64,
    pub applicant_id: i64,
    pub status: ApplicationStatus,
    pub created_at: String,
    pub updated_at: String,
}

/// An application joined with the job it targets, as seen by the applicant.
#[derive(Debug, Clone)]
pub struct ApplicationSummary {
    pub application: Application,
    pub job_title: String,
    pub company_name: String,
    pub location: String,
}

/// An application joined with the applicant's contact data, as seen by the
/// recruiter who posted the job.
#[derive(Debug, Clone)]
pub struct Applicant {
    pub application: Application,
    pub fullname: String,
    pub email: String,
    pub phone_number: String,
    pub resume: Option<String>,
}
