//! Response DTOs for Web API.

use serde::Serialize;

use crate::application::{Applicant, Application, ApplicationStatus, ApplicationSummary};
use crate::company::Company;
use crate::db::{Role, User};
use crate::job::{Job, JobType};

/// Generic API response wrapper.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Create a new API response.
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// Plain acknowledgement.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Registration result.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub user_id: i64,
    pub message: String,
}

/// Login result. The token is also set as the `token` cookie.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    /// Token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserResponse,
}

/// Profile section of a user.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub bio: Option<String>,
    pub skills: Vec<String>,
    pub resume: Option<String>,
    pub resume_original_name: Option<String>,
    pub profile_photo: String,
    pub company: Option<i64>,
}

/// A user as returned to themselves. The password hash is never included.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: i64,
    pub fullname: String,
    pub email: String,
    pub phone_number: String,
    pub role: Role,
    pub profile: ProfileResponse,
    pub created_at: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            fullname: user.fullname,
            email: user.email,
            phone_number: user.phone_number,
            role: user.role,
            profile: ProfileResponse {
                bio: user.bio,
                skills: user.skills,
                resume: user.resume,
                resume_original_name: user.resume_original_name,
                profile_photo: user.profile_photo,
                company: user.company_id,
            },
            created_at: user.created_at,
        }
    }
}

/// A company.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyResponse {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub logo: Option<String>,
    pub owner_id: i64,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Company> for CompanyResponse {
    fn from(company: Company) -> Self {
        Self {
            id: company.id,
            name: company.name,
            description: company.description,
            website: company.website,
            location: company.location,
            logo: company.logo,
            owner_id: company.owner_id,
            created_at: company.created_at,
            updated_at: company.updated_at,
        }
    }
}

/// Company reference embedded in a job.
#[derive(Debug, Serialize)]
pub struct CompanyRef {
    pub id: i64,
    pub name: String,
}

/// A job listing.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobResponse {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub requirements: Vec<String>,
    pub salary: Option<i64>,
    pub location: String,
    pub job_type: JobType,
    pub position: String,
    pub company: CompanyRef,
    pub created_by: i64,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Job> for JobResponse {
    fn from(job: Job) -> Self {
        Self {
            id: job.id,
            title: job.title,
            description: job.description,
            requirements: job.requirements,
            salary: job.salary,
            location: job.location,
            job_type: job.job_type,
            position: job.position,
            company: CompanyRef {
                id: job.company_id,
                name: job.company_name,
            },
            created_by: job.created_by,
            created_at: job.created_at,
            updated_at: job.updated_at,
        }
    }
}

/// An application.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationResponse {
    pub id: i64,
    pub job_id: i64,
    pub applicant_id: i64,
    pub status: ApplicationStatus,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Application> for ApplicationResponse {
    fn from(app: Application) -> Self {
        Self {
            id: app.id,
            job_id: app.job_id,
            applicant_id: app.applicant_id,
            status: app.status,
            created_at: app.created_at,
            updated_at: app.updated_at,
        }
    }
}

/// Job summary embedded in an applicant's own application list.
#[derive(Debug, Serialize)]
pub struct AppliedJobRef {
    pub id: i64,
    pub title: String,
    pub company: String,
    pub location: String,
}

/// An application as seen by the applicant.
#[derive(Debug, Serialize)]
pub struct MyApplicationResponse {
    #[serde(flatten)]
    pub application: ApplicationResponse,
    pub job: AppliedJobRef,
}

impl From<ApplicationSummary> for MyApplicationResponse {
    fn from(summary: ApplicationSummary) -> Self {
        let job = AppliedJobRef {
            id: summary.application.job_id,
            title: summary.job_title,
            company: summary.company_name,
            location: summary.location,
        };
        Self {
            application: summary.application.into(),
            job,
        }
    }
}

/// Applicant contact data shown to the recruiter.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicantRef {
    pub id: i64,
    pub fullname: String,
    pub email: String,
    pub phone_number: String,
    pub resume: Option<String>,
}

/// An application as seen by the recruiter who posted the job.
#[derive(Debug, Serialize)]
pub struct JobApplicationResponse {
    #[serde(flatten)]
    pub application: ApplicationResponse,
    pub applicant: ApplicantRef,
}

impl From<Applicant> for JobApplicationResponse {
    fn from(applicant: Applicant) -> Self {
        let contact = ApplicantRef {
            id: applicant.application.applicant_id,
            fullname: applicant.fullname,
            email: applicant.email,
            phone_number: applicant.phone_number,
            resume: applicant.resume,
        };
        Self {
            application: applicant.application.into(),
            applicant: contact,
        }
    }
}
