//! Request DTOs for Web API.
//!
//! Field names are camelCase on the wire.

use serde::{Deserialize, Deserializer};
use validator::Validate;

use crate::application::ApplicationStatus;
use crate::company::{CompanyUpdate, NewCompany};
use crate::db::{ProfileUpdate, Role};
use crate::job::{JobType, JobUpdate, NewJob};

/// Deserialize a string with surrounding whitespace removed, so length
/// checks see what will be stored.
fn trimmed<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let value = String::deserialize(deserializer)?;
    Ok(value.trim().to_string())
}

fn trimmed_opt<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.map(|v| v.trim().to_string()))
}

/// User registration request.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[serde(deserialize_with = "trimmed")]
    #[validate(length(min = 1, max = 100, message = "Full name is required"))]
    pub fullname: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[serde(deserialize_with = "trimmed")]
    #[validate(length(min = 1, max = 32, message = "Phone number is required"))]
    pub phone_number: String,
    #[validate(length(min = 6, max = 128, message = "Password must be 6-128 characters"))]
    pub password: String,
    pub role: Role,
}

/// Login request. The role must match the one registered.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
    pub role: Role,
}

/// Profile update request. Absent fields are left unchanged.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    #[validate(length(max = 2000))]
    pub bio: Option<String>,
    pub skills: Option<Vec<String>>,
    #[validate(length(max = 2048))]
    pub resume: Option<String>,
    #[validate(length(max = 255))]
    pub resume_original_name: Option<String>,
    #[validate(length(max = 2048))]
    pub profile_photo: Option<String>,
    pub company: Option<i64>,
}

impl UpdateProfileRequest {
    /// Convert into a repository update.
    pub fn into_update(self) -> ProfileUpdate {
        ProfileUpdate {
            bio: self.bio,
            skills: self.skills.map(|skills| {
                skills
                    .into_iter()
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            }),
            resume: self.resume,
            resume_original_name: self.resume_original_name,
            profile_photo: self.profile_photo,
            company_id: self.company,
        }
    }
}

/// Company creation request.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCompanyRequest {
    #[serde(deserialize_with = "trimmed")]
    #[validate(length(min = 1, max = 100, message = "Company name is required"))]
    pub name: String,
    #[validate(length(max = 5000))]
    pub description: Option<String>,
    #[validate(length(max = 2048))]
    pub website: Option<String>,
    #[validate(length(max = 200))]
    pub location: Option<String>,
    #[validate(length(max = 2048))]
    pub logo: Option<String>,
}

impl CreateCompanyRequest {
    /// Convert into a new company owned by `owner_id`.
    pub fn into_new_company(self, owner_id: i64) -> NewCompany {
        NewCompany {
            name: self.name,
            description: self.description,
            website: self.website,
            location: self.location,
            logo: self.logo,
            owner_id,
        }
    }
}

/// Company update request. The owner cannot be changed.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateCompanyRequest {
    #[serde(default, deserialize_with = "trimmed_opt")]
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(length(max = 5000))]
    pub description: Option<String>,
    #[validate(length(max = 2048))]
    pub website: Option<String>,
    #[validate(length(max = 200))]
    pub location: Option<String>,
    #[validate(length(max = 2048))]
    pub logo: Option<String>,
}

impl From<UpdateCompanyRequest> for CompanyUpdate {
    fn from(req: UpdateCompanyRequest) -> Self {
        CompanyUpdate {
            name: req.name,
            description: req.description,
            website: req.website,
            location: req.location,
            logo: req.logo,
        }
    }
}

/// Job creation request.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateJobRequest {
    #[validate(length(min = 1, max = 200, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, max = 10000, message = "Description is required"))]
    pub description: String,
    #[serde(default)]
    pub requirements: Vec<String>,
    pub salary: Option<i64>,
    #[validate(length(min = 1, max = 200, message = "Location is required"))]
    pub location: String,
    pub job_type: Option<JobType>,
    #[validate(length(min = 1, max = 200, message = "Position is required"))]
    pub position: String,
    pub company_id: i64,
}

impl CreateJobRequest {
    /// Convert into a new job posted by `created_by`.
    pub fn into_new_job(self, created_by: i64) -> NewJob {
        NewJob {
            title: self.title,
            description: self.description,
            requirements: self.requirements,
            salary: self.salary,
            location: self.location,
            job_type: self.job_type.unwrap_or_default(),
            position: self.position,
            company_id: self.company_id,
            created_by,
        }
    }
}

/// Job update request. Company and creator cannot be changed.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateJobRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    #[validate(length(min = 1, max = 10000))]
    pub description: Option<String>,
    pub requirements: Option<Vec<String>>,
    pub salary: Option<i64>,
    #[validate(length(min = 1, max = 200))]
    pub location: Option<String>,
    pub job_type: Option<JobType>,
    #[validate(length(min = 1, max = 200))]
    pub position: Option<String>,
}

impl From<UpdateJobRequest> for JobUpdate {
    fn from(req: UpdateJobRequest) -> Self {
        JobUpdate {
            title: req.title,
            description: req.description,
            requirements: req.requirements,
            salary: req.salary,
            location: req.location,
            job_type: req.job_type,
            position: req.position,
        }
    }
}

/// Apply-to-job request.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ApplyRequest {
    pub job_id: i64,
}

/// Application status update request.
///
/// The status is kept as a string so an unknown value is reported as a
/// 400 with a clear message rather than a generic JSON error.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateStatusRequest {
    #[validate(length(min = 1, message = "Status is required"))]
    pub status: String,
}

impl UpdateStatusRequest {
    /// Parse the requested status.
    pub fn parse(&self) -> Result<ApplicationStatus, String> {
        self.status.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_camel_case() {
        let req: RegisterRequest = serde_json::from_str(
            r#"{"fullname":"A","email":"a@x.com","phoneNumber":"1","password":"secret1","role":"student"}"#,
        )
        .unwrap();
        assert_eq!(req.phone_number, "1");
        assert_eq!(req.role, Role::Candidate);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_register_request_rejects_bad_email() {
        let req: RegisterRequest = serde_json::from_str(
            r#"{"fullname":"A","email":"nope","phoneNumber":"1","password":"secret1","role":"student"}"#,
        )
        .unwrap();
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));
    }

    #[test]
    fn test_register_request_unknown_role() {
        let result: Result<RegisterRequest, _> = serde_json::from_str(
            r#"{"fullname":"A","email":"a@x.com","phoneNumber":"1","password":"secret1","role":"admin"}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_register_request_blank_name_fails_validation() {
        let req: RegisterRequest = serde_json::from_str(
            r#"{"fullname":"   ","email":"a@x.com","phoneNumber":" 555 ","password":"secret1","role":"student"}"#,
        )
        .unwrap();
        assert_eq!(req.fullname, "");
        assert_eq!(req.phone_number, "555");
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("fullname"));
    }

    #[test]
    fn test_company_names_are_trimmed() {
        let req: CreateCompanyRequest = serde_json::from_str(r#"{"name":"  Acme "}"#).unwrap();
        assert_eq!(req.name, "Acme");
        let req: CreateCompanyRequest = serde_json::from_str(r#"{"name":"  "}"#).unwrap();
        assert!(req.validate().is_err());

        let req: UpdateCompanyRequest = serde_json::from_str(r#"{"name":" "}"#).unwrap();
        assert!(req.validate().is_err());
        let req: UpdateCompanyRequest = serde_json::from_str(r#"{"location":"Berlin"}"#).unwrap();
        assert!(req.name.is_none());
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_create_job_defaults() {
        let req: CreateJobRequest = serde_json::from_str(
            r#"{"title":"Dev","description":"Code","location":"Remote","position":"Eng","companyId":3}"#,
        )
        .unwrap();
        let job = req.into_new_job(9);
        assert_eq!(job.job_type, JobType::FullTime);
        assert!(job.requirements.is_empty());
        assert_eq!(job.company_id, 3);
        assert_eq!(job.created_by, 9);
    }

    #[test]
    fn test_profile_skills_trimmed() {
        let req = UpdateProfileRequest {
            skills: Some(vec![" rust ".into(), "".into(), "sql".into()]),
            ..Default::default()
        };
        assert_eq!(req.into_update().skills.unwrap(), vec!["rust", "sql"]);
    }

    #[test]
    fn test_update_status_parse() {
        let req = UpdateStatusRequest {
            status: "accepted".into(),
        };
        assert_eq!(req.parse(), Ok(ApplicationStatus::Accepted));
        let req = UpdateStatusRequest {
            status: "hired".into(),
        };
        assert!(req.parse().is_err());
    }
}
