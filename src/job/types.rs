//! Job listing model.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Employment type of a job listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum JobType {
    #[default]
    FullTime,
    PartTime,
    Internship,
    Contract,
}

impl JobType {
    /// Convert to database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            JobType::FullTime => "full-time",
            JobType::PartTime => "part-time",
            JobType::Internship => "internship",
            JobType::Contract => "contract",
        }
    }
}

impl fmt::Display for JobType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JobType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "full-time" => Ok(JobType::FullTime),
            "part-time" => Ok(JobType::PartTime),
            "internship" => Ok(JobType::Internship),
            "contract" => Ok(JobType::Contract),
            _ => Err(format!("unknown job type: {s}")),
        }
    }
}

/// A job listing.
#[derive(Debug, Clone)]
pub struct Job {
    /// Unique job ID.
    pub id: i64,
    pub title: String,
    pub description: String,
    pub requirements: Vec<String>,
    pub salary: Option<i64>,
    pub location: String,
    pub job_type: JobType,
    pub position: String,
    /// Company the job is posted under.
    pub company_id: i64,
    /// Name of that company (joined at read time).
    pub company_name: String,
    /// Recruiter who posted the job. Never reassigned.
    pub created_by: i64,
    /// Creation timestamp.
    pub created_at: String,
    /// Last update timestamp.
    pub updated_at: String,
}

/// Data for creating a new job listing.
#[derive(Debug, Clone)]
pub struct NewJob {
    pub title: String,
    pub description: String,
    pub requirements: Vec<String>,
    pub salary: Option<i64>,
    pub location: String,
    pub job_type: JobType,
    pub position: String,
    pub company_id: i64,
    pub created_by: i64,
}

impl NewJob {
    /// Create a new job with the required fields.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        location: impl Into<String>,
        position: impl Into<String>,
        company_id: i64,
        created_by: i64,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            requirements: Vec::new(),
            salary: None,
            location: location.into(),
            job_type: JobType::default(),
            position: position.into(),
            company_id,
            created_by,
        }
    }

    /// Set the requirements.
    pub fn with_requirements(mut self, requirements: Vec<String>) -> Self {
        self.requirements = requirements;
        self
    }

    /// Set the salary.
    pub fn with_salary(mut self, salary: i64) -> Self {
        self.salary = Some(salary);
        self
    }

    /// Set the job type.
    pub fn with_job_type(mut self, job_type: JobType) -> Self {
        self.job_type = job_type;
        self
    }
}

/// Data for updating a job listing. Company and creator are fixed.
#[derive(Debug, Clone, Default)]
pub struct JobUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub requirements: Option<Vec<String>>,
    pub salary: Option<i64>,
    pub location: Option<String>,
    pub job_type: Option<JobType>,
    pub position: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_type_round_trip_names() {
        for job_type in [
            JobType::FullTime,
            JobType::PartTime,
            JobType::Internship,
            JobType::Contract,
        ] {
            assert_eq!(job_type.as_str().parse::<JobType>(), Ok(job_type));
        }
        assert!("freelance".parse::<JobType>().is_err());
    }

    #[test]
    fn test_job_type_serde_matches_db_names() {
        assert_eq!(
            serde_json::to_string(&JobType::PartTime).unwrap(),
            "\"part-time\""
        );
        let parsed: JobType = serde_json::from_str("\"internship\"").unwrap();
        assert_eq!(parsed, JobType::Internship);
    }

    #[test]
    fn test_new_job_defaults() {
        let job = NewJob::new("Dev", "Build things", "Remote", "Engineer", 1, 2);
        assert_eq!(job.job_type, JobType::FullTime);
        assert!(job.requirements.is_empty());
        assert!(job.salary.is_none());
    }
}
