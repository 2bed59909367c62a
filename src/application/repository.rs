//! Application repository.
//!
//! Recruiter-side reads and the status update are filtered through
//! `jobs.created_by`, so applications to someone else's job are invisible.

use super::types::{Applicant, Application, ApplicationStatus, ApplicationSummary};
use crate::db::DbPool;
use crate::{PortalError, Result};

#[derive(sqlx::FromRow)]
struct ApplicationRow {
    id: i64,
    job_id: i64,
    applicant_id: i64,
    status: String,
    created_at: String,
    updated_at: String,
}

impl TryFrom<ApplicationRow> for Application {
    type Error = PortalError;

    fn try_from(row: ApplicationRow) -> Result<Self> {
        Ok(Application {
            id: row.id,
            job_id: row.job_id,
            applicant_id: row.applicant_id,
            status: row.status.parse().map_err(PortalError::Database)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct SummaryRow {
    #[sqlx(flatten)]
    application: ApplicationRow,
    job_title: String,
    company_name: String,
    location: String,
}

#[derive(sqlx::FromRow)]
struct ApplicantRow {
    #[sqlx(flatten)]
    application: ApplicationRow,
    fullname: String,
    email: String,
    phone_number: String,
    resume: Option<String>,
}

/// Repository for job applications.
pub struct ApplicationRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> ApplicationRepository<'a> {
    /// Create a new ApplicationRepository with the given database pool reference.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Record an application with status `pending`.
    ///
    /// A second application by the same applicant to the same job yields
    /// [`PortalError::Conflict`] through the unique index.
    pub async fn create(&self, job_id: i64, applicant_id: i64) -> Result<Application> {
        let row = sqlx::query_as::<_, ApplicationRow>(
            "INSERT INTO applications (job_id, applicant_id) VALUES ($1, $2)
             RETURNING id, job_id, applicant_id, status, created_at, updated_at",
        )
        .bind(job_id)
        .bind(applicant_id)
        .fetch_one(self.pool)
        .await?;
        row.try_into()
    }

    /// Check whether the applicant already applied to the job.
    pub async fn exists_for(&self, job_id: i64, applicant_id: i64) -> Result<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM applications WHERE job_id = $1 AND applicant_id = $2)",
        )
        .bind(job_id)
        .bind(applicant_id)
        .fetch_one(self.pool)
        .await?;
        Ok(exists)
    }

    /// List the applicant's own applications, newest first.
    pub async fn list_by_applicant(&self, applicant_id: i64) -> Result<Vec<ApplicationSummary>> {
        let rows = sqlx::query_as::<_, SummaryRow>(
            "SELECT a.id, a.job_id, a.applicant_id, a.status, a.created_at, a.updated_at,
                    j.title AS job_title, c.name AS company_name, j.location
             FROM applications a
             JOIN jobs j ON j.id = a.job_id
             JOIN companies c ON c.id = j.company_id
             WHERE a.applicant_id = $1
             ORDER BY a.created_at DESC, a.id DESC",
        )
        .bind(applicant_id)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter()
            .map(|row| {
                Ok(ApplicationSummary {
                    application: row.application.try_into()?,
                    job_title: row.job_title,
                    company_name: row.company_name,
                    location: row.location,
                })
            })
            .collect()
    }

    /// List applicants of a job posted by `recruiter_id`.
    ///
    /// Returns `None` when the job does not exist or was posted by someone
    /// else.
    pub async fn list_for_job_owner(
        &self,
        job_id: i64,
        recruiter_id: i64,
    ) -> Result<Option<Vec<Applicant>>> {
        let owned: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM jobs WHERE id = $1 AND created_by = $2)",
        )
        .bind(job_id)
        .bind(recruiter_id)
        .fetch_one(self.pool)
        .await?;
        if !owned {
            return Ok(None);
        }

        let rows = sqlx::query_as::<_, ApplicantRow>(
            "SELECT a.id, a.job_id, a.applicant_id, a.status, a.created_at, a.updated_at,
                    u.fullname, u.email, u.phone_number, u.resume
             FROM applications a
             JOIN users u ON u.id = a.applicant_id
             WHERE a.job_id = $1
             ORDER BY a.created_at ASC, a.id ASC",
        )
        .bind(job_id)
        .fetch_all(self.pool)
        .await?;

        let applicants = rows
            .into_iter()
            .map(|row| {
                Ok(Applicant {
                    application: row.application.try_into()?,
                    fullname: row.fullname,
                    email: row.email,
                    phone_number: row.phone_number,
                    resume: row.resume,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Some(applicants))
    }

    /// Set the status of an application to a job posted by `recruiter_id`.
    ///
    /// Returns `None` when the application does not exist or its job was
    /// posted by someone else.
    pub async fn update_status_for_job_owner(
        &self,
        id: i64,
        recruiter_id: i64,
        status: ApplicationStatus,
    ) -> Result<Option<Application>> {
        let row = sqlx::query_as::<_, ApplicationRow>(
            "UPDATE applications SET status = $1, updated_at = datetime('now')
             WHERE id = $2
               AND job_id IN (SELECT id FROM jobs WHERE created_by = $3)
             RETURNING id, job_id, applicant_id, status, created_at, updated_at",
        )
        .bind(status.as_str())
        .bind(id)
        .bind(recruiter_id)
        .fetch_optional(self.pool)
        .await?;
        row.map(Application::try_from).transpose()
    }
}
