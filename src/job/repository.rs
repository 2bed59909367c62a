//! Job repository.
//!
//! Reads are public. Update and delete are filtered by `created_by`, so a
//! job posted by another recruiter behaves like a missing one.

use sqlx::QueryBuilder;

use super::types::{Job, JobType, JobUpdate, NewJob};
use crate::db::DbPool;
use crate::{PortalError, Result};

const JOB_SELECT: &str = "SELECT j.id, j.title, j.description, j.requirements, j.salary, \
     j.location, j.job_type, j.position, j.company_id, c.name AS company_name, j.created_by, \
     j.created_at, j.updated_at \
     FROM jobs j JOIN companies c ON c.id = j.company_id";

#[derive(sqlx::FromRow)]
struct JobRow {
    id: i64,
    title: String,
    description: String,
    requirements: String,
    salary: Option<i64>,
    location: String,
    job_type: String,
    position: String,
    company_id: i64,
    company_name: String,
    created_by: i64,
    created_at: String,
    updated_at: String,
}

impl TryFrom<JobRow> for Job {
    type Error = PortalError;

    fn try_from(row: JobRow) -> Result<Self> {
        let job_type: JobType = row.job_type.parse().map_err(PortalError::Database)?;
        Ok(Job {
            id: row.id,
            title: row.title,
            description: row.description,
            requirements: serde_json::from_str(&row.requirements).unwrap_or_default(),
            salary: row.salary,
            location: row.location,
            job_type,
            position: row.position,
            company_id: row.company_id,
            company_name: row.company_name,
            created_by: row.created_by,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn encode_requirements(requirements: &[String]) -> Result<String> {
    serde_json::to_string(requirements).map_err(|e| PortalError::Validation(e.to_string()))
}

/// Repository for job listing operations.
pub struct JobRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> JobRepository<'a> {
    /// Create a new JobRepository with the given database pool reference.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Create a new job listing.
    ///
    /// The caller is responsible for checking that `created_by` owns the
    /// company.
    pub async fn create(&self, new_job: &NewJob) -> Result<Job> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO jobs (title, description, requirements, salary, location, job_type,
                               position, company_id, created_by)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) RETURNING id",
        )
        .bind(&new_job.title)
        .bind(&new_job.description)
        .bind(encode_requirements(&new_job.requirements)?)
        .bind(new_job.salary)
        .bind(&new_job.location)
        .bind(new_job.job_type.as_str())
        .bind(&new_job.position)
        .bind(new_job.company_id)
        .bind(new_job.created_by)
        .fetch_one(self.pool)
        .await?;

        self.get_by_id(id)
            .await?
            .ok_or_else(|| PortalError::NotFound("job".to_string()))
    }

    /// Get a job by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<Job>> {
        let sql = format!("{JOB_SELECT} WHERE j.id = $1");
        let row = sqlx::query_as::<_, JobRow>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;
        row.map(Job::try_from).transpose()
    }

    /// List all jobs, newest first.
    pub async fn list_all(&self) -> Result<Vec<Job>> {
        let sql = format!("{JOB_SELECT} ORDER BY j.created_at DESC, j.id DESC");
        let rows = sqlx::query_as::<_, JobRow>(&sql)
            .fetch_all(self.pool)
            .await?;
        rows.into_iter().map(Job::try_from).collect()
    }

    /// List jobs posted by a recruiter, newest first.
    pub async fn list_by_creator(&self, created_by: i64) -> Result<Vec<Job>> {
        let sql =
            format!("{JOB_SELECT} WHERE j.created_by = $1 ORDER BY j.created_at DESC, j.id DESC");
        let rows = sqlx::query_as::<_, JobRow>(&sql)
            .bind(created_by)
            .fetch_all(self.pool)
            .await?;
        rows.into_iter().map(Job::try_from).collect()
    }

    /// Update a job posted by `created_by`.
    ///
    /// Returns `None` when no job with that ID belongs to the recruiter.
    pub async fn update_owned(
        &self,
        id: i64,
        created_by: i64,
        update: &JobUpdate,
    ) -> Result<Option<Job>> {
        let requirements = update
            .requirements
            .as_deref()
            .map(encode_requirements)
            .transpose()?;

        let mut query: QueryBuilder<sqlx::Sqlite> = QueryBuilder::new("UPDATE jobs SET ");
        let mut separated = query.separated(", ");

        if let Some(ref title) = update.title {
            separated.push("title = ");
            separated.push_bind_unseparated(title.clone());
        }
        if let Some(ref description) = update.description {
            separated.push("description = ");
            separated.push_bind_unseparated(description.clone());
        }
        if let Some(requirements) = requirements {
            separated.push("requirements = ");
            separated.push_bind_unseparated(requirements);
        }
        if let Some(salary) = update.salary {
            separated.push("salary = ");
            separated.push_bind_unseparated(salary);
        }
        if let Some(ref location) = update.location {
            separated.push("location = ");
            separated.push_bind_unseparated(location.clone());
        }
        if let Some(job_type) = update.job_type {
            separated.push("job_type = ");
            separated.push_bind_unseparated(job_type.as_str().to_string());
        }
        if let Some(ref position) = update.position {
            separated.push("position = ");
            separated.push_bind_unseparated(position.clone());
        }
        separated.push("updated_at = datetime('now')");

        query.push(" WHERE id = ");
        query.push_bind(id);
        query.push(" AND created_by = ");
        query.push_bind(created_by);

        let result = query.build().execute(self.pool).await?;
        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.get_by_id(id).await
    }

    /// Delete a job posted by `created_by`. Its applications are removed too.
    pub async fn delete_owned(&self, id: i64, created_by: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM jobs WHERE id = $1 AND created_by = $2")
            .bind(id)
            .bind(created_by)
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
