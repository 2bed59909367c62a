//! Job listing handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use super::AppState;
use crate::auth::{authorize_job_creation, require_role};
use crate::company::CompanyRepository;
use crate::db::Role;
use crate::job::{JobRepository, JobUpdate};
use crate::web::dto::{
    ApiResponse, CreateJobRequest, JobResponse, MessageResponse, UpdateJobRequest, ValidatedJson,
};
use crate::web::error::ApiError;
use crate::web::middleware::AuthUser;

/// POST /api/jobs - Post a job under one of the caller's companies.
///
/// Posting under a company owned by someone else is an explicit 403.
pub async fn create_job(
    State(state): State<Arc<AppState>>,
    AuthUser(identity): AuthUser,
    ValidatedJson(req): ValidatedJson<CreateJobRequest>,
) -> Result<(StatusCode, Json<ApiResponse<JobResponse>>), ApiError> {
    require_role(&identity, Role::Recruiter).into_result()?;

    let company = CompanyRepository::new(state.db.pool())
        .get_by_id(req.company_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Company not found"))?;

    if !authorize_job_creation(&identity, &company).is_allowed() {
        tracing::warn!(
            user_id = identity.id,
            company_id = company.id,
            "Job creation under a foreign company denied"
        );
        return Err(ApiError::forbidden(
            "You can only post jobs under your own company",
        ));
    }

    let job = JobRepository::new(state.db.pool())
        .create(&req.into_new_job(identity.id))
        .await?;
    tracing::info!(job_id = job.id, company_id = company.id, "Job created");

    Ok((StatusCode::CREATED, Json(ApiResponse::new(job.into()))))
}

/// GET /api/jobs - All jobs, newest first.
pub async fn list_jobs(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<JobResponse>>>, ApiError> {
    let jobs = JobRepository::new(state.db.pool()).list_all().await?;
    Ok(Json(ApiResponse::new(
        jobs.into_iter().map(JobResponse::from).collect(),
    )))
}

/// GET /api/jobs/my-jobs - Jobs posted by the caller.
pub async fn list_my_jobs(
    State(state): State<Arc<AppState>>,
    AuthUser(identity): AuthUser,
) -> Result<Json<ApiResponse<Vec<JobResponse>>>, ApiError> {
    let jobs = JobRepository::new(state.db.pool())
        .list_by_creator(identity.id)
        .await?;
    Ok(Json(ApiResponse::new(
        jobs.into_iter().map(JobResponse::from).collect(),
    )))
}

/// GET /api/jobs/:id - A single job.
pub async fn get_job(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<JobResponse>>, ApiError> {
    let job = JobRepository::new(state.db.pool())
        .get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Job not found"))?;
    Ok(Json(ApiResponse::new(job.into())))
}

/// PUT /api/jobs/:id - Update a job posted by the caller.
pub async fn update_job(
    State(state): State<Arc<AppState>>,
    AuthUser(identity): AuthUser,
    Path(id): Path<i64>,
    ValidatedJson(req): ValidatedJson<UpdateJobRequest>,
) -> Result<Json<ApiResponse<JobResponse>>, ApiError> {
    let update = JobUpdate::from(req);
    let job = JobRepository::new(state.db.pool())
        .update_owned(id, identity.id, &update)
        .await?
        .ok_or_else(|| ApiError::not_found("Job not found"))?;
    Ok(Json(ApiResponse::new(job.into())))
}

/// DELETE /api/jobs/:id - Delete a job posted by the caller.
pub async fn delete_job(
    State(state): State<Arc<AppState>>,
    AuthUser(identity): AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    if !JobRepository::new(state.db.pool())
        .delete_owned(id, identity.id)
        .await?
    {
        return Err(ApiError::not_found("Job not found"));
    }

    tracing::info!(job_id = id, "Job deleted");
    Ok(Json(ApiResponse::new(MessageResponse::new(
        "Job deleted successfully",
    ))))
}
