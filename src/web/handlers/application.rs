//! Application handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use super::AppState;
use crate::application::ApplicationRepository;
use crate::auth::require_role;
use crate::db::Role;
use crate::job::JobRepository;
use crate::web::dto::{
    ApiResponse, ApplicationResponse, ApplyRequest, JobApplicationResponse,
    MyApplicationResponse, UpdateStatusRequest, ValidatedJson,
};
use crate::web::error::ApiError;
use crate::web::middleware::AuthUser;

/// POST /api/applications/apply - Apply to a job.
pub async fn apply(
    State(state): State<Arc<AppState>>,
    AuthUser(identity): AuthUser,
    ValidatedJson(req): ValidatedJson<ApplyRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ApplicationResponse>>), ApiError> {
    require_role(&identity, Role::Candidate).into_result()?;

    if JobRepository::new(state.db.pool())
        .get_by_id(req.job_id)
        .await?
        .is_none()
    {
        return Err(ApiError::not_found("Job not found"));
    }

    let repo = ApplicationRepository::new(state.db.pool());
    if repo.exists_for(req.job_id, identity.id).await? {
        return Err(ApiError::conflict("You have already applied for this job"));
    }

    // The unique index catches a concurrent duplicate (409).
    let application = repo.create(req.job_id, identity.id).await?;
    tracing::info!(
        application_id = application.id,
        job_id = req.job_id,
        "Application submitted"
    );

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(application.into())),
    ))
}

/// GET /api/applications/my-applications - The caller's applications.
pub async fn list_my_applications(
    State(state): State<Arc<AppState>>,
    AuthUser(identity): AuthUser,
) -> Result<Json<ApiResponse<Vec<MyApplicationResponse>>>, ApiError> {
    let applications = ApplicationRepository::new(state.db.pool())
        .list_by_applicant(identity.id)
        .await?;
    Ok(Json(ApiResponse::new(
        applications
            .into_iter()
            .map(MyApplicationResponse::from)
            .collect(),
    )))
}

/// GET /api/applications/job/:job_id - Applicants of a job the caller posted.
pub async fn list_job_applications(
    State(state): State<Arc<AppState>>,
    AuthUser(identity): AuthUser,
    Path(job_id): Path<i64>,
) -> Result<Json<ApiResponse<Vec<JobApplicationResponse>>>, ApiError> {
    let applicants = ApplicationRepository::new(state.db.pool())
        .list_for_job_owner(job_id, identity.id)
        .await?
        .ok_or_else(|| ApiError::not_found("Job not found"))?;
    Ok(Json(ApiResponse::new(
        applicants
            .into_iter()
            .map(JobApplicationResponse::from)
            .collect(),
    )))
}

/// PUT /api/applications/:id/status - Accept or reject an application.
///
/// Only the recruiter who posted the job may change the status; anyone
/// else gets 404.
pub async fn update_status(
    State(state): State<Arc<AppState>>,
    AuthUser(identity): AuthUser,
    Path(id): Path<i64>,
    ValidatedJson(req): ValidatedJson<UpdateStatusRequest>,
) -> Result<Json<ApiResponse<ApplicationResponse>>, ApiError> {
    let status = req.parse().map_err(ApiError::bad_request)?;

    let application = ApplicationRepository::new(state.db.pool())
        .update_status_for_job_owner(id, identity.id, status)
        .await?
        .ok_or_else(|| ApiError::not_found("Application not found"))?;

    tracing::info!(application_id = id, status = %status, "Application status updated");
    Ok(Json(ApiResponse::new(application.into())))
}
