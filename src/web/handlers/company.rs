//! Company handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use super::AppState;
use crate::auth::require_role;
use crate::company::{CompanyRepository, CompanyUpdate};
use crate::db::Role;
use crate::web::dto::{
    ApiResponse, CompanyResponse, CreateCompanyRequest, MessageResponse, UpdateCompanyRequest,
    ValidatedJson,
};
use crate::web::error::ApiError;
use crate::web::middleware::AuthUser;

/// POST /api/company - Register a company owned by the caller.
pub async fn create_company(
    State(state): State<Arc<AppState>>,
    AuthUser(identity): AuthUser,
    ValidatedJson(req): ValidatedJson<CreateCompanyRequest>,
) -> Result<(StatusCode, Json<ApiResponse<CompanyResponse>>), ApiError> {
    require_role(&identity, Role::Recruiter).into_result()?;

    let repo = CompanyRepository::new(state.db.pool());
    let new_company = req.into_new_company(identity.id);
    if repo.name_exists(&new_company.name).await? {
        return Err(ApiError::conflict("Company name already exists"));
    }

    let company = repo.create(&new_company).await?;
    tracing::info!(company_id = company.id, owner_id = identity.id, "Company created");

    Ok((StatusCode::CREATED, Json(ApiResponse::new(company.into()))))
}

/// GET /api/company - Companies owned by the caller.
pub async fn list_my_companies(
    State(state): State<Arc<AppState>>,
    AuthUser(identity): AuthUser,
) -> Result<Json<ApiResponse<Vec<CompanyResponse>>>, ApiError> {
    let companies = CompanyRepository::new(state.db.pool())
        .list_by_owner(identity.id)
        .await?;
    Ok(Json(ApiResponse::new(
        companies.into_iter().map(CompanyResponse::from).collect(),
    )))
}

/// GET /api/company/all - All companies.
pub async fn list_all_companies(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<CompanyResponse>>>, ApiError> {
    let companies = CompanyRepository::new(state.db.pool()).list_all().await?;
    Ok(Json(ApiResponse::new(
        companies.into_iter().map(CompanyResponse::from).collect(),
    )))
}

/// PUT /api/company/:id - Update a company owned by the caller.
///
/// A company owned by someone else is reported as not found.
pub async fn update_company(
    State(state): State<Arc<AppState>>,
    AuthUser(identity): AuthUser,
    Path(id): Path<i64>,
    ValidatedJson(req): ValidatedJson<UpdateCompanyRequest>,
) -> Result<Json<ApiResponse<CompanyResponse>>, ApiError> {
    let update = CompanyUpdate::from(req);
    let company = CompanyRepository::new(state.db.pool())
        .update_owned(id, identity.id, &update)
        .await?
        .ok_or_else(|| ApiError::not_found("Company not found"))?;

    Ok(Json(ApiResponse::new(company.into())))
}

/// DELETE /api/company/:id - Delete a company owned by the caller.
pub async fn delete_company(
    State(state): State<Arc<AppState>>,
    AuthUser(identity): AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let deleted = CompanyRepository::new(state.db.pool())
        .delete_owned(id, identity.id)
        .await?;
    if !deleted {
        return Err(ApiError::not_found("Company not found"));
    }

    tracing::info!(company_id = id, owner_id = identity.id, "Company deleted");
    Ok(Json(ApiResponse::new(MessageResponse::new(
        "Company deleted successfully",
    ))))
}
