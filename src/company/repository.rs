//! Company repository.
//!
//! Update and delete take the requester's identity and fold the ownership
//! check into the `WHERE` clause, so a company owned by someone else looks
//! exactly like a missing one.

use sqlx::QueryBuilder;

use super::types::{Company, CompanyUpdate, NewCompany};
use crate::db::DbPool;
use crate::{PortalError, Result};

const COMPANY_COLUMNS: &str =
    "id, name, description, website, location, logo, owner_id, created_at, updated_at";

/// Repository for company CRUD operations.
pub struct CompanyRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> CompanyRepository<'a> {
    /// Create a new CompanyRepository with the given database pool reference.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Create a new company. A taken name yields [`PortalError::Conflict`].
    pub async fn create(&self, new_company: &NewCompany) -> Result<Company> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO companies (name, description, website, location, logo, owner_id)
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING id",
        )
        .bind(&new_company.name)
        .bind(&new_company.description)
        .bind(&new_company.website)
        .bind(&new_company.location)
        .bind(&new_company.logo)
        .bind(new_company.owner_id)
        .fetch_one(self.pool)
        .await?;

        self.get_by_id(id)
            .await?
            .ok_or_else(|| PortalError::NotFound("company".to_string()))
    }

    /// Get a company by ID, regardless of owner.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<Company>> {
        let sql = format!("SELECT {COMPANY_COLUMNS} FROM companies WHERE id = $1");
        let company = sqlx::query_as::<_, Company>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;
        Ok(company)
    }

    /// Check if a company name is already taken.
    pub async fn name_exists(&self, name: &str) -> Result<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM companies WHERE name = $1)")
                .bind(name)
                .fetch_one(self.pool)
                .await?;
        Ok(exists)
    }

    /// List companies owned by an identity.
    pub async fn list_by_owner(&self, owner_id: i64) -> Result<Vec<Company>> {
        let sql =
            format!("SELECT {COMPANY_COLUMNS} FROM companies WHERE owner_id = $1 ORDER BY id");
        let companies = sqlx::query_as::<_, Company>(&sql)
            .bind(owner_id)
            .fetch_all(self.pool)
            .await?;
        Ok(companies)
    }

    /// List all companies.
    pub async fn list_all(&self) -> Result<Vec<Company>> {
        let sql = format!("SELECT {COMPANY_COLUMNS} FROM companies ORDER BY id");
        let companies = sqlx::query_as::<_, Company>(&sql)
            .fetch_all(self.pool)
            .await?;
        Ok(companies)
    }

    /// Update a company owned by `owner_id`.
    ///
    /// Returns `None` when no company with that ID belongs to the owner.
    pub async fn update_owned(
        &self,
        id: i64,
        owner_id: i64,
        update: &CompanyUpdate,
    ) -> Result<Option<Company>> {
        let mut query: QueryBuilder<sqlx::Sqlite> = QueryBuilder::new("UPDATE companies SET ");
        let mut separated = query.separated(", ");

        if let Some(ref name) = update.name {
            separated.push("name = ");
            separated.push_bind_unseparated(name.clone());
        }
        if let Some(ref description) = update.description {
            separated.push("description = ");
            separated.push_bind_unseparated(description.clone());
        }
        if let Some(ref website) = update.website {
            separated.push("website = ");
            separated.push_bind_unseparated(website.clone());
        }
        if let Some(ref location) = update.location {
            separated.push("location = ");
            separated.push_bind_unseparated(location.clone());
        }
        if let Some(ref logo) = update.logo {
            separated.push("logo = ");
            separated.push_bind_unseparated(logo.clone());
        }
        separated.push("updated_at = datetime('now')");

        query.push(" WHERE id = ");
        query.push_bind(id);
        query.push(" AND owner_id = ");
        query.push_bind(owner_id);

        let result = query.build().execute(self.pool).await?;
        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.get_by_id(id).await
    }

    /// Delete a company owned by `owner_id`. Jobs under it are removed too.
    ///
    /// Returns `false` when no company with that ID belongs to the owner.
    pub async fn delete_owned(&self, id: i64, owner_id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM companies WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
