//! User repository (the credential store).

use super::user::normalize_email;
use super::{DbPool, NewUser, ProfileUpdate, Role, User};
use crate::{PortalError, Result};

const USER_COLUMNS: &str = "id, fullname, email, phone_number, password, role, bio, skills, \
     resume, resume_original_name, profile_photo, company_id, created_at, updated_at";

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    fullname: String,
    email: String,
    phone_number: String,
    password: String,
    role: String,
    bio: Option<String>,
    skills: String,
    resume: Option<String>,
    resume_original_name: Option<String>,
    profile_photo: String,
    company_id: Option<i64>,
    created_at: String,
    updated_at: String,
}

impl TryFrom<UserRow> for User {
    type Error = PortalError;

    fn try_from(row: UserRow) -> Result<Self> {
        let role: Role = row.role.parse().map_err(PortalError::Database)?;
        Ok(User {
            id: row.id,
            fullname: row.fullname,
            email: row.email,
            phone_number: row.phone_number,
            password: row.password,
            role,
            bio: row.bio,
            skills: serde_json::from_str(&row.skills).unwrap_or_default(),
            resume: row.resume,
            resume_original_name: row.resume_original_name,
            profile_photo: row.profile_photo,
            company_id: row.company_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Repository for identity records.
pub struct UserRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> UserRepository<'a> {
    /// Create a new repository instance.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Insert a new user. A taken email yields [`PortalError::Conflict`].
    pub async fn create(&self, new_user: &NewUser) -> Result<User> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO users (fullname, email, phone_number, password, role)
             VALUES ($1, $2, $3, $4, $5) RETURNING id",
        )
        .bind(&new_user.fullname)
        .bind(&new_user.email)
        .bind(&new_user.phone_number)
        .bind(&new_user.password)
        .bind(new_user.role.as_str())
        .fetch_one(self.pool)
        .await?;

        self.get_by_id(id)
            .await?
            .ok_or_else(|| PortalError::NotFound("user".into()))
    }

    /// Get a user by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;
        row.map(User::try_from).transpose()
    }

    /// Get a user by email (case-insensitive).
    pub async fn get_by_email(&self, email: &str) -> Result<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1");
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(normalize_email(email))
            .fetch_optional(self.pool)
            .await?;
        row.map(User::try_from).transpose()
    }

    /// Check if an email is already registered (case-insensitive).
    pub async fn email_exists(&self, email: &str) -> Result<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
            .bind(normalize_email(email))
            .fetch_one(self.pool)
            .await?;
        Ok(exists)
    }

    /// Apply a profile update; unset fields are left unchanged.
    ///
    /// Returns `None` when the user does not exist.
    pub async fn update_profile(&self, id: i64, update: &ProfileUpdate) -> Result<Option<User>> {
        if update.is_empty() {
            return self.get_by_id(id).await;
        }

        let skills = update
            .skills
            .as_ref()
            .map(serde_json::to_string)
            .transpose()
            .map_err(|e| PortalError::Validation(e.to_string()))?;

        let result = sqlx::query(
            "UPDATE users SET
                bio = COALESCE($1, bio),
                skills = COALESCE($2, skills),
                resume = COALESCE($3, resume),
                resume_original_name = COALESCE($4, resume_original_name),
                profile_photo = COALESCE($5, profile_photo),
                company_id = COALESCE($6, company_id),
                updated_at = datetime('now')
             WHERE id = $7",
        )
        .bind(&update.bio)
        .bind(skills)
        .bind(&update.resume)
        .bind(&update.resume_original_name)
        .bind(&update.profile_photo)
        .bind(update.company_id)
        .bind(id)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.get_by_id(id).await
    }
}
