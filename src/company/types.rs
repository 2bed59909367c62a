//! Company model.

/// A company posted by a recruiter.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Company {
    /// Unique company ID.
    pub id: i64,
    /// Company name (unique).
    pub name: String,
    pub description: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    /// Logo URL.
    pub logo: Option<String>,
    /// Identity that created the company. Never reassigned.
    pub owner_id: i64,
    /// Creation timestamp.
    pub created_at: String,
    /// Last update timestamp.
    pub updated_at: String,
}

/// Data for creating a new company.
#[derive(Debug, Clone)]
pub struct NewCompany {
    pub name: String,
    pub description: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub logo: Option<String>,
    pub owner_id: i64,
}

impl NewCompany {
    /// Create a new company with minimal required fields.
    pub fn new(name: impl Into<String>, owner_id: i64) -> Self {
        Self {
            name: name.into(),
            description: None,
            website: None,
            location: None,
            logo: None,
            owner_id,
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the website.
    pub fn with_website(mut self, website: impl Into<String>) -> Self {
        self.website = Some(website.into());
        self
    }

    /// Set the location.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }
}

/// Data for updating a company. The owner cannot be changed.
#[derive(Debug, Clone, Default)]
pub struct CompanyUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub logo: Option<String>,
}

impl CompanyUpdate {
    /// Create an empty update.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}
