//! Database schema and migrations.
//!
//! Migrations are applied in order the first time a database is opened
//! or upgraded; `schema_version` records which ones have run.

/// Database migrations.
pub const MIGRATIONS: &[&str] = &[
    // v1: identities
    r#"
CREATE TABLE users (
    id                   INTEGER PRIMARY KEY AUTOINCREMENT,
    fullname             TEXT NOT NULL,
    email                TEXT NOT NULL UNIQUE COLLATE NOCASE,
    phone_number         TEXT NOT NULL,
    password             TEXT NOT NULL,           -- Argon2 PHC string
    role                 TEXT NOT NULL CHECK (role IN ('student', 'recruiter')),
    bio                  TEXT,
    skills               TEXT NOT NULL DEFAULT '[]',  -- JSON array
    resume               TEXT,
    resume_original_name TEXT,
    profile_photo        TEXT NOT NULL DEFAULT '',
    company_id           INTEGER,
    created_at           TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at           TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX idx_users_role ON users(role);
"#,
    // v2: companies, owned by the recruiter who created them
    r#"
CREATE TABLE companies (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    name        TEXT NOT NULL UNIQUE,
    description TEXT,
    website     TEXT,
    location    TEXT,
    logo        TEXT,
    owner_id    INTEGER NOT NULL REFERENCES users(id),
    created_at  TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at  TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX idx_companies_owner_id ON companies(owner_id);
"#,
    // v3: job listings
    r#"
CREATE TABLE jobs (
    id           INTEGER PRIMARY KEY AUTOINCREMENT,
    title        TEXT NOT NULL,
    description  TEXT NOT NULL,
    requirements TEXT NOT NULL DEFAULT '[]',  -- JSON array
    salary       INTEGER,
    location     TEXT NOT NULL,
    job_type     TEXT NOT NULL DEFAULT 'full-time'
                 CHECK (job_type IN ('full-time', 'part-time', 'internship', 'contract')),
    position     TEXT NOT NULL,
    company_id   INTEGER NOT NULL REFERENCES companies(id) ON DELETE CASCADE,
    created_by   INTEGER NOT NULL REFERENCES users(id),
    created_at   TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at   TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX idx_jobs_company_id ON jobs(company_id);
CREATE INDEX idx_jobs_created_by ON jobs(created_by);
"#,
    // v4: applications, one per (job, applicant)
    r#"
CREATE TABLE applications (
    id           INTEGER PRIMARY KEY AUTOINCREMENT,
    job_id       INTEGER NOT NULL REFERENCES jobs(id) ON DELETE CASCADE,
    applicant_id INTEGER NOT NULL REFERENCES users(id),
    status       TEXT NOT NULL DEFAULT 'pending'
                 CHECK (status IN ('pending', 'accepted', 'rejected')),
    created_at   TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at   TEXT NOT NULL DEFAULT (datetime('now')),
    UNIQUE (job_id, applicant_id)
);

CREATE INDEX idx_applications_applicant_id ON applications(applicant_id);
"#,
];
