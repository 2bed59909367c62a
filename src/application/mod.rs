//! Job application module.

mod repository;
mod types;

pub use repository::ApplicationRepository;
pub use types::{Applicant, Application, ApplicationStatus, ApplicationSummary};
