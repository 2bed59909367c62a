//! Company module.
//!
//! Companies are owned resources: the recruiter who creates one is recorded
//! as its owner and is the only identity allowed to change or delete it.

mod repository;
mod types;

pub use repository::CompanyRepository;
pub use types::{Company, CompanyUpdate, NewCompany};
