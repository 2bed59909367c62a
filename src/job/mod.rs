//! Job listing module.

mod repository;
mod types;

pub use repository::JobRepository;
pub use types::{Job, JobType, JobUpdate, NewJob};
