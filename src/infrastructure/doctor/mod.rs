//! Doctor persistence and search

mod postgres_repository;
mod repository;
mod service;

pub use postgres_repository::PostgresDoctorRepository;
pub use repository::InMemoryDoctorRepository;
pub use service::{DoctorSearch, DoctorSearchService};
