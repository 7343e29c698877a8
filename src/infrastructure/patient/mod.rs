//! Patient persistence

mod postgres_repository;
mod repository;

pub use postgres_repository::PostgresPatientRepository;
pub use repository::InMemoryPatientRepository;
