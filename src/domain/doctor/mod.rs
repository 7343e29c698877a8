//! Doctor domain

mod entity;
mod repository;
mod search;

pub use entity::{DoctorRecord, DoctorSummary};
pub use repository::DoctorRepository;
pub use search::DoctorSearchFilter;
