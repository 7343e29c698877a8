//! Doctor repository trait

use async_trait::async_trait;
use std::fmt::Debug;

use super::entity::DoctorRecord;
use super::search::DoctorSearchFilter;
use crate::domain::DomainError;

/// Repository trait for doctor storage
#[async_trait]
pub trait DoctorRepository: Send + Sync + Debug {
    /// Get a doctor by ID
    async fn get(&self, id: i64) -> Result<Option<DoctorRecord>, DomainError>;

    /// Get a doctor by email (for login and uniqueness checks)
    async fn get_by_email(&self, email: &str) -> Result<Option<DoctorRecord>, DomainError>;

    /// Insert a doctor, returning it with the assigned ID
    async fn create(&self, doctor: DoctorRecord) -> Result<DoctorRecord, DomainError>;

    /// Doctors matching the attribute filters, in storage order
    async fn search(&self, filter: &DoctorSearchFilter) -> Result<Vec<DoctorRecord>, DomainError>;

    /// Doctors ordered by name, optionally restricted to one specialization
    async fn list_by_specialization(
        &self,
        specialization: Option<&str>,
    ) -> Result<Vec<DoctorRecord>, DomainError>;

    /// Distinct specializations, sorted
    async fn specializations(&self) -> Result<Vec<String>, DomainError>;

    /// Distinct non-empty areas, sorted
    async fn areas(&self) -> Result<Vec<String>, DomainError>;

    /// Cheap reachability check for readiness probes
    async fn health_check(&self) -> Result<bool, DomainError>;
}
