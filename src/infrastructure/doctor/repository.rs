//! In-memory doctor repository

use async_trait::async_trait;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::{DoctorRecord, DoctorRepository, DoctorSearchFilter, DomainError};

#[derive(Debug, Default)]
struct Table {
    next_id: i64,
    rows: BTreeMap<i64, DoctorRecord>,
}

/// In-memory implementation of DoctorRepository; iteration follows insertion order
#[derive(Debug, Default)]
pub struct InMemoryDoctorRepository {
    table: Arc<RwLock<Table>>,
}

impl InMemoryDoctorRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository seeded with doctors; IDs are reassigned in order
    pub async fn with_doctors(doctors: Vec<DoctorRecord>) -> Result<Self, DomainError> {
        let repo = Self::new();
        for doctor in doctors {
            repo.create(doctor).await?;
        }
        Ok(repo)
    }
}

#[async_trait]
impl DoctorRepository for InMemoryDoctorRepository {
    async fn get(&self, id: i64) -> Result<Option<DoctorRecord>, DomainError> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<DoctorRecord>, DomainError> {
        let table = self.table.read().await;
        Ok(table.rows.values().find(|d| d.email == email).cloned())
    }

    async fn create(&self, mut doctor: DoctorRecord) -> Result<DoctorRecord, DomainError> {
        let mut table = self.table.write().await;

        if table.rows.values().any(|d| d.email == doctor.email) {
            return Err(DomainError::conflict(format!(
                "Email '{}' is already registered",
                doctor.email
            )));
        }

        table.next_id += 1;
        doctor.id = table.next_id;
        table.rows.insert(doctor.id, doctor.clone());

        Ok(doctor)
    }

    async fn search(&self, filter: &DoctorSearchFilter) -> Result<Vec<DoctorRecord>, DomainError> {
        let table = self.table.read().await;
        Ok(table
            .rows
            .values()
            .filter(|d| filter.matches(d))
            .cloned()
            .collect())
    }

    async fn list_by_specialization(
        &self,
        specialization: Option<&str>,
    ) -> Result<Vec<DoctorRecord>, DomainError> {
        let table = self.table.read().await;
        let mut doctors: Vec<DoctorRecord> = table
            .rows
            .values()
            .filter(|d| specialization.is_none_or(|s| d.specialization == s))
            .cloned()
            .collect();

        doctors.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(doctors)
    }

    async fn specializations(&self) -> Result<Vec<String>, DomainError> {
        let table = self.table.read().await;
        let distinct: BTreeSet<String> = table
            .rows
            .values()
            .map(|d| d.specialization.clone())
            .collect();

        Ok(distinct.into_iter().collect())
    }

    async fn areas(&self) -> Result<Vec<String>, DomainError> {
        let table = self.table.read().await;
        let distinct: BTreeSet<String> = table
            .rows
            .values()
            .filter_map(|d| d.area.clone())
            .filter(|a| !a.trim().is_empty())
            .collect();

        Ok(distinct.into_iter().collect())
    }

    async fn health_check(&self) -> Result<bool, DomainError> {
        Ok(true)
    }
}
