//! In-memory patient repository

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::{DomainError, Patient, PatientRepository};

#[derive(Debug, Default)]
struct Table {
    next_id: i64,
    rows: BTreeMap<i64, Patient>,
}

/// In-memory implementation of PatientRepository
#[derive(Debug, Default)]
pub struct InMemoryPatientRepository {
    table: Arc<RwLock<Table>>,
}

impl InMemoryPatientRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PatientRepository for InMemoryPatientRepository {
    async fn get(&self, id: i64) -> Result<Option<Patient>, DomainError> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<Patient>, DomainError> {
        let table = self.table.read().await;
        Ok(table.rows.values().find(|p| p.email == email).cloned())
    }

    async fn create(&self, mut patient: Patient) -> Result<Patient, DomainError> {
        let mut table = self.table.write().await;

        if table.rows.values().any(|p| p.email == patient.email) {
            return Err(DomainError::conflict(format!(
                "Email '{}' is already registered",
                patient.email
            )));
        }

        table.next_id += 1;
        patient.id = table.next_id;
        table.rows.insert(patient.id, patient.clone());

        Ok(patient)
    }
}
