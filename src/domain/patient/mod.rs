//! Patient domain

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use crate::domain::DomainError;

/// A registered patient
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    pub id: i64,
    pub name: String,
    pub email: String,
    /// Argon2 hash - never exposed in serialization
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl Patient {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        Self {
            id: 0,
            name: name.into(),
            email: email.into(),
            password_hash: password_hash.into(),
            created_at: Utc::now(),
        }
    }
}

/// Repository trait for patient storage
#[async_trait]
pub trait PatientRepository: Send + Sync + Debug {
    async fn get(&self, id: i64) -> Result<Option<Patient>, DomainError>;

    async fn get_by_email(&self, email: &str) -> Result<Option<Patient>, DomainError>;

    /// Insert a patient, returning it with the assigned ID
    async fn create(&self, patient: Patient) -> Result<Patient, DomainError>;
}
