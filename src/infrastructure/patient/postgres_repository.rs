//! PostgreSQL patient repository implementation

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use crate::domain::{DomainError, Patient, PatientRepository};
use crate::infrastructure::storage::map_insert_error;

/// PostgreSQL implementation of PatientRepository
#[derive(Debug, Clone)]
pub struct PostgresPatientRepository {
    pool: PgPool,
}

impl PostgresPatientRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PatientRepository for PostgresPatientRepository {
    async fn get(&self, id: i64) -> Result<Option<Patient>, DomainError> {
        let row = sqlx::query(
            "SELECT id, name, email, password_hash, created_at FROM patients WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to get patient: {}", e)))?;

        row.as_ref().map(row_to_patient).transpose()
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<Patient>, DomainError> {
        let row = sqlx::query(
            "SELECT id, name, email, password_hash, created_at FROM patients WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to get patient by email: {}", e)))?;

        row.as_ref().map(row_to_patient).transpose()
    }

    async fn create(&self, mut patient: Patient) -> Result<Patient, DomainError> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO patients (name, email, password_hash, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(&patient.name)
        .bind(&patient.email)
        .bind(&patient.password_hash)
        .bind(patient.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            map_insert_error(e, "patient", || {
                format!("Email '{}' is already registered", patient.email)
            })
        })?;

        patient.id = id;
        Ok(patient)
    }
}

fn row_to_patient(row: &PgRow) -> Result<Patient, DomainError> {
    let map = |e: sqlx::Error| DomainError::storage(format!("Failed to read patient row: {}", e));

    Ok(Patient {
        id: row.try_get("id").map_err(map)?,
        name: row.try_get("name").map_err(map)?,
        email: row.try_get("email").map_err(map)?,
        password_hash: row.try_get("password_hash").map_err(map)?,
        created_at: row.try_get("created_at").map_err(map)?,
    })
}
