//! PostgreSQL appointment repository implementation

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use crate::domain::{
    Appointment, AppointmentRepository, AppointmentStatus, DoctorAppointment, DomainError,
};

/// PostgreSQL implementation of AppointmentRepository
#[derive(Debug, Clone)]
pub struct PostgresAppointmentRepository {
    pool: PgPool,
}

impl PostgresAppointmentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AppointmentRepository for PostgresAppointmentRepository {
    async fn create(&self, mut appointment: Appointment) -> Result<Appointment, DomainError> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO appointments (patient_id, doctor_id, date, time, status, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(appointment.patient_id)
        .bind(appointment.doctor_id)
        .bind(appointment.date)
        .bind(appointment.time)
        .bind(appointment.status.as_str())
        .bind(appointment.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to create appointment: {}", e)))?;

        appointment.id = id;
        Ok(appointment)
    }

    async fn list_for_doctor(&self, doctor_id: i64) -> Result<Vec<DoctorAppointment>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT a.id, a.date, a.time, a.status, p.name AS patient_name
            FROM appointments a
            JOIN patients p ON a.patient_id = p.id
            WHERE a.doctor_id = $1
            ORDER BY a.date, a.time
            "#,
        )
        .bind(doctor_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to list appointments: {}", e)))?;

        rows.iter()
            .map(|row| {
                Ok(DoctorAppointment {
                    id: row.try_get("id").map_err(read_error)?,
                    date: row.try_get("date").map_err(read_error)?,
                    time: row.try_get("time").map_err(read_error)?,
                    status: parse_status(row)?,
                    patient_name: row.try_get("patient_name").map_err(read_error)?,
                })
            })
            .collect()
    }

    async fn get_for_doctor(
        &self,
        appointment_id: i64,
        doctor_id: i64,
    ) -> Result<Option<Appointment>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, patient_id, doctor_id, date, time, status, created_at
            FROM appointments
            WHERE id = $1 AND doctor_id = $2
            "#,
        )
        .bind(appointment_id)
        .bind(doctor_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to get appointment: {}", e)))?;

        row.as_ref().map(row_to_appointment).transpose()
    }

    async fn update_status(
        &self,
        appointment_id: i64,
        status: AppointmentStatus,
    ) -> Result<bool, DomainError> {
        let result = sqlx::query("UPDATE appointments SET status = $2 WHERE id = $1")
            .bind(appointment_id)
            .bind(status.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to update appointment: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }
}

fn read_error(e: sqlx::Error) -> DomainError {
    DomainError::storage(format!("Failed to read appointment row: {}", e))
}

/// Stored statuses are compared case-insensitively
fn parse_status(row: &PgRow) -> Result<AppointmentStatus, DomainError> {
    let raw: String = row.try_get("status").map_err(read_error)?;
    raw.parse()
}

fn row_to_appointment(row: &PgRow) -> Result<Appointment, DomainError> {
    Ok(Appointment {
        id: row.try_get("id").map_err(read_error)?,
        patient_id: row.try_get("patient_id").map_err(read_error)?,
        doctor_id: row.try_get("doctor_id").map_err(read_error)?,
        date: row.try_get("date").map_err(read_error)?,
        time: row.try_get("time").map_err(read_error)?,
        status: parse_status(row)?,
        created_at: row.try_get("created_at").map_err(read_error)?,
    })
}
