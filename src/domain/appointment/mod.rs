//! Appointment domain

mod entity;

pub use entity::{Appointment, AppointmentStatus, DashboardStats, DoctorAppointment};

use async_trait::async_trait;
use std::fmt::Debug;

use crate::domain::DomainError;

/// Repository trait for appointment storage
#[async_trait]
pub trait AppointmentRepository: Send + Sync + Debug {
    /// Insert an appointment, returning it with the assigned ID
    async fn create(&self, appointment: Appointment) -> Result<Appointment, DomainError>;

    /// A doctor's appointments with patient names, ordered by date then time
    async fn list_for_doctor(&self, doctor_id: i64) -> Result<Vec<DoctorAppointment>, DomainError>;

    /// Fetch an appointment only if it belongs to the given doctor
    async fn get_for_doctor(
        &self,
        appointment_id: i64,
        doctor_id: i64,
    ) -> Result<Option<Appointment>, DomainError>;

    /// Set the status; returns false when no row was updated
    async fn update_status(
        &self,
        appointment_id: i64,
        status: AppointmentStatus,
    ) -> Result<bool, DomainError>;
}
