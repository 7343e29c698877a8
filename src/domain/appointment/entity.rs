//! Appointment entity and status

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Lifecycle status of an appointment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    #[default]
    Booked,
    Completed,
    Cancelled,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Booked => "booked",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl std::str::FromStr for AppointmentStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "booked" => Ok(Self::Booked),
            "completed" => Ok(Self::Completed),
            "cancelled" | "canceled" => Ok(Self::Cancelled),
            other => Err(DomainError::invalid_input(format!(
                "Unknown appointment status '{}'",
                other
            ))),
        }
    }
}

impl std::fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A booked visit between a patient and a doctor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: i64,
    pub patient_id: i64,
    pub doctor_id: i64,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub status: AppointmentStatus,
    pub created_at: DateTime<Utc>,
}

impl Appointment {
    /// A fresh appointment in the `booked` state
    pub fn book(patient_id: i64, doctor_id: i64, date: NaiveDate, time: NaiveTime) -> Self {
        Self {
            id: 0,
            patient_id,
            doctor_id,
            date,
            time,
            status: AppointmentStatus::Booked,
            created_at: Utc::now(),
        }
    }
}

/// Dashboard row: an appointment joined with the patient's name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoctorAppointment {
    pub id: i64,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub status: AppointmentStatus,
    pub patient_name: String,
}

/// Completed/pending counters shown on the dashboard
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub completed: usize,
    pub pending: usize,
}

impl DashboardStats {
    pub fn from_appointments(appointments: &[DoctorAppointment]) -> Self {
        appointments
            .iter()
            .fold(Self::default(), |mut stats, appointment| {
                match appointment.status {
                    AppointmentStatus::Completed => stats.completed += 1,
                    AppointmentStatus::Booked => stats.pending += 1,
                    AppointmentStatus::Cancelled => {}
                }
                stats
            })
    }
}
