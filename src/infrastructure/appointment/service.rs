//! Appointment booking and the doctor dashboard

use std::sync::Arc;

use chrono::{Local, NaiveDate, NaiveTime};
use serde::Serialize;
use tracing::info;

use crate::domain::{
    Appointment, AppointmentRepository, AppointmentStatus, DashboardStats, DoctorAppointment,
    DoctorRepository, DoctorSummary, DomainError,
};

/// Doctor preselected on the booking form
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookingPrefill {
    pub doctor_id: i64,
    pub doctor_name: String,
    pub specialization: String,
}

/// Everything the booking form needs
#[derive(Debug, Clone, Serialize)]
pub struct BookingForm {
    pub specializations: Vec<String>,
    pub prefill: Option<BookingPrefill>,
    /// Earliest bookable date
    pub min_date: NaiveDate,
}

/// A doctor's appointments with completed/pending counts
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub appointments: Vec<DoctorAppointment>,
    #[serde(flatten)]
    pub stats: DashboardStats,
}

#[derive(Debug)]
pub struct AppointmentService {
    appointments: Arc<dyn AppointmentRepository>,
    doctors: Arc<dyn DoctorRepository>,
}

impl AppointmentService {
    pub fn new(
        appointments: Arc<dyn AppointmentRepository>,
        doctors: Arc<dyn DoctorRepository>,
    ) -> Self {
        Self {
            appointments,
            doctors,
        }
    }

    /// Booking form data; the prefill is used only when all three parts are present
    pub async fn booking_form(
        &self,
        doctor_id: Option<i64>,
        doctor_name: Option<String>,
        specialization: Option<String>,
    ) -> Result<BookingForm, DomainError> {
        let specializations = self.doctors.specializations().await?;
        if specializations.is_empty() {
            return Err(DomainError::not_found("No doctors available for appointment"));
        }

        let non_blank = |value: Option<String>| value.filter(|v| !v.trim().is_empty());
        let prefill = match (doctor_id, non_blank(doctor_name), non_blank(specialization)) {
            (Some(doctor_id), Some(doctor_name), Some(specialization)) => Some(BookingPrefill {
                doctor_id,
                doctor_name,
                specialization,
            }),
            _ => None,
        };

        Ok(BookingForm {
            specializations,
            prefill,
            min_date: today(),
        })
    }

    /// Doctors ordered by name, optionally limited to one specialization
    pub async fn doctors_by_specialization(
        &self,
        specialization: Option<&str>,
    ) -> Result<Vec<DoctorSummary>, DomainError> {
        let specialization = specialization.filter(|s| !s.trim().is_empty());
        let doctors = self.doctors.list_by_specialization(specialization).await?;

        Ok(doctors.iter().map(DoctorSummary::from).collect())
    }

    pub async fn book(
        &self,
        patient_id: i64,
        doctor_id: i64,
        date: NaiveDate,
        time: NaiveTime,
    ) -> Result<Appointment, DomainError> {
        if date < today() {
            return Err(DomainError::invalid_input(
                "Appointment date cannot be in the past",
            ));
        }

        if self.doctors.get(doctor_id).await?.is_none() {
            return Err(DomainError::not_found(format!(
                "Doctor {} not found",
                doctor_id
            )));
        }

        let appointment = self
            .appointments
            .create(Appointment::book(patient_id, doctor_id, date, time))
            .await?;

        info!(
            appointment_id = appointment.id,
            patient_id, doctor_id, %date, %time,
            "Appointment booked"
        );

        Ok(appointment)
    }

    pub async fn dashboard(&self, doctor_id: i64) -> Result<Dashboard, DomainError> {
        let appointments = self.appointments.list_for_doctor(doctor_id).await?;
        let stats = DashboardStats::from_appointments(&appointments);

        Ok(Dashboard {
            appointments,
            stats,
        })
    }

    /// Change the status of one of the doctor's own appointments
    pub async fn update_status(
        &self,
        doctor_id: i64,
        appointment_id: i64,
        status: &str,
    ) -> Result<AppointmentStatus, DomainError> {
        let status: AppointmentStatus = status.parse()?;

        if self
            .appointments
            .get_for_doctor(appointment_id, doctor_id)
            .await?
            .is_none()
        {
            return Err(DomainError::not_found(format!(
                "Appointment {} not found",
                appointment_id
            )));
        }

        if !self.appointments.update_status(appointment_id, status).await? {
            return Err(DomainError::not_found(format!(
                "Appointment {} not found",
                appointment_id
            )));
        }

        info!(appointment_id, doctor_id, status = %status, "Appointment status updated");
        Ok(status)
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}
