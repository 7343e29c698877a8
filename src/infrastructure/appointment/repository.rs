//! In-memory appointment repository

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::{
    Appointment, AppointmentRepository, AppointmentStatus, DoctorAppointment, DomainError,
    PatientRepository,
};

#[derive(Debug, Default)]
struct Table {
    next_id: i64,
    rows: BTreeMap<i64, Appointment>,
}

/// In-memory implementation of AppointmentRepository.
///
/// Patient names for dashboard rows are resolved through the patient
/// repository; appointments whose patient is gone are skipped, like an inner join.
#[derive(Debug)]
pub struct InMemoryAppointmentRepository {
    table: Arc<RwLock<Table>>,
    patients: Arc<dyn PatientRepository>,
}

impl InMemoryAppointmentRepository {
    pub fn new(patients: Arc<dyn PatientRepository>) -> Self {
        Self {
            table: Arc::new(RwLock::new(Table::default())),
            patients,
        }
    }
}

#[async_trait]
impl AppointmentRepository for InMemoryAppointmentRepository {
    async fn create(&self, mut appointment: Appointment) -> Result<Appointment, DomainError> {
        let mut table = self.table.write().await;
        table.next_id += 1;
        appointment.id = table.next_id;
        table.rows.insert(appointment.id, appointment.clone());
        Ok(appointment)
    }

    async fn list_for_doctor(&self, doctor_id: i64) -> Result<Vec<DoctorAppointment>, DomainError> {
        let appointments: Vec<Appointment> = {
            let table = self.table.read().await;
            table
                .rows
                .values()
                .filter(|a| a.doctor_id == doctor_id)
                .cloned()
                .collect()
        };

        let mut rows = Vec::with_capacity(appointments.len());
        for appointment in appointments {
            if let Some(patient) = self.patients.get(appointment.patient_id).await? {
                rows.push(DoctorAppointment {
                    id: appointment.id,
                    date: appointment.date,
                    time: appointment.time,
                    status: appointment.status,
                    patient_name: patient.name,
                });
            }
        }

        rows.sort_by_key(|row| (row.date, row.time));
        Ok(rows)
    }

    async fn get_for_doctor(
        &self,
        appointment_id: i64,
        doctor_id: i64,
    ) -> Result<Option<Appointment>, DomainError> {
        let table = self.table.read().await;
        Ok(table
            .rows
            .get(&appointment_id)
            .filter(|a| a.doctor_id == doctor_id)
            .cloned())
    }

    async fn update_status(
        &self,
        appointment_id: i64,
        status: AppointmentStatus,
    ) -> Result<bool, DomainError> {
        let mut table = self.table.write().await;
        match table.rows.get_mut(&appointment_id) {
            Some(appointment) => {
                appointment.status = status;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Patient;
    use crate::infrastructure::patient::InMemoryPatientRepository;
    use chrono::{NaiveDate, NaiveTime};

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2030, 1, d).unwrap()
    }

    fn time(h: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, 0, 0).unwrap()
    }

    async fn repo_with_patient() -> (InMemoryAppointmentRepository, i64) {
        let patients = Arc::new(InMemoryPatientRepository::new());
        let patient = patients
            .create(Patient::new("Asha", "asha@example.com", "h"))
            .await
            .unwrap();
        (InMemoryAppointmentRepository::new(patients), patient.id)
    }

    #[tokio::test]
    async fn test_list_for_doctor_orders_by_date_then_time() {
        let (repo, patient) = repo_with_patient().await;
        repo.create(Appointment::book(patient, 1, date(5), time(9))).await.unwrap();
        repo.create(Appointment::book(patient, 1, date(3), time(15))).await.unwrap();
        repo.create(Appointment::book(patient, 1, date(3), time(10))).await.unwrap();
        repo.create(Appointment::book(patient, 2, date(1), time(10))).await.unwrap();

        let rows = repo.list_for_doctor(1).await.unwrap();
        let ids: Vec<_> = rows.iter().map(|r| r.id).collect();

        assert_eq!(ids, vec![3, 2, 1]);
        assert!(rows.iter().all(|r| r.patient_name == "Asha"));
    }

    #[tokio::test]
    async fn test_get_for_doctor_checks_ownership() {
        let (repo, patient) = repo_with_patient().await;
        let appointment = repo
            .create(Appointment::book(patient, 1, date(2), time(11)))
            .await
            .unwrap();

        assert!(repo.get_for_doctor(appointment.id, 1).await.unwrap().is_some());
        assert!(repo.get_for_doctor(appointment.id, 2).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_status() {
        let (repo, patient) = repo_with_patient().await;
        let appointment = repo
            .create(Appointment::book(patient, 1, date(2), time(11)))
            .await
            .unwrap();

        assert!(repo
            .update_status(appointment.id, AppointmentStatus::Completed)
            .await
            .unwrap());
        assert!(!repo.update_status(99, AppointmentStatus::Completed).await.unwrap());

        let rows = repo.list_for_doctor(1).await.unwrap();
        assert_eq!(rows[0].status, AppointmentStatus::Completed);
    }
}
