//! Account service for registration and authentication

use std::sync::Arc;

use serde::Deserialize;
use tracing::{debug, info};

use crate::domain::account::{
    validate_email, validate_name, validate_password, AccountValidationError,
};
use crate::domain::{
    Coordinates, DoctorRecord, DoctorRepository, DomainError, Patient, PatientRepository,
    Principal, Role,
};
use crate::infrastructure::auth::PasswordHasher;

/// Registration input for either role
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    /// Required for doctors, ignored for patients
    #[serde(default)]
    pub specialization: Option<String>,
    #[serde(default)]
    pub hospital_name: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub area: Option<String>,
    #[serde(default)]
    pub experience: Option<i32>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

#[derive(Debug)]
pub struct AccountService {
    patients: Arc<dyn PatientRepository>,
    doctors: Arc<dyn DoctorRepository>,
    hasher: Arc<dyn PasswordHasher>,
}

fn invalid(e: AccountValidationError) -> DomainError {
    DomainError::invalid_input(e.to_string())
}

fn trimmed(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl AccountService {
    pub fn new(
        patients: Arc<dyn PatientRepository>,
        doctors: Arc<dyn DoctorRepository>,
        hasher: Arc<dyn PasswordHasher>,
    ) -> Self {
        Self {
            patients,
            doctors,
            hasher,
        }
    }

    /// Register a patient or doctor. Emails are unique across both tables.
    pub async fn register(&self, request: RegisterRequest) -> Result<Principal, DomainError> {
        validate_name(&request.name).map_err(invalid)?;
        validate_email(&request.email).map_err(invalid)?;
        validate_password(&request.password).map_err(invalid)?;

        let name = request.name.trim().to_string();
        let email = request.email.trim().to_lowercase();

        let specialization = trimmed(request.specialization);
        if request.role == Role::Doctor && specialization.is_none() {
            return Err(invalid(AccountValidationError::MissingSpecialization));
        }

        let location = match (request.latitude, request.longitude) {
            _ if request.role != Role::Doctor => None,
            (Some(lat), Some(lng)) => Some(Coordinates::validated(lat, lng)?),
            (None, None) => None,
            _ => {
                return Err(DomainError::invalid_input(
                    "Latitude and longitude must be given together",
                ));
            }
        };

        if self.email_taken(&email).await? {
            return Err(DomainError::conflict(format!(
                "Email '{}' is already registered",
                email
            )));
        }

        let password_hash = self.hasher.hash(&request.password)?;

        let principal = match (request.role, specialization) {
            (Role::Doctor, Some(specialization)) => {
                let mut doctor = DoctorRecord::new(&name, &email, password_hash, specialization)
                    .with_experience(request.experience.unwrap_or(0).max(0));
                doctor.hospital_name = trimmed(request.hospital_name);
                doctor.city = trimmed(request.city);
                doctor.area = trimmed(request.area);
                if let Some(point) = location {
                    doctor = doctor.with_location(point.latitude, point.longitude);
                }

                let doctor = self.doctors.create(doctor).await?;
                Principal::new(doctor.id, doctor.name, doctor.email, Role::Doctor)
            }
            _ => {
                let patient = self
                    .patients
                    .create(Patient::new(&name, &email, password_hash))
                    .await?;
                Principal::new(patient.id, patient.name, patient.email, Role::Patient)
            }
        };

        info!(id = principal.id, role = %principal.role, "Account registered");
        Ok(principal)
    }

    /// Check credentials against patients first, then doctors
    pub async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<Principal>, DomainError> {
        let email = email.trim().to_lowercase();

        if let Some(patient) = self.patients.get_by_email(&email).await? {
            if self.hasher.verify(password, &patient.password_hash) {
                return Ok(Some(Principal::new(
                    patient.id,
                    patient.name,
                    patient.email,
                    Role::Patient,
                )));
            }
        }

        if let Some(doctor) = self.doctors.get_by_email(&email).await? {
            if self.hasher.verify(password, &doctor.password_hash) {
                return Ok(Some(Principal::new(
                    doctor.id,
                    doctor.name,
                    doctor.email,
                    Role::Doctor,
                )));
            }
        }

        debug!("Authentication failed");
        Ok(None)
    }

    async fn email_taken(&self, email: &str) -> Result<bool, DomainError> {
        Ok(self.patients.get_by_email(email).await?.is_some()
            || self.doctors.get_by_email(email).await?.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::auth::Argon2Hasher;
    use crate::infrastructure::doctor::InMemoryDoctorRepository;
    use crate::infrastructure::patient::InMemoryPatientRepository;

    fn service() -> AccountService {
        AccountService::new(
            Arc::new(InMemoryPatientRepository::new()),
            Arc::new(InMemoryDoctorRepository::new()),
            Arc::new(Argon2Hasher::new()),
        )
    }

    fn request(email: &str, role: Role, specialization: Option<&str>) -> RegisterRequest {
        RegisterRequest {
            name: "Test Person".to_string(),
            email: email.to_string(),
            password: "password123".to_string(),
            role,
            specialization: specialization.map(String::from),
            hospital_name: None,
            city: None,
            area: None,
            experience: None,
            latitude: None,
            longitude: None,
        }
    }

    #[tokio::test]
    async fn test_register_patient_and_authenticate() {
        let service = service();
        let principal = service
            .register(request("asha@example.com", Role::Patient, None))
            .await
            .unwrap();
        assert_eq!(principal.role, Role::Patient);

        let found = service
            .authenticate("asha@example.com", "password123")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found, principal);
    }

    #[tokio::test]
    async fn test_register_doctor_requires_specialization() {
        let service = service();

        let err = service
            .register(request("doc@example.com", Role::Doctor, Some("  ")))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput { .. }));

        let principal = service
            .register(request("doc@example.com", Role::Doctor, Some("Cardiology")))
            .await
            .unwrap();
        assert!(principal.is_doctor());
    }

    #[tokio::test]
    async fn test_email_unique_across_roles() {
        let service = service();
        service
            .register(request("shared@example.com", Role::Patient, None))
            .await
            .unwrap();

        let err = service
            .register(request("Shared@Example.com", Role::Doctor, Some("ENT")))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict { .. }));
    }

    #[tokio::test]
    async fn test_authenticate_rejects_wrong_password() {
        let service = service();
        service
            .register(request("asha@example.com", Role::Patient, None))
            .await
            .unwrap();

        assert!(service
            .authenticate("asha@example.com", "wrong-password")
            .await
            .unwrap()
            .is_none());
        assert!(service
            .authenticate("nobody@example.com", "password123")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_authenticate_finds_doctors() {
        let service = service();
        service
            .register(request("doc@example.com", Role::Doctor, Some("Cardiology")))
            .await
            .unwrap();

        let principal = service
            .authenticate("doc@example.com", "password123")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(principal.role, Role::Doctor);
    }

    #[tokio::test]
    async fn test_register_validates_input() {
        let service = service();
        let mut bad = request("asha@example.com", Role::Patient, None);
        bad.password = "short".to_string();

        assert!(matches!(
            service.register(bad).await.unwrap_err(),
            DomainError::InvalidInput { .. }
        ));
    }

    #[tokio::test]
    async fn test_doctor_location_is_validated() {
        let service = service();

        let mut out_of_range = request("far@example.com", Role::Doctor, Some("ENT"));
        out_of_range.latitude = Some(250.0);
        out_of_range.longitude = Some(73.8);
        assert!(matches!(
            service.register(out_of_range).await.unwrap_err(),
            DomainError::InvalidInput { .. }
        ));

        let mut lone = request("lone@example.com", Role::Doctor, Some("ENT"));
        lone.latitude = Some(18.5);
        assert!(matches!(
            service.register(lone).await.unwrap_err(),
            DomainError::InvalidInput { .. }
        ));
    }

    #[tokio::test]
    async fn test_doctor_location_is_stored() {
        let doctors = Arc::new(InMemoryDoctorRepository::new());
        let service = AccountService::new(
            Arc::new(InMemoryPatientRepository::new()),
            doctors.clone(),
            Arc::new(Argon2Hasher::new()),
        );

        let mut located = request("pune@example.com", Role::Doctor, Some("ENT"));
        located.latitude = Some(18.52);
        located.longitude = Some(73.85);
        let principal = service.register(located).await.unwrap();

        let doctor = doctors.get(principal.id).await.unwrap().unwrap();
        assert_eq!(doctor.latitude, Some(18.52));
        assert_eq!(doctor.longitude, Some(73.85));
    }
}
