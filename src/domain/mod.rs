//! Domain layer - Core business logic and entities

pub mod account;
pub mod advice;
pub mod appointment;
pub mod completion;
pub mod doctor;
pub mod error;
pub mod geo;
pub mod patient;

pub use account::{Principal, Role};
pub use advice::{Advice, AdviceEntry, AdviceStore, MatchPolicy, Provenance};
pub use appointment::{
    Appointment, AppointmentRepository, AppointmentStatus, DashboardStats, DoctorAppointment,
};
pub use completion::TextCompleter;
pub use doctor::{DoctorRecord, DoctorRepository, DoctorSearchFilter, DoctorSummary};
pub use error::DomainError;
pub use geo::{Coordinates, Located, QueryPoint, ReverseGeocoder};
pub use patient::{Patient, PatientRepository};

#[cfg(test)]
pub use advice::MockAdviceStore;
#[cfg(test)]
pub use completion::mock::MockTextCompleter;
