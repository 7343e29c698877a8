//! Appointment persistence, booking and dashboard

mod postgres_repository;
mod repository;
mod service;

pub use postgres_repository::PostgresAppointmentRepository;
pub use repository::InMemoryAppointmentRepository;
pub use service::{AppointmentService, BookingForm, BookingPrefill, Dashboard};
