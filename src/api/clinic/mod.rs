//! Clinic endpoints: doctors, booking and the doctor dashboard

pub mod appointments;
pub mod dashboard;
pub mod doctors;

use axum::{
    routing::{get, post},
    Router,
};

use crate::api::state::AppState;

pub fn create_clinic_router() -> Router<AppState> {
    Router::new()
        .route("/appointments/form", get(appointments::booking_form))
        .route("/appointments", post(appointments::book_appointment))
        .route("/doctors", get(doctors::search_doctors))
        .route(
            "/doctors/by-specialization",
            get(doctors::doctors_by_specialization),
        )
        .route("/doctor/dashboard", get(dashboard::dashboard))
        .route("/doctor/appointments/status", post(dashboard::update_status))
}
