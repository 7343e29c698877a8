//! Doctor dashboard endpoints

use axum::extract::State;
use serde::{Deserialize, Serialize};

use crate::api::middleware::RequireDoctor;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::AppointmentStatus;
use crate::infrastructure::appointment::Dashboard;

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub doctor_name: String,
    #[serde(flatten)]
    pub dashboard: Dashboard,
}

/// GET /doctor/dashboard
pub async fn dashboard(
    State(state): State<AppState>,
    RequireDoctor(doctor): RequireDoctor,
) -> Result<Json<DashboardResponse>, ApiError> {
    let dashboard = state.appointments.dashboard(doctor.id).await?;

    Ok(Json(DashboardResponse {
        doctor_name: doctor.name,
        dashboard,
    }))
}

#[derive(Debug, Deserialize)]
pub struct StatusUpdateRequest {
    pub appointment_id: i64,
    pub status: String,
}

#[derive(Debug, Serialize)]
pub struct StatusUpdateResponse {
    pub appointment_id: i64,
    pub status: AppointmentStatus,
}

/// POST /doctor/appointments/status
pub async fn update_status(
    State(state): State<AppState>,
    RequireDoctor(doctor): RequireDoctor,
    Json(request): Json<StatusUpdateRequest>,
) -> Result<Json<StatusUpdateResponse>, ApiError> {
    let status = state
        .appointments
        .update_status(doctor.id, request.appointment_id, &request.status)
        .await?;

    Ok(Json(StatusUpdateResponse {
        appointment_id: request.appointment_id,
        status,
    }))
}
