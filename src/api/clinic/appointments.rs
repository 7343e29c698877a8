//! Patient booking endpoints

use axum::{extract::State, http::StatusCode};
use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;

use crate::api::middleware::RequirePatient;
use crate::api::state::AppState;
use crate::api::types::{empty_as_none, ApiError, Json, Query};
use crate::domain::Appointment;
use crate::infrastructure::appointment::BookingForm;

#[derive(Debug, Default, Deserialize)]
pub struct BookingFormQuery {
    #[serde(default, deserialize_with = "empty_as_none")]
    pub doctor_id: Option<i64>,
    #[serde(default)]
    pub doctor_name: Option<String>,
    #[serde(default)]
    pub specialization: Option<String>,
}

/// GET /appointments/form
pub async fn booking_form(
    State(state): State<AppState>,
    RequirePatient(_patient): RequirePatient,
    Query(query): Query<BookingFormQuery>,
) -> Result<Json<BookingForm>, ApiError> {
    let form = state
        .appointments
        .booking_form(query.doctor_id, query.doctor_name, query.specialization)
        .await?;

    Ok(Json(form))
}

#[derive(Debug, Deserialize)]
pub struct BookRequest {
    pub doctor_id: i64,
    /// `YYYY-MM-DD`
    pub date: NaiveDate,
    /// `HH:MM` or `HH:MM:SS`
    #[serde(deserialize_with = "time_of_day")]
    pub time: NaiveTime,
}

fn time_of_day<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;

    NaiveTime::parse_from_str(&raw, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(&raw, "%H:%M"))
        .map_err(|_| serde::de::Error::custom(format!("invalid time '{}', expected HH:MM", raw)))
}

/// POST /appointments
pub async fn book_appointment(
    State(state): State<AppState>,
    RequirePatient(patient): RequirePatient,
    Json(request): Json<BookRequest>,
) -> Result<(StatusCode, Json<Appointment>), ApiError> {
    let appointment = state
        .appointments
        .book(patient.id, request.doctor_id, request.date, request.time)
        .await?;

    Ok((StatusCode::CREATED, Json(appointment)))
}
