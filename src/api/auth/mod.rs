//! Registration, login and session endpoints

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Router,
};
use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::middleware::RequireAccount;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::Principal;
use crate::infrastructure::account::RegisterRequest;

pub fn create_auth_router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/me", get(me))
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub account: Principal,
    pub expires_at: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// POST /auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<Principal>), ApiError> {
    let principal = state.accounts.register(request).await?;
    Ok((StatusCode::CREATED, Json(principal)))
}

/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let principal = state
        .accounts
        .authenticate(&request.email, &request.password)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Invalid email or password"))?;

    let token = state.jwt_service.generate(&principal)?;
    let expires_at = Utc::now() + Duration::hours(state.jwt_service.expiration_hours() as i64);

    debug!(id = principal.id, role = %principal.role, "Issued token");

    Ok(Json(LoginResponse {
        token,
        account: principal,
        expires_at: expires_at.to_rfc3339(),
    }))
}

/// POST /auth/logout
///
/// Tokens are stateless; the client discards its copy.
pub async fn logout(_account: RequireAccount) -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Logged out successfully".to_string(),
    })
}

/// GET /auth/me
pub async fn me(RequireAccount(principal): RequireAccount) -> Json<Principal> {
    Json(principal)
}
