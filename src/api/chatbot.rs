//! Conversational endpoints: free chat and the two cached advice lookups

use axum::{extract::State, routing::post, Router};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::middleware::RequireAccount;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::{Advice, Role};

pub fn create_chatbot_router() -> Router<AppState> {
    Router::new()
        .route("/chat", post(chat))
        .route("/chatbot/health", post(health_question))
        .route("/chatbot/medicine", post(medicine_lookup))
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: String,
}

/// POST /chat
pub async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    let reply = state.chat.reply(&request.message).await?;

    Ok(Json(ChatResponse { reply }))
}

#[derive(Debug, Deserialize)]
pub struct HealthQuestion {
    #[serde(alias = "question")]
    pub query: String,
}

/// POST /chatbot/health
///
/// Anyone may ask; a signed-in patient is recorded as the asker.
pub async fn health_question(
    State(state): State<AppState>,
    account: Option<RequireAccount>,
    Json(request): Json<HealthQuestion>,
) -> Result<Json<Advice>, ApiError> {
    let asked_by = account
        .map(|RequireAccount(principal)| principal)
        .filter(|principal| principal.role == Role::Patient)
        .map(|principal| principal.id);

    debug!(asked_by = ?asked_by, "Health question received");

    let advice = state.health_advice.answer(&request.query, asked_by).await?;

    Ok(Json(advice))
}

#[derive(Debug, Deserialize)]
pub struct SymptomRequest {
    pub symptom: String,
}

/// POST /chatbot/medicine
pub async fn medicine_lookup(
    State(state): State<AppState>,
    Json(request): Json<SymptomRequest>,
) -> Result<Json<Advice>, ApiError> {
    let advice = state.medicine_advice.answer(&request.symptom, None).await?;

    Ok(Json(advice))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_question_accepts_alias() {
        let request: HealthQuestion =
            serde_json::from_str(r#"{"question": "Is coffee bad?"}"#).unwrap();
        assert_eq!(request.query, "Is coffee bad?");

        let request: HealthQuestion = serde_json::from_str(r#"{"query": "Fever"}"#).unwrap();
        assert_eq!(request.query, "Fever");
    }
}
