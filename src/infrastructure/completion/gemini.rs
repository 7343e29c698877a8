use std::time::Instant;

use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::{DomainError, TextCompleter};
use crate::infrastructure::http_client::HttpClientTrait;
use crate::infrastructure::observability::record_completion_request;

const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";

/// Google Gemini `generateContent` provider
#[derive(Debug)]
pub struct GeminiCompleter<C: HttpClientTrait> {
    client: C,
    api_key: String,
    model: String,
    base_url: String,
}

impl<C: HttpClientTrait> GeminiCompleter<C> {
    pub fn new(client: C, api_key: impl Into<String>) -> Self {
        Self::with_base_url(client, api_key, DEFAULT_GEMINI_MODEL, DEFAULT_GEMINI_BASE_URL)
    }

    pub fn with_base_url(
        client: C,
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            model: model.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn generate_content_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }

    fn build_request(&self, prompt: &str, system_instruction: Option<&str>) -> serde_json::Value {
        let mut body = serde_json::json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": prompt }]
            }]
        });

        if let Some(instruction) = system_instruction {
            body["systemInstruction"] = serde_json::json!({
                "parts": [{ "text": instruction }]
            });
        }

        body
    }

    fn headers(&self) -> Vec<(&str, &str)> {
        vec![
            ("x-goog-api-key", self.api_key.as_str()),
            ("Content-Type", "application/json"),
        ]
    }

    fn parse_response(&self, json: serde_json::Value) -> Result<String, DomainError> {
        let response: GeminiResponse = serde_json::from_value(json).map_err(|e| {
            DomainError::completion_failed("gemini", format!("Failed to parse response: {}", e))
        })?;

        let Some(candidate) = response.candidates.into_iter().next() else {
            let reason = response
                .prompt_feedback
                .and_then(|f| f.block_reason)
                .unwrap_or_else(|| "no candidates returned".to_string());

            return Err(DomainError::completion_failed(
                "gemini",
                format!("Empty response: {}", reason),
            ));
        };

        let text: String = candidate
            .content
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(DomainError::completion_failed(
                "gemini",
                format!(
                    "Response contained no text (finish reason: {})",
                    candidate.finish_reason.as_deref().unwrap_or("unknown")
                ),
            ));
        }

        Ok(text)
    }
}

#[async_trait]
impl<C: HttpClientTrait> TextCompleter for GeminiCompleter<C> {
    async fn complete(
        &self,
        prompt: &str,
        system_instruction: Option<&str>,
    ) -> Result<String, DomainError> {
        let start = Instant::now();
        let url = self.generate_content_url();
        let body = self.build_request(prompt, system_instruction);

        let result = match self.client.post_json(&url, self.headers(), &body).await {
            Ok(json) => self.parse_response(json),
            Err(e) => Err(DomainError::completion_failed("gemini", e.to_string())),
        };

        record_completion_request(self.provider_name(), result.is_ok(), start.elapsed());

        result
    }

    fn provider_name(&self) -> &'static str {
        "gemini"
    }
}

// Gemini API types

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    prompt_feedback: Option<GeminiPromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiCandidate {
    content: Option<GeminiContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Deserialize)]
struct GeminiPart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiPromptFeedback {
    block_reason: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::http_client::mock::MockHttpClient;

    const TEST_URL: &str =
        "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent";

    #[tokio::test]
    async fn test_gemini_complete() {
        let mock_response = serde_json::json!({
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [{ "text": "Rest and " }, { "text": "drink fluids." }]
                },
                "finishReason": "STOP"
            }]
        });

        let client = MockHttpClient::new().with_response(TEST_URL, mock_response);
        let completer = GeminiCompleter::new(client, "test-key");

        let answer = completer
            .complete("I have a cold", Some("You are an expert doctor."))
            .await
            .unwrap();

        assert_eq!(answer, "Rest and drink fluids.");
    }

    #[tokio::test]
    async fn test_request_body_carries_system_instruction() {
        let client = MockHttpClient::new().with_response(
            TEST_URL,
            serde_json::json!({
                "candidates": [{ "content": { "parts": [{ "text": "ok" }] } }]
            }),
        );
        let completer = GeminiCompleter::new(client, "test-key");

        completer
            .complete("Suggest remedies for cough", Some("You are a medicine adviser."))
            .await
            .unwrap();

        let body = completer.client.last_body().unwrap();
        assert_eq!(
            body["contents"][0]["parts"][0]["text"],
            "Suggest remedies for cough"
        );
        assert_eq!(
            body["systemInstruction"]["parts"][0]["text"],
            "You are a medicine adviser."
        );
    }

    #[tokio::test]
    async fn test_no_system_instruction_omits_field() {
        let completer = GeminiCompleter::new(MockHttpClient::new(), "k");
        let body = completer.build_request("hello", None);
        assert!(body.get("systemInstruction").is_none());
    }

    #[tokio::test]
    async fn test_blocked_prompt_is_an_error() {
        let client = MockHttpClient::new().with_response(
            TEST_URL,
            serde_json::json!({
                "promptFeedback": { "blockReason": "SAFETY" }
            }),
        );
        let completer = GeminiCompleter::new(client, "test-key");

        let err = completer.complete("anything", None).await.unwrap_err();
        assert!(matches!(err, DomainError::CompletionFailed { .. }));
        assert!(err.to_string().contains("SAFETY"));
    }

    #[tokio::test]
    async fn test_http_error_maps_to_completion_failed() {
        let client = MockHttpClient::new().with_error(TEST_URL, "HTTP 400: API key not valid");
        let completer = GeminiCompleter::new(client, "bad-key");

        let err = completer.complete("hello", None).await.unwrap_err();
        match err {
            DomainError::CompletionFailed { provider, message } => {
                assert_eq!(provider, "gemini");
                assert!(message.contains("API key not valid"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_custom_base_url_and_model() {
        let url = "http://localhost:9999/v1beta/models/gemini-1.5-pro:generateContent";
        let client = MockHttpClient::new().with_response(
            url,
            serde_json::json!({
                "candidates": [{ "content": { "parts": [{ "text": "custom" }] } }]
            }),
        );
        let completer =
            GeminiCompleter::with_base_url(client, "k", "gemini-1.5-pro", "http://localhost:9999/");

        assert_eq!(completer.model(), "gemini-1.5-pro");
        assert_eq!(completer.complete("x", None).await.unwrap(), "custom");
    }
}
