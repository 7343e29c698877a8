//! Text-completion provider implementations

mod gemini;

pub use gemini::{GeminiCompleter, DEFAULT_GEMINI_MODEL};

use async_trait::async_trait;

use crate::domain::{DomainError, TextCompleter};

/// Completer installed when no API key is configured; every call fails as
/// a provider error so lookups that hit the store keep working.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnconfiguredCompleter;

#[async_trait]
impl TextCompleter for UnconfiguredCompleter {
    async fn complete(
        &self,
        _prompt: &str,
        _system_instruction: Option<&str>,
    ) -> Result<String, DomainError> {
        Err(DomainError::completion_failed(
            self.provider_name(),
            "No completion API key configured",
        ))
    }

    fn provider_name(&self) -> &'static str {
        "unconfigured"
    }
}
