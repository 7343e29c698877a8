//! Text-completion collaborator

use async_trait::async_trait;
use std::fmt::Debug;

use crate::domain::DomainError;

/// An external model that turns a prompt into text
#[async_trait]
pub trait TextCompleter: Send + Sync + Debug {
    /// Generate text for `prompt`, steered by an optional system instruction.
    ///
    /// Provider failures are returned as `DomainError::CompletionFailed`.
    async fn complete(
        &self,
        prompt: &str,
        system_instruction: Option<&str>,
    ) -> Result<String, DomainError>;

    /// Get the provider name
    fn provider_name(&self) -> &'static str;
}
