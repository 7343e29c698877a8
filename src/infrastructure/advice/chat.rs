//! Uncached free-form chat with the completer

use std::sync::Arc;

use tracing::debug;

use crate::domain::{DomainError, TextCompleter};

const CHAT_PERSONA: &str = "You are an expert doctor and medicine adviser. Provide clear, \
    professional, and practical medical guidance in English. Explain possible causes, \
    preventive steps, and remedies. Keep the tone empathetic and simple so even rural patients \
    can understand. Answer briefly, unless the user explicitly asks for a detailed explanation.";

#[derive(Debug)]
pub struct ChatService {
    completer: Arc<dyn TextCompleter>,
}

impl ChatService {
    pub fn new(completer: Arc<dyn TextCompleter>) -> Self {
        Self { completer }
    }

    /// Forward a message; provider errors are returned, never turned into reply text
    pub async fn reply(&self, message: &str) -> Result<String, DomainError> {
        let message = message.trim();
        if message.is_empty() {
            return Err(DomainError::invalid_input("Message cannot be empty"));
        }

        debug!(provider = self.completer.provider_name(), "Forwarding chat message");
        self.completer.complete(message, Some(CHAT_PERSONA)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MockTextCompleter;

    #[tokio::test]
    async fn test_reply_uses_chat_persona() {
        let completer = Arc::new(MockTextCompleter::new().with_response("Drink fluids"));
        let service = ChatService::new(completer.clone());

        assert_eq!(service.reply("I have a cold").await.unwrap(), "Drink fluids");

        let (prompt, system) = completer.last_request().unwrap();
        assert_eq!(prompt, "I have a cold");
        assert!(system.unwrap().contains("rural patients"));
    }

    #[tokio::test]
    async fn test_reply_propagates_provider_errors() {
        let completer = Arc::new(MockTextCompleter::new().with_error("service unavailable"));
        let service = ChatService::new(completer);

        let err = service.reply("hello").await.unwrap_err();
        assert!(matches!(err, DomainError::CompletionFailed { .. }));
    }

    #[tokio::test]
    async fn test_blank_message_is_rejected() {
        let completer = Arc::new(MockTextCompleter::new().with_response("unused"));
        let service = ChatService::new(completer.clone());

        assert!(service.reply("  ").await.is_err());
        assert_eq!(completer.calls(), 0);
    }
}
