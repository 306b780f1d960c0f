//! Bot reply logic: a single completion call with a fixed system prompt.

pub mod config;
pub mod error;
pub mod openrouter;

use async_trait::async_trait;
use tracing::{info, warn};

pub use config::CompletionConfig;
pub use error::CompletionError;
pub use openrouter::OpenRouterClient;

/// System prompt sent ahead of every user message
pub const SYSTEM_PROMPT: &str =
    "You are a friendly and knowledgeable health assistant. Always provide safe, factual, and helpful advice.";

/// A chat-completion backend
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Complete a single user message
    async fn complete(&self, message: &str) -> Result<String, CompletionError>;

    /// Whether the client has credentials to call the API
    fn is_configured(&self) -> bool;

    /// Model the client asks for
    fn model(&self) -> &str;
}

/// Get the bot's reply to a user message.
///
/// Never fails: completion errors are turned into their user-facing text.
pub async fn get_bot_reply(client: &dyn CompletionClient, message: &str, user_id: i64) -> String {
    match client.complete(message).await {
        Ok(reply) => {
            info!(user_id, "Completion succeeded ({} chars)", reply.len());
            reply
        }
        Err(e) => {
            warn!(user_id, error = ?e, "Completion failed");
            e.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedClient(Result<String, CompletionError>);

    #[async_trait]
    impl CompletionClient for FixedClient {
        async fn complete(&self, _message: &str) -> Result<String, CompletionError> {
            self.0.clone()
        }

        fn is_configured(&self) -> bool {
            true
        }

        fn model(&self) -> &str {
            "fixed"
        }
    }

    #[tokio::test]
    async fn test_reply_passes_through() {
        let client = FixedClient(Ok("Sleep 7-9 hours.".to_string()));
        assert_eq!(get_bot_reply(&client, "sleep?", 1).await, "Sleep 7-9 hours.");
    }

    #[tokio::test]
    async fn test_errors_become_user_facing_text() {
        let client = FixedClient(Err(CompletionError::RequestFailed("connection refused".to_string())));
        assert_eq!(
            get_bot_reply(&client, "sleep?", 1).await,
            "⚠ API request failed: connection refused"
        );

        let client = FixedClient(Err(CompletionError::MissingApiKey));
        assert!(get_bot_reply(&client, "sleep?", 1).await.contains("OPENROUTER_API_KEY"));
    }
}
