use std::sync::Arc;
use async_trait::async_trait;
use thiserror::Error;
use tracing::{instrument, warn};
use validator::Validate;

use health_bot_data::database::DatabasePool;
use health_bot_data::repository::{ConversationRepository, ConversationRepositoryTrait, RepositoryError};

use crate::bot::{get_bot_reply, CompletionClient};
use crate::entities::conversions;
use crate::entities::{ChatReply, ChatRequest, HistoryEntry};
use super::describe_validation_errors;

/// Upper bound on how much history one request may ask for
pub const MAX_HISTORY_LIMIT: usize = 100;

/// Chat service errors
#[derive(Debug, Error)]
pub enum ChatServiceError {
    /// Validation error
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Repository error
    #[error("Repository error: {0}")]
    RepositoryError(String),
}

/// Trait for chat operations
#[async_trait]
pub trait ChatServiceTrait: Send + Sync {
    /// Ask the bot and record the exchange
    async fn reply(&self, request: ChatRequest) -> Result<ChatReply, ChatServiceError>;

    /// Most recent exchanges of a user, oldest first
    async fn history(&self, user_id: i64, limit: usize) -> Result<Vec<HistoryEntry>, ChatServiceError>;

    /// Whether the completion client has credentials
    fn is_bot_configured(&self) -> bool;
}

/// Chat service backed by a completion client and a conversation store
pub struct ChatService<R: ConversationRepositoryTrait> {
    client: Arc<dyn CompletionClient>,
    repository: R,
}

impl<R: ConversationRepositoryTrait> ChatService<R> {
    /// Create a new chat service
    pub fn new(client: Arc<dyn CompletionClient>, repository: R) -> Self {
        Self { client, repository }
    }

    fn validate_request(&self, request: &ChatRequest) -> Result<(), ChatServiceError> {
        request
            .validate()
            .map_err(|e| ChatServiceError::ValidationError(describe_validation_errors(&e)))?;

        if request.message.trim().is_empty() {
            return Err(ChatServiceError::ValidationError(
                "Message field is required".to_string(),
            ));
        }

        Ok(())
    }
}

#[async_trait]
impl<R: ConversationRepositoryTrait> ChatServiceTrait for ChatService<R> {
    #[instrument(skip(self, request), fields(user_id = request.user_id))]
    async fn reply(&self, request: ChatRequest) -> Result<ChatReply, ChatServiceError> {
        self.validate_request(&request)?;

        let bot_reply = get_bot_reply(self.client.as_ref(), &request.message, request.user_id).await;

        // A lost history row should not cost the user their answer
        if let Err(e) = self
            .repository
            .add_conversation(request.user_id, &request.message, &bot_reply)
            .await
        {
            warn!("Failed to store conversation: {}", e);
        }

        Ok(ChatReply {
            user_id: request.user_id,
            user_message: request.message,
            bot_reply,
        })
    }

    async fn history(&self, user_id: i64, limit: usize) -> Result<Vec<HistoryEntry>, ChatServiceError> {
        let limit = limit.min(MAX_HISTORY_LIMIT);

        let entries = self
            .repository
            .get_conversation_history(user_id, limit)
            .await
            .map_err(|e: RepositoryError| ChatServiceError::RepositoryError(e.to_string()))?;

        Ok(entries
            .into_iter()
            .map(conversions::convert_to_domain_history_entry)
            .collect())
    }

    fn is_bot_configured(&self) -> bool {
        self.client.is_configured()
    }
}

/// Create a chat service storing conversations in the given pool
pub fn create_chat_service(
    pool: DatabasePool,
    client: Arc<dyn CompletionClient>,
) -> impl ChatServiceTrait {
    ChatService::new(client, ConversationRepository::new(pool))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bot::CompletionError;
    use health_bot_data::repository::mock::MockConversationRepository;

    struct EchoClient;

    #[async_trait]
    impl CompletionClient for EchoClient {
        async fn complete(&self, message: &str) -> Result<String, CompletionError> {
            Ok(format!("echo: {}", message))
        }

        fn is_configured(&self) -> bool {
            true
        }

        fn model(&self) -> &str {
            "echo"
        }
    }

    struct UnconfiguredClient;

    #[async_trait]
    impl CompletionClient for UnconfiguredClient {
        async fn complete(&self, _message: &str) -> Result<String, CompletionError> {
            Err(CompletionError::MissingApiKey)
        }

        fn is_configured(&self) -> bool {
            false
        }

        fn model(&self) -> &str {
            "none"
        }
    }

    fn chat(user_id: i64, message: &str) -> ChatRequest {
        ChatRequest { user_id, message: message.to_string() }
    }

    #[tokio::test]
    async fn test_reply_is_returned_and_stored() {
        let service = ChatService::new(Arc::new(EchoClient), MockConversationRepository::new());

        let reply = service.reply(chat(7, "How much water?")).await.unwrap();
        assert_eq!(reply.user_id, 7);
        assert_eq!(reply.user_message, "How much water?");
        assert_eq!(reply.bot_reply, "echo: How much water?");

        let history = service.history(7, 10).await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].response, "echo: How much water?");
    }

    #[tokio::test]
    async fn test_blank_message_is_rejected() {
        let service = ChatService::new(Arc::new(EchoClient), MockConversationRepository::new());

        for message in ["", "   \n"] {
            let err = service.reply(chat(1, message)).await.unwrap_err();
            assert!(matches!(err, ChatServiceError::ValidationError(_)));
        }
    }

    #[tokio::test]
    async fn test_completion_errors_become_the_reply() {
        let service = ChatService::new(Arc::new(UnconfiguredClient), MockConversationRepository::new());

        let reply = service.reply(chat(1, "hello")).await.unwrap();
        assert!(reply.bot_reply.starts_with("⚠ No OpenRouter API key found"));
        assert!(!service.is_bot_configured());
    }

    #[tokio::test]
    async fn test_storage_failure_does_not_fail_the_reply() {
        let service = ChatService::new(Arc::new(EchoClient), MockConversationRepository::failing());

        let reply = service.reply(chat(1, "hello")).await.unwrap();
        assert_eq!(reply.bot_reply, "echo: hello");

        let err = service.history(1, 10).await.unwrap_err();
        assert!(matches!(err, ChatServiceError::RepositoryError(_)));
    }

    #[tokio::test]
    async fn test_history_against_sqlite() {
        let pool = health_bot_data::database::create_in_memory_pool().unwrap();
        let service = create_chat_service(pool, Arc::new(EchoClient));

        service.reply(chat(1, "first")).await.unwrap();
        service.reply(chat(1, "second")).await.unwrap();

        let history = service.history(1, 1).await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].message, "second");
    }

    #[tokio::test]
    async fn test_history_limit_is_capped() {
        let service = ChatService::new(Arc::new(EchoClient), MockConversationRepository::new());
        for i in 0..(MAX_HISTORY_LIMIT + 20) {
            service.reply(chat(1, &format!("message {}", i))).await.unwrap();
        }

        let history = service.history(1, 1000).await.unwrap();
        assert_eq!(history.len(), MAX_HISTORY_LIMIT);
        assert_eq!(history[0].message, "message 20");
        assert_eq!(history[MAX_HISTORY_LIMIT - 1].message, format!("message {}", MAX_HISTORY_LIMIT + 19));
    }
}
