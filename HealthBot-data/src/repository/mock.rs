//! Mock repositories for exercising services without a database

use std::sync::Mutex;
use async_trait::async_trait;

use crate::models::conversation::{Conversation, ConversationEntry};
use super::conversation::ConversationRepositoryTrait;
use super::errors::RepositoryError;

/// Conversation repository that keeps exchanges in a vector and can be told to fail
#[derive(Debug, Default)]
pub struct MockConversationRepository {
    conversations: Mutex<Vec<Conversation>>,
    should_fail: bool,
}

impl MockConversationRepository {
    /// Create an empty mock repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure every call to fail with a lock error
    pub fn failing() -> Self {
        Self {
            conversations: Mutex::new(Vec::new()),
            should_fail: true,
        }
    }
}

#[async_trait]
impl ConversationRepositoryTrait for MockConversationRepository {
    async fn add_conversation(&self, user_id: i64, message: &str, response: &str) -> Result<Conversation, RepositoryError> {
        if self.should_fail {
            return Err(RepositoryError::Lock("mock is configured to fail".to_string()));
        }

        let mut conversations = self.conversations.lock()?;
        let conversation = Conversation {
            id: conversations.len() as i64 + 1,
            user_id,
            message: message.to_string(),
            response: response.to_string(),
            timestamp: "2024-01-01 00:00:00".to_string(),
        };
        conversations.push(conversation.clone());

        Ok(conversation)
    }

    async fn get_conversation_history(&self, user_id: i64, limit: usize) -> Result<Vec<ConversationEntry>, RepositoryError> {
        if self.should_fail {
            return Err(RepositoryError::Lock("mock is configured to fail".to_string()));
        }

        let conversations = self.conversations.lock()?;
        let mine: Vec<ConversationEntry> = conversations
            .iter()
            .filter(|c| c.user_id == user_id)
            .cloned()
            .map(ConversationEntry::from)
            .collect();

        let skip = mine.len().saturating_sub(limit);
        Ok(mine.into_iter().skip(skip).collect())
    }
}
