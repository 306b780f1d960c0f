use async_trait::async_trait;
use rusqlite::OptionalExtension;
use tracing::debug;

use crate::database::DatabasePool;
use crate::models::conversation::{Conversation, ConversationEntry};
use super::errors::RepositoryError;

/// Default number of exchanges returned by a history query
pub const DEFAULT_HISTORY_LIMIT: usize = 10;

/// Repository trait for stored chat exchanges
#[async_trait]
pub trait ConversationRepositoryTrait: Send + Sync {
    /// Store one message/response exchange
    async fn add_conversation(&self, user_id: i64, message: &str, response: &str) -> Result<Conversation, RepositoryError>;

    /// Get the most recent `limit` exchanges of a user, oldest first
    async fn get_conversation_history(&self, user_id: i64, limit: usize) -> Result<Vec<ConversationEntry>, RepositoryError>;
}

/// SQLite repository for conversations
#[derive(Debug, Clone)]
pub struct ConversationRepository {
    pool: DatabasePool,
}

impl ConversationRepository {
    /// Create a new repository
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

fn map_conversation(row: &rusqlite::Row<'_>) -> rusqlite::Result<Conversation> {
    Ok(Conversation {
        id: row.get(0)?,
        user_id: row.get(1)?,
        message: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
        response: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
        timestamp: row.get::<_, Option<String>>(4)?.unwrap_or_default(),
    })
}

#[async_trait]
impl ConversationRepositoryTrait for ConversationRepository {
    async fn add_conversation(&self, user_id: i64, message: &str, response: &str) -> Result<Conversation, RepositoryError> {
        debug!("Storing conversation for user {}", user_id);

        let conn = self.pool.get_connection()?;
        conn.execute(
            "INSERT INTO conversations (user_id, message, response) VALUES (?1, ?2, ?3)",
            (user_id, message, response),
        )?;
        let id = conn.last_insert_rowid();

        conn.query_row(
            "SELECT id, user_id, message, response, timestamp FROM conversations WHERE id = ?1",
            [id],
            map_conversation,
        )
        .optional()?
        .ok_or_else(|| RepositoryError::NotFound(format!("conversation {}", id)))
    }

    async fn get_conversation_history(&self, user_id: i64, limit: usize) -> Result<Vec<ConversationEntry>, RepositoryError> {
        debug!("Getting last {} conversations for user {}", limit, user_id);

        let conn = self.pool.get_connection()?;
        let mut stmt = conn.prepare(
            "SELECT id, user_id, message, response, timestamp
             FROM conversations
             WHERE user_id = ?1
             ORDER BY timestamp DESC, id DESC
             LIMIT ?2"
        )?;

        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows = stmt.query_map((user_id, limit), map_conversation)?;

        let mut history = Vec::new();
        for conversation in rows {
            history.push(ConversationEntry::from(conversation?));
        }

        // Newest rows were selected; present them chronologically
        history.reverse();
        Ok(history)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::create_in_memory_pool;

    #[tokio::test]
    async fn test_add_conversation_returns_stored_row() {
        let repo = ConversationRepository::new(create_in_memory_pool().unwrap());

        let stored = repo.add_conversation(1, "How much water?", "About 2 liters").await.unwrap();
        assert_eq!(stored.id, 1);
        assert_eq!(stored.user_id, 1);
        assert_eq!(stored.message, "How much water?");
        assert!(!stored.timestamp.is_empty());
    }

    #[tokio::test]
    async fn test_history_is_latest_window_in_chronological_order() {
        let repo = ConversationRepository::new(create_in_memory_pool().unwrap());

        for i in 1..=5 {
            repo.add_conversation(1, &format!("question {}", i), &format!("answer {}", i)).await.unwrap();
        }

        let history = repo.get_conversation_history(1, 3).await.unwrap();
        let messages: Vec<&str> = history.iter().map(|h| h.message.as_str()).collect();
        assert_eq!(messages, vec!["question 3", "question 4", "question 5"]);
    }

    #[tokio::test]
    async fn test_history_for_user_without_conversations_is_empty() {
        let repo = ConversationRepository::new(create_in_memory_pool().unwrap());
        repo.add_conversation(1, "hi", "hello").await.unwrap();

        assert!(repo.get_conversation_history(7, DEFAULT_HISTORY_LIMIT).await.unwrap().is_empty());
    }
}
