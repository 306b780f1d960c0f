use serde::{Deserialize, Serialize};

/// Storage model for a stored chat exchange
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    /// Row id
    pub id: i64,

    /// Owner of the exchange
    pub user_id: i64,

    /// Message sent by the user
    pub message: String,

    /// Reply returned by the bot
    pub response: String,

    /// When the exchange was stored (`%Y-%m-%d %H:%M:%S`, UTC)
    pub timestamp: String,
}

/// One entry of a user's conversation history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationEntry {
    pub message: String,
    pub response: String,
    pub timestamp: String,
}

impl From<Conversation> for ConversationEntry {
    fn from(conversation: Conversation) -> Self {
        Self {
            message: conversation.message,
            response: conversation.response,
            timestamp: conversation.timestamp,
        }
    }
}
