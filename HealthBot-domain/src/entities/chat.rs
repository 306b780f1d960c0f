use serde::{Deserialize, Serialize};
use validator::Validate;

/// Default user for requests that do not name one
pub const DEFAULT_USER_ID: i64 = 1;

/// A message sent to the bot
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ChatRequest {
    /// Who is chatting
    pub user_id: i64,

    /// What they said
    #[validate(length(min = 1, message = "Message field is required"))]
    pub message: String,
}

/// Result of one chat exchange
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatReply {
    pub user_id: i64,
    pub user_message: String,
    pub bot_reply: String,
}

/// A stored exchange as shown in the history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub message: String,
    pub response: String,
    /// When the exchange was stored, server local time (`%Y-%m-%d %H:%M:%S`)
    pub timestamp: String,
}
