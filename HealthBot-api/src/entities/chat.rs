use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Chat request body
#[derive(Debug, Deserialize, ToSchema)]
pub struct ChatMessageRequest {
    /// Message for the bot
    pub message: Option<String>,

    /// Sender (default: 1)
    pub user_id: Option<i64>,
}

/// Reply of `POST /chat`
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ChatMessageResponse {
    pub user_id: i64,
    pub user_message: String,
    pub bot_reply: String,
}

/// Reply of the legacy `POST /api/chat`
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LegacyChatResponse {
    pub response: String,
}

/// Error body of the chat endpoints
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ChatErrorResponse {
    pub error: String,
}

/// Query parameters for conversation history
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct HistoryQuery {
    /// User id (default: 1)
    pub user_id: Option<i64>,

    /// Maximum number of exchanges (default: 10, max: 100)
    pub limit: Option<usize>,
}

/// One stored exchange
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HistoryEntryResponse {
    pub message: String,
    pub response: String,
    /// Server local time the exchange was stored
    pub timestamp: String,
}

/// Conversation history, oldest first
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HistoryResponse {
    pub history: Vec<HistoryEntryResponse>,
}
