use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::{error, info, instrument, warn};

use health_bot_domain::entities::{ChatReply, ChatRequest, DEFAULT_USER_ID};
use health_bot_domain::services::ChatServiceError;
use health_bot_data::repository::DEFAULT_HISTORY_LIMIT;

use crate::api::state::AppState;
use crate::entities::chat::{
    ChatErrorResponse, ChatMessageRequest, ChatMessageResponse, HistoryEntryResponse, HistoryQuery,
    HistoryResponse, LegacyChatResponse,
};
use crate::entities::ErrorResponse;

/// Error text for a missing, empty or unreadable chat message
pub const MESSAGE_REQUIRED: &str = "Message field is required";

fn message_required() -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ChatErrorResponse { error: MESSAGE_REQUIRED.to_string() }),
    )
        .into_response()
}

/// Run one exchange, turning every request problem into the chat error body
async fn exchange(
    state: &AppState,
    payload: Result<Json<ChatMessageRequest>, JsonRejection>,
) -> Result<ChatReply, Response> {
    let Json(body) = payload.map_err(|rejection| {
        warn!("Unreadable chat request: {}", rejection);
        message_required()
    })?;

    let message = body.message.ok_or_else(message_required)?;
    let request = ChatRequest {
        user_id: body.user_id.unwrap_or(DEFAULT_USER_ID),
        message,
    };

    state.chat.reply(request).await.map_err(|e| match e {
        ChatServiceError::ValidationError(_) => message_required(),
        ChatServiceError::RepositoryError(msg) => {
            error!("Chat failed: {}", msg);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ChatErrorResponse { error: format!("⚠ Server error: {}", msg) }),
            )
                .into_response()
        }
    })
}

/// Send a message to the health assistant
#[utoipa::path(
    post,
    path = "/chat",
    request_body = ChatMessageRequest,
    responses(
        (status = 200, description = "Bot reply", body = ChatMessageResponse),
        (status = 400, description = "Message missing", body = ChatErrorResponse),
    ),
    tag = "chat"
)]
#[instrument(skip(state, payload))]
pub async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatMessageRequest>, JsonRejection>,
) -> Result<Json<ChatMessageResponse>, Response> {
    let reply = exchange(&state, payload).await?;
    info!(user_id = reply.user_id, "Chat reply sent");

    Ok(Json(ChatMessageResponse {
        user_id: reply.user_id,
        user_message: reply.user_message,
        bot_reply: reply.bot_reply,
    }))
}

/// Send a message and get the reply as `{"response": ...}`
#[utoipa::path(
    post,
    path = "/api/chat",
    request_body = ChatMessageRequest,
    responses(
        (status = 200, description = "Bot reply", body = LegacyChatResponse),
        (status = 400, description = "Message missing", body = ChatErrorResponse),
    ),
    tag = "chat"
)]
#[instrument(skip(state, payload))]
pub async fn legacy_chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatMessageRequest>, JsonRejection>,
) -> Result<Json<LegacyChatResponse>, Response> {
    let reply = exchange(&state, payload).await?;
    Ok(Json(LegacyChatResponse { response: reply.bot_reply }))
}

/// Recent conversation history of a user, oldest first
#[utoipa::path(
    get,
    path = "/api/conversations",
    params(HistoryQuery),
    responses(
        (status = 200, description = "Conversation history", body = HistoryResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "chat"
)]
#[instrument(skip(state))]
pub async fn conversation_history(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<HistoryResponse>, ErrorResponse> {
    let user_id = query.user_id.unwrap_or(DEFAULT_USER_ID);
    let limit = query.limit.unwrap_or(DEFAULT_HISTORY_LIMIT);

    let entries = state.chat.history(user_id, limit).await.map_err(|e| {
        error!("Error retrieving conversation history: {}", e);
        ErrorResponse::internal_error()
    })?;

    let history = entries
        .into_iter()
        .map(|entry| HistoryEntryResponse {
            message: entry.message,
            response: entry.response,
            timestamp: entry.timestamp,
        })
        .collect();

    Ok(Json(HistoryResponse { history }))
}
