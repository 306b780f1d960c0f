use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::{error, info, instrument, warn};

use health_bot_domain::entities::{CreateReminderRequest, ReminderItem, DEFAULT_USER_ID};
use health_bot_domain::services::ReminderServiceError;

use crate::api::state::AppState;
use crate::entities::reminders::{
    ReminderActionResponse, ReminderListResponse, ReminderResponse, SetReminderRequest,
};
use crate::entities::{ErrorResponse, UserQuery};

/// Map a reminder service error onto a status and `{success: false, message}`
fn failure(err: ReminderServiceError) -> Response {
    let (status, message) = match err {
        ReminderServiceError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg),
        ReminderServiceError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
        ReminderServiceError::RepositoryError(msg) => {
            error!("Reminder storage failed: {}", msg);
            (StatusCode::INTERNAL_SERVER_ERROR, "Reminder storage failed".to_string())
        }
    };

    (status, Json(ReminderActionResponse::failed(message))).into_response()
}

fn convert_to_public_reminder(reminder: ReminderItem) -> ReminderResponse {
    ReminderResponse {
        id: reminder.id,
        text: reminder.text,
        time: reminder.time,
        display_time: reminder.display_time,
        completed: reminder.completed,
    }
}

/// Create a reminder from free-form time text
#[utoipa::path(
    post,
    path = "/api/set_reminder",
    request_body = SetReminderRequest,
    responses(
        (status = 200, description = "Reminder stored", body = ReminderActionResponse),
        (status = 400, description = "Missing text or unparseable time", body = ReminderActionResponse),
        (status = 500, description = "Storage failure", body = ReminderActionResponse),
    ),
    tag = "reminders"
)]
#[instrument(skip(state, payload))]
pub async fn set_reminder(
    State(state): State<AppState>,
    payload: Result<Json<SetReminderRequest>, JsonRejection>,
) -> Response {
    let body = match payload {
        Ok(Json(body)) => body,
        Err(rejection) => {
            warn!("Unreadable reminder request: {}", rejection);
            return (
                StatusCode::BAD_REQUEST,
                Json(ReminderActionResponse::failed(rejection.body_text())),
            )
                .into_response();
        }
    };

    let request = CreateReminderRequest {
        user_id: body.user_id.unwrap_or(DEFAULT_USER_ID),
        text: body.text.unwrap_or_default(),
        time: body.time.unwrap_or_default(),
    };

    match state.reminders.create_reminder(request).await {
        Ok(created) => {
            info!(reminder_id = created.reminder_id, "Reminder created");
            Json(ReminderActionResponse::created(created.reminder_id, created.time)).into_response()
        }
        Err(e) => failure(e),
    }
}

/// List a user's reminders, earliest due first
#[utoipa::path(
    get,
    path = "/api/reminders",
    params(UserQuery),
    responses(
        (status = 200, description = "Reminders of the user", body = ReminderListResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "reminders"
)]
#[instrument(skip(state))]
pub async fn list_reminders(
    State(state): State<AppState>,
    Query(query): Query<UserQuery>,
) -> Result<Json<ReminderListResponse>, ErrorResponse> {
    let user_id = query.user_id.unwrap_or(DEFAULT_USER_ID);

    let reminders = state.reminders.list_reminders(user_id).await.map_err(|e| {
        error!("Error listing reminders: {}", e);
        ErrorResponse::internal_error()
    })?;

    Ok(Json(ReminderListResponse {
        reminders: reminders.into_iter().map(convert_to_public_reminder).collect(),
    }))
}

/// Delete a reminder
#[utoipa::path(
    delete,
    path = "/api/reminders/{id}",
    params(("id" = i64, Path, description = "Reminder id")),
    responses(
        (status = 200, description = "Reminder deleted", body = ReminderActionResponse),
        (status = 404, description = "No such reminder", body = ReminderActionResponse),
    ),
    tag = "reminders"
)]
#[instrument(skip(state))]
pub async fn delete_reminder(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    match state.reminders.delete_reminder(id).await {
        Ok(()) => Json(ReminderActionResponse::done()).into_response(),
        Err(e) => failure(e),
    }
}

/// Mark a reminder completed
#[utoipa::path(
    post,
    path = "/api/reminders/{id}/complete",
    params(("id" = i64, Path, description = "Reminder id")),
    responses(
        (status = 200, description = "Reminder completed", body = ReminderActionResponse),
        (status = 404, description = "No such reminder", body = ReminderActionResponse),
    ),
    tag = "reminders"
)]
#[instrument(skip(state))]
pub async fn complete_reminder(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    match state.reminders.complete_reminder(id).await {
        Ok(()) => Json(ReminderActionResponse::done()).into_response(),
        Err(e) => failure(e),
    }
}
