use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::{error, instrument};

use health_bot_domain::entities::{CreateUserRequest, UserProfile};
use health_bot_domain::services::UserServiceError;

use crate::api::state::AppState;
use crate::entities::users::{CreateUserBody, UserResponse};
use crate::entities::ErrorResponse;

fn map_service_error(err: UserServiceError) -> ErrorResponse {
    match err {
        UserServiceError::ValidationError(msg) => ErrorResponse::validation_error(&msg, None),
        UserServiceError::NotFound(_) => ErrorResponse::not_found("user"),
        UserServiceError::Conflict(msg) => ErrorResponse::conflict(&msg),
        UserServiceError::RepositoryError(msg) => {
            error!("User storage failed: {}", msg);
            ErrorResponse::internal_error()
        }
    }
}

fn convert_to_public_user(user: UserProfile) -> UserResponse {
    UserResponse {
        id: user.id,
        username: user.username,
        email: user.email,
        created_at: user.created_at,
    }
}

/// Register a user
#[utoipa::path(
    post,
    path = "/api/users",
    request_body = CreateUserBody,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Invalid username or email", body = ErrorResponse),
        (status = 409, description = "Username or email taken", body = ErrorResponse),
    ),
    tag = "users"
)]
#[instrument(skip(state, body), fields(username = %body.username))]
pub async fn create_user(
    State(state): State<AppState>,
    Json(body): Json<CreateUserBody>,
) -> Result<(StatusCode, Json<UserResponse>), ErrorResponse> {
    let user = state
        .users
        .create_user(CreateUserRequest {
            username: body.username,
            email: body.email,
        })
        .await
        .map_err(map_service_error)?;

    Ok((StatusCode::CREATED, Json(convert_to_public_user(user))))
}

/// Get a user by id
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 404, description = "No such user", body = ErrorResponse),
    ),
    tag = "users"
)]
#[instrument(skip(state))]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<UserResponse>, ErrorResponse> {
    let user = state.users.get_user(id).await.map_err(map_service_error)?;
    Ok(Json(convert_to_public_user(user)))
}
