use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body of `POST /api/users`
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateUserBody {
    pub username: String,
    pub email: String,
}

/// Public representation of a user
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
    /// Server local time of registration
    pub created_at: String,
}
