use serde::{Deserialize, Serialize};
use validator::Validate;

/// A registered user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    pub username: String,
    pub email: String,
    /// Registration time, server local time
    pub created_at: String,
}

/// Request to register a user
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, max = 100, message = "Username must be between 1 and 100 characters"))]
    pub username: String,

    /// Checked against the email pattern by the user service
    pub email: String,
}
