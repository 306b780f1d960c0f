use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body of `POST /api/set_reminder`
#[derive(Debug, Deserialize, ToSchema)]
pub struct SetReminderRequest {
    /// Owner (default: 1)
    pub user_id: Option<i64>,

    /// What to be reminded about
    pub text: Option<String>,

    /// When, e.g. `in 30 minutes`, `14:30`, `2:30 PM` or `2023-10-15 14:30`
    pub time: Option<String>,
}

/// Outcome of a reminder command
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReminderActionResponse {
    pub success: bool,

    /// Id of a newly created reminder
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reminder_id: Option<i64>,

    /// Normalized due time of a newly created reminder
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,

    /// Why the command failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ReminderActionResponse {
    pub fn done() -> Self {
        Self { success: true, reminder_id: None, time: None, message: None }
    }

    pub fn created(reminder_id: i64, time: String) -> Self {
        Self { success: true, reminder_id: Some(reminder_id), time: Some(time), message: None }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self { success: false, reminder_id: None, time: None, message: Some(message.into()) }
    }
}

/// Public representation of a reminder
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReminderResponse {
    pub id: i64,
    pub text: String,
    /// Due time in server local time, `%Y-%m-%d %H:%M:%S`
    pub time: String,
    /// Due time for display, e.g. `Oct 15, 2023 at 02:30 PM`
    pub display_time: Option<String>,
    pub completed: bool,
}

/// Reminders of one user
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReminderListResponse {
    pub reminders: Vec<ReminderResponse>,
}
