use serde::{Deserialize, Serialize};
use validator::Validate;

/// A reminder as presented to callers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReminderItem {
    /// Reminder id
    pub id: i64,

    /// What to be reminded about
    pub text: String,

    /// Due time as stored (`%Y-%m-%d %H:%M:%S`), server local time
    pub time: String,

    /// Due time formatted for display, when the stored value parses
    pub display_time: Option<String>,

    /// Whether the reminder was marked completed
    pub completed: bool,
}

/// Request to create a reminder
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateReminderRequest {
    /// Owner of the reminder
    pub user_id: i64,

    /// Reminder text
    #[validate(length(min = 1, max = 500, message = "Reminder text must be between 1 and 500 characters"))]
    pub text: String,

    /// Free-form time expression, e.g. `in 30 minutes` or `2023-10-15 14:30`
    #[validate(length(min = 1, message = "Reminder time is required"))]
    pub time: String,
}

/// A freshly stored reminder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatedReminder {
    pub reminder_id: i64,
    /// Normalized due time
    pub time: String,
}
