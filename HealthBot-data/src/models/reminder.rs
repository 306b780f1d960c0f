use serde::{Deserialize, Serialize};

/// Storage model for a reminder row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reminder {
    /// Row id
    pub id: i64,

    /// Owner of the reminder
    pub user_id: i64,

    /// What to be reminded about
    pub text: String,

    /// Due time (`%Y-%m-%d %H:%M:%S`)
    pub time: String,

    /// Whether the reminder was marked completed
    pub completed: bool,
}

/// Input data for storing a reminder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateReminderRequest {
    pub user_id: i64,
    pub text: String,
    pub time: String,
}
