//! Conversion functions between domain entities and data models.
//! Named `convert_to_[target_layer]_[model_name]`.

use health_bot_data::models as data;

use crate::entities::{
    CreateUserRequest, HealthMeasurement, HistoryEntry, ReminderItem, UserProfile,
};
use crate::utils::format_timestamp;

/// Convert a stored reminder, adding its display time
pub fn convert_to_domain_reminder(reminder: data::Reminder) -> ReminderItem {
    let display_time = format_timestamp(&reminder.time);
    ReminderItem {
        id: reminder.id,
        text: reminder.text,
        time: reminder.time,
        display_time,
        completed: reminder.completed,
    }
}

/// Build the storage request for a reminder whose time is already normalized
pub fn convert_to_data_reminder_request(user_id: i64, text: &str, time: &str) -> data::CreateReminderRequest {
    data::CreateReminderRequest {
        user_id,
        text: text.to_string(),
        time: time.to_string(),
    }
}

pub fn convert_to_domain_history_entry(entry: data::ConversationEntry) -> HistoryEntry {
    HistoryEntry {
        message: entry.message,
        response: entry.response,
        timestamp: entry.timestamp,
    }
}

pub fn convert_to_domain_measurement(entry: data::HealthDataEntry) -> HealthMeasurement {
    HealthMeasurement {
        id: entry.id,
        user_id: entry.user_id,
        data_type: entry.data_type,
        value: entry.value,
        unit: entry.unit,
        recorded_at: entry.recorded_at,
    }
}

pub fn convert_to_domain_user(user: data::User) -> UserProfile {
    UserProfile {
        id: user.id,
        username: user.username,
        email: user.email,
        created_at: user.created_at,
    }
}

/// Convert a user registration, trimming both fields
pub fn convert_to_data_user_request(request: &CreateUserRequest) -> data::CreateUserRequest {
    data::CreateUserRequest {
        username: request.username.trim().to_string(),
        email: request.email.trim().to_string(),
    }
}
