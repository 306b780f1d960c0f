// Domain services
// This module contains business logic implementations.
pub mod chat;
pub mod health_data;
pub mod reminders;
pub mod users;

use validator::ValidationErrors;

// Re-export service traits and factory functions
pub use chat::{create_chat_service, ChatService, ChatServiceError, ChatServiceTrait};
pub use health_data::{
    create_health_data_service, HealthDataService, HealthDataServiceError, HealthDataServiceTrait,
};
pub use reminders::{
    create_in_memory_reminder_service, create_reminder_service, ReminderService,
    ReminderServiceError, ReminderServiceTrait,
};
pub use users::{create_user_service, UserService, UserServiceError, UserServiceTrait};

/// Flatten validator errors into one `field: message; field: message` line
pub(crate) fn describe_validation_errors(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by_key(|(field, _)| *field);

    fields
        .into_iter()
        .map(|(field, errors)| {
            let messages: Vec<String> = errors
                .iter()
                .map(|err| match &err.message {
                    Some(msg) => msg.to_string(),
                    None => format!("Invalid {}", field),
                })
                .collect();
            format!("{}: {}", field, messages.join(", "))
        })
        .collect::<Vec<String>>()
        .join("; ")
}
