// Domain entities and value objects
pub mod chat;
pub mod conversions;
pub mod health_data;
pub mod reminder;
pub mod user;

// Re-export common types for easier imports
pub use chat::{ChatReply, ChatRequest, HistoryEntry, DEFAULT_USER_ID};
pub use health_data::{BmiResult, HealthMeasurement, RecordHealthDataRequest, BMI_DATA_TYPE};
pub use reminder::{CreateReminderRequest, CreatedReminder, ReminderItem};
pub use user::{CreateUserRequest, UserProfile};
