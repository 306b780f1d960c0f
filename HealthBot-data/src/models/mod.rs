// Storage models, one module per table
pub mod conversation;
pub mod health_data;
pub mod reminder;
pub mod user;

pub use conversation::{Conversation, ConversationEntry};
pub use health_data::{CreateHealthDataRequest, HealthDataEntry};
pub use reminder::{CreateReminderRequest, Reminder};
pub use user::{CreateUserRequest, User};
