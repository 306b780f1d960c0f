pub mod chat;
pub mod health;
pub mod health_data;
pub mod knowledge;
pub mod pages;
pub mod reminders;
pub mod users;

// Re-export handlers for easier imports
pub use chat::{chat, conversation_history, legacy_chat};
pub use health::{api_status, health_check};
pub use health_data::{calculate_bmi, list_health_data, record_health_data};
pub use knowledge::{get_topic, list_categories, search};
pub use pages::{chat_page, index};
pub use reminders::{complete_reminder, delete_reminder, list_reminders, set_reminder};
pub use users::{create_user, get_user};
