// Repository module structure
pub mod errors;
mod conversation;
mod health_data;
mod in_memory;
mod reminder;
mod storage;
mod user;

// Re-export commonly used types
pub use errors::RepositoryError;
pub use conversation::{ConversationRepository, ConversationRepositoryTrait, DEFAULT_HISTORY_LIMIT};
pub use health_data::{HealthDataRepository, HealthDataRepositoryTrait};
pub use reminder::{ReminderRepository, ReminderRepositoryTrait};
pub use user::{UserRepository, UserRepositoryTrait};

// Mock repositories for both testing and when mock feature is enabled
#[cfg(any(test, feature = "mock"))]
pub mod mock;
