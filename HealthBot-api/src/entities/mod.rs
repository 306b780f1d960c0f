// Public entities for the Health Bot API
// This module contains data structures that are shared across the application boundary

// Common entities for error handling and user selection
pub mod common;

pub mod chat;
pub mod health_data;
pub mod knowledge;
pub mod reminders;
pub mod users;

pub use common::{ErrorResponse, UserQuery};
