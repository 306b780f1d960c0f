// Health Bot Domain
// This crate contains the business logic for the Health Bot backend

// Completion client and bot reply
pub mod bot;

// Static health knowledge base
pub mod knowledge;

// Services that implement business logic
pub mod services;

// Domain entities
pub mod entities;

// Health checks and system status
pub mod health;

// Time parsing, email validation and BMI helpers
pub mod utils;

// Re-export the database module from health_bot_data for convenience
pub use health_bot_data::database;

// Testing utilities - only available with mock feature
#[cfg(feature = "mock")]
pub mod testing;
