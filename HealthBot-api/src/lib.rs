// Health Bot API lib.rs
//
// HTTP surface of the Health Bot: router, handlers, public entities and OpenAPI docs.

// Public modules
pub mod api;
pub mod config;
pub mod entities;
pub mod openapi;
