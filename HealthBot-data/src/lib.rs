// Health Bot Data
// This crate handles the relational store: connection pooling, migrations,
// storage models and repositories

// Database connection management
pub mod database;

// Repository implementations for data access
pub mod repository;

// Data storage models
pub mod models;
