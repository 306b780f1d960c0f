use async_trait::async_trait;
use crate::database::DatabasePool;
use crate::models::reminder::{CreateReminderRequest, Reminder};
use super::errors::RepositoryError;
use super::in_memory::InMemoryStorage;
use super::storage::DatabaseStorage;

/// Repository trait for reminders
#[async_trait]
pub trait ReminderRepositoryTrait: Send + Sync {
    /// Store a reminder and return its id
    async fn set_reminder(&self, request: CreateReminderRequest) -> Result<i64, RepositoryError>;

    /// Get all reminders of a user, earliest due first
    async fn get_reminders(&self, user_id: i64) -> Result<Vec<Reminder>, RepositoryError>;

    /// Delete a reminder; `false` when no such reminder exists
    async fn delete_reminder(&self, reminder_id: i64) -> Result<bool, RepositoryError>;

    /// Mark a reminder completed; `false` when no such reminder exists
    async fn mark_completed(&self, reminder_id: i64) -> Result<bool, RepositoryError>;
}

#[derive(Debug, Clone)]
enum ReminderBackend {
    Database(DatabasePool),
    InMemory(InMemoryStorage),
}

/// Repository for reminders.
/// Uses the SQLite pool when one is available and an in-memory table otherwise.
#[derive(Debug, Clone)]
pub struct ReminderRepository {
    backend: ReminderBackend,
}

impl ReminderRepository {
    /// Create a repository backed by the given pool
    pub fn with_pool(pool: DatabasePool) -> Self {
        Self { backend: ReminderBackend::Database(pool) }
    }

    /// Create a repository that keeps reminders in memory and knows only the default user
    pub fn in_memory() -> Self {
        Self { backend: ReminderBackend::InMemory(InMemoryStorage::new()) }
    }

    /// Create a repository that keeps reminders in memory and checks users against `pool`
    pub fn in_memory_with_users(pool: DatabasePool) -> Self {
        Self { backend: ReminderBackend::InMemory(InMemoryStorage::with_user_directory(pool)) }
    }

    /// Name of the active backend, for logs and health output
    pub fn backend_name(&self) -> &'static str {
        match self.backend {
            ReminderBackend::Database(_) => "database",
            ReminderBackend::InMemory(_) => "memory",
        }
    }
}

#[async_trait]
impl ReminderRepositoryTrait for ReminderRepository {
    async fn set_reminder(&self, request: CreateReminderRequest) -> Result<i64, RepositoryError> {
        match &self.backend {
            ReminderBackend::Database(pool) => DatabaseStorage::store_reminder(pool, &request).await,
            ReminderBackend::InMemory(storage) => storage.store_reminder(&request).await,
        }
    }

    async fn get_reminders(&self, user_id: i64) -> Result<Vec<Reminder>, RepositoryError> {
        match &self.backend {
            ReminderBackend::Database(pool) => DatabaseStorage::get_reminders(pool, user_id).await,
            ReminderBackend::InMemory(storage) => storage.get_reminders(user_id).await,
        }
    }

    async fn delete_reminder(&self, reminder_id: i64) -> Result<bool, RepositoryError> {
        match &self.backend {
            ReminderBackend::Database(pool) => DatabaseStorage::delete_reminder(pool, reminder_id).await,
            ReminderBackend::InMemory(storage) => storage.delete_reminder(reminder_id).await,
        }
    }

    async fn mark_completed(&self, reminder_id: i64) -> Result<bool, RepositoryError> {
        match &self.backend {
            ReminderBackend::Database(pool) => DatabaseStorage::mark_completed(pool, reminder_id).await,
            ReminderBackend::InMemory(storage) => storage.mark_completed(reminder_id).await,
        }
    }
}
