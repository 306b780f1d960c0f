use std::sync::{Arc, Mutex};
use std::collections::BTreeMap;

use crate::database::migrations::DEFAULT_USER_ID;
use crate::database::DatabasePool;
use crate::models::reminder::{CreateReminderRequest, Reminder};
use super::errors::RepositoryError;

#[derive(Debug, Default)]
struct ReminderTable {
    next_id: i64,
    rows: BTreeMap<i64, Reminder>,
}

/// Where the storage looks up the users a reminder may belong to
#[derive(Debug, Clone, Default)]
enum UserDirectory {
    /// Only the seeded default user exists
    #[default]
    DefaultOnly,
    /// Users live in the `users` table of this pool
    Database(DatabasePool),
}

/// In-memory storage implementation for reminders.
///
/// Ids start at 1 and are never reused, matching an AUTOINCREMENT column.
/// Reminders for unknown users are rejected like a foreign key would.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStorage {
    reminders: Arc<Mutex<ReminderTable>>,
    users: UserDirectory,
}

impl InMemoryStorage {
    /// Create a new in-memory storage that only knows the default user
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new in-memory storage that checks users against `pool`
    pub fn with_user_directory(pool: DatabasePool) -> Self {
        Self {
            reminders: Arc::default(),
            users: UserDirectory::Database(pool),
        }
    }

    fn user_exists(&self, user_id: i64) -> Result<bool, RepositoryError> {
        match &self.users {
            UserDirectory::DefaultOnly => Ok(user_id == DEFAULT_USER_ID),
            UserDirectory::Database(pool) => {
                let conn = pool.get_connection()?;
                let count: i64 = conn.query_row(
                    "SELECT COUNT(*) FROM users WHERE id = ?1",
                    [user_id],
                    |row| row.get(0),
                )?;
                Ok(count > 0)
            }
        }
    }

    /// Store a reminder in memory and return its id
    pub async fn store_reminder(&self, request: &CreateReminderRequest) -> Result<i64, RepositoryError> {
        if !self.user_exists(request.user_id)? {
            return Err(RepositoryError::Constraint(format!(
                "FOREIGN KEY constraint failed: no user with id {}",
                request.user_id
            )));
        }

        let mut table = self.reminders.lock()?;
        table.next_id += 1;
        let id = table.next_id;

        table.rows.insert(id, Reminder {
            id,
            user_id: request.user_id,
            text: request.text.clone(),
            time: request.time.clone(),
            completed: false,
        });

        Ok(id)
    }

    /// Get a user's reminders ordered by due time
    pub async fn get_reminders(&self, user_id: i64) -> Result<Vec<Reminder>, RepositoryError> {
        let table = self.reminders.lock()?;

        let mut reminders: Vec<Reminder> = table.rows
            .values()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect();
        reminders.sort_by(|a, b| a.time.cmp(&b.time).then(a.id.cmp(&b.id)));

        Ok(reminders)
    }

    /// Delete a reminder from memory
    pub async fn delete_reminder(&self, reminder_id: i64) -> Result<bool, RepositoryError> {
        let mut table = self.reminders.lock()?;
        Ok(table.rows.remove(&reminder_id).is_some())
    }

    /// Mark a reminder completed in memory
    pub async fn mark_completed(&self, reminder_id: i64) -> Result<bool, RepositoryError> {
        let mut table = self.reminders.lock()?;
        match table.rows.get_mut(&reminder_id) {
            Some(reminder) => {
                reminder.completed = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
