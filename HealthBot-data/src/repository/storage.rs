use tracing::debug;

use crate::models::reminder::{CreateReminderRequest, Reminder};
use crate::database::DatabasePool;
use super::errors::RepositoryError;

/// Database storage operations for reminders
pub struct DatabaseStorage;

impl DatabaseStorage {
    /// Store a reminder and return its row id
    pub async fn store_reminder(pool: &DatabasePool, request: &CreateReminderRequest) -> Result<i64, RepositoryError> {
        debug!("Storing reminder in database for user {}", request.user_id);

        let conn = pool.get_connection()?;
        conn.execute(
            "INSERT INTO reminders (user_id, reminder_text, reminder_time)
             VALUES (?1, ?2, ?3)",
            (request.user_id, &request.text, &request.time),
        )?;

        Ok(conn.last_insert_rowid())
    }

    /// Get a user's reminders ordered by due time
    pub async fn get_reminders(pool: &DatabasePool, user_id: i64) -> Result<Vec<Reminder>, RepositoryError> {
        debug!("Getting reminders from database for user {}", user_id);

        let conn = pool.get_connection()?;
        let mut stmt = conn.prepare(
            "SELECT id, user_id, reminder_text, reminder_time, is_completed
             FROM reminders
             WHERE user_id = ?1
             ORDER BY reminder_time, id"
        )?;

        let rows = stmt.query_map([user_id], |row| {
            Ok(Reminder {
                id: row.get(0)?,
                user_id: row.get(1)?,
                text: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
                time: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
                completed: row.get::<_, Option<i64>>(4)?.unwrap_or(0) != 0,
            })
        })?;

        let mut reminders = Vec::new();
        for reminder in rows {
            reminders.push(reminder?);
        }

        Ok(reminders)
    }

    /// Delete a reminder, returning whether a row was removed
    pub async fn delete_reminder(pool: &DatabasePool, reminder_id: i64) -> Result<bool, RepositoryError> {
        debug!("Deleting reminder {} from database", reminder_id);

        let conn = pool.get_connection()?;
        let affected = conn.execute("DELETE FROM reminders WHERE id = ?1", [reminder_id])?;

        Ok(affected > 0)
    }

    /// Mark a reminder completed, returning whether a row was updated
    pub async fn mark_completed(pool: &DatabasePool, reminder_id: i64) -> Result<bool, RepositoryError> {
        debug!("Marking reminder {} completed in database", reminder_id);

        let conn = pool.get_connection()?;
        let affected = conn.execute(
            "UPDATE reminders SET is_completed = 1 WHERE id = ?1",
            [reminder_id],
        )?;

        Ok(affected > 0)
    }
}
