use rusqlite::Connection;
use tracing::{debug, info};

use crate::database::DatabaseError;

/// Id of the user seeded into an empty database
pub const DEFAULT_USER_ID: i64 = 1;

/// Username of the seeded default user
pub const DEFAULT_USERNAME: &str = "default_user";

/// Email of the seeded default user
pub const DEFAULT_USER_EMAIL: &str = "user@example.com";

/// Run SQLite migrations.
///
/// Column defaults stamp rows with the server's local wall-clock time, the
/// same zone reminder and measurement times are entered in.
pub fn run_migrations(conn: &Connection) -> Result<(), DatabaseError> {
    info!("Running SQLite migrations");

    create_users_table(conn)?;
    create_conversations_table(conn)?;
    create_reminders_table(conn)?;
    create_health_data_table(conn)?;
    create_indexes(conn)?;
    seed_default_user(conn)?;

    info!("SQLite migrations completed successfully");
    Ok(())
}

fn migration_error(step: &str, e: rusqlite::Error) -> DatabaseError {
    DatabaseError::MigrationError(format!("{}: {}", step, e))
}

/// Create the users table
fn create_users_table(conn: &Connection) -> Result<(), DatabaseError> {
    debug!("Creating users table if not exists");

    conn.execute(
        "CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            username TEXT UNIQUE,
            email TEXT UNIQUE,
            created_at TIMESTAMP DEFAULT (datetime('now', 'localtime'))
        )",
        [],
    ).map_err(|e| migration_error("users", e))?;

    Ok(())
}

/// Create the conversations table
fn create_conversations_table(conn: &Connection) -> Result<(), DatabaseError> {
    debug!("Creating conversations table if not exists");

    conn.execute(
        "CREATE TABLE IF NOT EXISTS conversations (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER,
            message TEXT,
            response TEXT,
            timestamp TIMESTAMP DEFAULT (datetime('now', 'localtime')),
            FOREIGN KEY (user_id) REFERENCES users (id)
        )",
        [],
    ).map_err(|e| migration_error("conversations", e))?;

    Ok(())
}

/// Create the reminders table
fn create_reminders_table(conn: &Connection) -> Result<(), DatabaseError> {
    debug!("Creating reminders table if not exists");

    conn.execute(
        "CREATE TABLE IF NOT EXISTS reminders (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER,
            reminder_text TEXT,
            reminder_time TIMESTAMP,
            is_completed INTEGER DEFAULT 0,
            created_at TIMESTAMP DEFAULT (datetime('now', 'localtime')),
            FOREIGN KEY (user_id) REFERENCES users (id)
        )",
        [],
    ).map_err(|e| migration_error("reminders", e))?;

    Ok(())
}

/// Create the health_data table
fn create_health_data_table(conn: &Connection) -> Result<(), DatabaseError> {
    debug!("Creating health_data table if not exists");

    conn.execute(
        "CREATE TABLE IF NOT EXISTS health_data (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER,
            type TEXT,
            value REAL,
            unit TEXT,
            recorded_at TIMESTAMP,
            created_at TIMESTAMP DEFAULT (datetime('now', 'localtime')),
            FOREIGN KEY (user_id) REFERENCES users (id)
        )",
        [],
    ).map_err(|e| migration_error("health_data", e))?;

    Ok(())
}

/// Create indexes for the per-user listing queries
fn create_indexes(conn: &Connection) -> Result<(), DatabaseError> {
    debug!("Creating indexes");

    conn.execute_batch(
        "CREATE INDEX IF NOT EXISTS idx_conversations_user_timestamp
            ON conversations (user_id, timestamp DESC);
         CREATE INDEX IF NOT EXISTS idx_reminders_user_time
            ON reminders (user_id, reminder_time);
         CREATE INDEX IF NOT EXISTS idx_health_data_user_type
            ON health_data (user_id, type);"
    ).map_err(|e| migration_error("indexes", e))?;

    Ok(())
}

/// Insert the default user when the users table is empty
fn seed_default_user(conn: &Connection) -> Result<(), DatabaseError> {
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))
        .map_err(|e| migration_error("seed", e))?;

    if count == 0 {
        info!("Seeding default user '{}'", DEFAULT_USERNAME);
        conn.execute(
            "INSERT INTO users (id, username, email) VALUES (?1, ?2, ?3)",
            (DEFAULT_USER_ID, DEFAULT_USERNAME, DEFAULT_USER_EMAIL),
        ).map_err(|e| migration_error("seed", e))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migrations_create_all_tables() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();

        let mut stmt = conn
            .prepare("SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name")
            .unwrap();
        let tables: Vec<String> = stmt
            .query_map([], |row| row.get(0))
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();

        assert_eq!(tables, vec!["conversations", "health_data", "reminders", "users"]);
    }

    #[test]
    fn test_migrations_are_idempotent_and_seed_once() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        run_migrations(&conn).unwrap();

        let (id, username, email): (i64, String, String) = conn
            .query_row("SELECT id, username, email FROM users", [], |row| {
                Ok((row.get(0)?, row.get(1)?, row.get(2)?))
            })
            .unwrap();
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0)).unwrap();

        assert_eq!(count, 1);
        assert_eq!(id, DEFAULT_USER_ID);
        assert_eq!(username, DEFAULT_USERNAME);
        assert_eq!(email, DEFAULT_USER_EMAIL);
    }

    #[test]
    fn test_default_timestamps_use_local_time() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        conn.execute(
            "INSERT INTO conversations (user_id, message, response) VALUES (?1, 'hi', 'hello')",
            [DEFAULT_USER_ID],
        )
        .unwrap();

        let (from_local, from_utc): (f64, f64) = conn
            .query_row(
                "SELECT abs(julianday(timestamp) - julianday('now', 'localtime')) * 86400,
                        abs(julianday(timestamp) - julianday('now')) * 86400
                 FROM conversations",
                [],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .unwrap();

        assert!(from_local < 5.0, "stamp is {}s away from local time", from_local);
        let offset: f64 = conn
            .query_row(
                "SELECT abs(julianday('now', 'localtime') - julianday('now')) * 86400",
                [],
                |row| row.get(0),
            )
            .unwrap();
        if offset > 60.0 {
            assert!(from_utc > 60.0);
        }
    }
}
