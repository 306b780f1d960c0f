//! Database connection module for the Health Bot application
//!
//! SQLite is the only supported backend. The pool is created from environment
//! configuration, every connection enforces foreign keys, and the schema is
//! migrated before the pool is handed out.

use std::env;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use once_cell::sync::OnceCell;
use r2d2_sqlite::SqliteConnectionManager;
use tracing::{info, error, warn};

use super::migrations::run_sqlite_migrations;

/// Global database pool used by the server binary
static DB_POOL: OnceCell<DatabasePool> = OnceCell::new();

/// Default location of the SQLite database file
pub const DEFAULT_SQLITE_PATH: &str = "data/health_bot.db";

/// Pragmas applied to every new connection
const CONNECTION_PRAGMAS: &str = "PRAGMA foreign_keys = ON; PRAGMA busy_timeout = 5000;";

/// Pooled SQLite connection
pub type SqliteConnection = r2d2::PooledConnection<SqliteConnectionManager>;

/// Supported database types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseType {
    /// SQLite database (file-based or in-memory)
    Sqlite,
}

impl FromStr for DatabaseType {
    type Err = DatabaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sqlite" => Ok(DatabaseType::Sqlite),
            _ => Err(DatabaseError::UnsupportedDatabaseType(s.to_string())),
        }
    }
}

/// Database connection pool enum for different database types
#[derive(Debug, Clone)]
pub enum DatabasePool {
    /// SQLite connection pool
    SQLite(Arc<r2d2::Pool<SqliteConnectionManager>>),
}

impl DatabasePool {
    /// Check out a connection from the pool
    pub fn get_connection(&self) -> Result<SqliteConnection, DatabaseError> {
        match self {
            DatabasePool::SQLite(pool) => Ok(pool.get()?),
        }
    }
}

/// Database error
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// SQLite error
    #[error("SQLite error: {0}")]
    SqliteError(#[from] rusqlite::Error),

    /// SQLite connection pool error
    #[error("SQLite connection pool error: {0}")]
    SqlitePoolError(#[from] r2d2::Error),

    /// Database pool already initialized
    #[error("Database pool is already initialized")]
    PoolAlreadyInitialized,

    /// Database pool not initialized
    #[error("Database pool is not initialized")]
    PoolNotInitialized,

    /// Unsupported database type
    #[error("Unsupported database type: {0}")]
    UnsupportedDatabaseType(String),

    /// Migration error
    #[error("Database migration error: {0}")]
    MigrationError(String),
}

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Database type (only sqlite)
    pub db_type: DatabaseType,
    /// Path to SQLite database file
    pub sqlite_path: Option<String>,
    /// Maximum number of connections
    pub max_connections: u32,
    /// Connection timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            db_type: DatabaseType::Sqlite,
            sqlite_path: Some(DEFAULT_SQLITE_PATH.to_string()),
            max_connections: 10,
            timeout_seconds: 30,
        }
    }
}

impl DatabaseConfig {
    /// Create a new database configuration from environment variables
    pub fn from_env() -> Result<Self, DatabaseError> {
        let db_type = env::var("DB_TYPE")
            .unwrap_or_else(|_| "sqlite".to_string())
            .parse::<DatabaseType>()?;

        let sqlite_path = env::var("DB_SQLITE_PATH").ok();
        match sqlite_path {
            Some(ref path) => info!("Using SQLite database at: {}", path),
            None => info!("No DB_SQLITE_PATH provided, will use default path: {}", DEFAULT_SQLITE_PATH),
        }

        let defaults = Self::default();

        let max_connections = env::var("DB_MAX_CONNECTIONS")
            .ok()
            .and_then(|s| s.parse::<u32>().ok())
            .filter(|n| *n > 0)
            .unwrap_or(defaults.max_connections);

        let timeout_seconds = env::var("DB_TIMEOUT_SECONDS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(defaults.timeout_seconds);

        info!("Database configuration: max_connections={}, timeout={}s",
            max_connections, timeout_seconds);

        Ok(DatabaseConfig {
            db_type,
            sqlite_path,
            max_connections,
            timeout_seconds,
        })
    }
}

/// Initialize the global database connection pool from the environment
pub fn initialize_database_pool() -> Result<(), DatabaseError> {
    if DB_POOL.get().is_some() {
        return Err(DatabaseError::PoolAlreadyInitialized);
    }

    let config = DatabaseConfig::from_env()?;

    info!("Initializing database pool with type: {:?}", config.db_type);

    let pool = match config.db_type {
        DatabaseType::Sqlite => create_sqlite_pool(&config)?,
    };

    DB_POOL.set(pool).map_err(|_| DatabaseError::PoolAlreadyInitialized)
}

/// Get the global database connection pool
pub fn get_db_pool() -> Result<DatabasePool, DatabaseError> {
    DB_POOL.get()
        .cloned()
        .ok_or(DatabaseError::PoolNotInitialized)
}

/// Create a migrated SQLite pool backed by the configured file.
///
/// Falls back to an in-memory database when the file cannot be created or opened.
pub fn create_sqlite_pool(config: &DatabaseConfig) -> Result<DatabasePool, DatabaseError> {
    use rusqlite::OpenFlags;
    use std::fs;
    use std::path::Path;

    let sqlite_path = config.sqlite_path.clone()
        .unwrap_or_else(|| DEFAULT_SQLITE_PATH.to_string());

    info!("Initializing SQLite database at: {}", sqlite_path);

    if let Some(parent) = Path::new(&sqlite_path).parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            info!("Creating parent directory: {:?}", parent);
            if let Err(e) = fs::create_dir_all(parent) {
                warn!("Failed to create directory: {}, falling back to in-memory database", e);
                return create_in_memory_pool();
            }
        }
    }

    let manager = SqliteConnectionManager::file(&sqlite_path)
        .with_flags(OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_CREATE)
        .with_init(|conn| conn.execute_batch(CONNECTION_PRAGMAS));

    let pool = match r2d2::Pool::builder()
        .max_size(config.max_connections)
        .connection_timeout(Duration::from_secs(config.timeout_seconds))
        .build(manager) {
            Ok(pool) => pool,
            Err(e) => {
                error!("Failed to create SQLite connection pool: {}", e);
                warn!("Falling back to in-memory SQLite database");
                return create_in_memory_pool();
            }
        };

    let pool = DatabasePool::SQLite(Arc::new(pool));
    run_migrations(&pool)?;

    info!("SQLite connection pool created successfully");
    Ok(pool)
}

/// Create a migrated in-memory SQLite pool.
///
/// The pool holds exactly one connection that never expires, so every
/// checkout sees the same database.
pub fn create_in_memory_pool() -> Result<DatabasePool, DatabaseError> {
    info!("Initializing in-memory SQLite database");

    let manager = SqliteConnectionManager::memory()
        .with_init(|conn| conn.execute_batch(CONNECTION_PRAGMAS));

    let pool = r2d2::Pool::builder()
        .max_size(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .build(manager)?;

    let pool = DatabasePool::SQLite(Arc::new(pool));
    run_migrations(&pool)?;

    info!("In-memory SQLite database initialized successfully");
    Ok(pool)
}

/// Run database migrations against a pool
pub fn run_migrations(pool: &DatabasePool) -> Result<(), DatabaseError> {
    info!("Running database migrations");

    let conn = pool.get_connection()?;
    run_sqlite_migrations(&conn)?;

    info!("Database migrations completed successfully");
    Ok(())
}

/// Get information about a database connection pool
pub fn get_connection_info(pool: &DatabasePool) -> Result<String, DatabaseError> {
    match pool {
        DatabasePool::SQLite(inner) => {
            let conn = pool.get_connection()?;

            let path: String = conn.query_row(
                "PRAGMA database_list",
                [],
                |row| row.get(2),
            )?;

            let location = if path.is_empty() || path == ":memory:" {
                "SQLite in-memory database".to_string()
            } else {
                format!("SQLite database at {}", path)
            };

            let state = inner.state();
            Ok(format!("{} (connections: open={}, in_use={}, idle={})",
                location,
                state.connections,
                state.connections.saturating_sub(state.idle_connections),
                state.idle_connections
            ))
        }
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;

    #[test]
    fn test_database_config_default() {
        let config = DatabaseConfig::default();
        assert_eq!(config.db_type, DatabaseType::Sqlite);
        assert_eq!(config.sqlite_path.as_deref(), Some(DEFAULT_SQLITE_PATH));
        assert_eq!(config.max_connections, 10);
        assert_eq!(config.timeout_seconds, 30);
    }

    #[test]
    fn test_database_type_from_str() {
        assert_eq!("sqlite".parse::<DatabaseType>().unwrap(), DatabaseType::Sqlite);
        assert_eq!("SQLite".parse::<DatabaseType>().unwrap(), DatabaseType::Sqlite);
        assert!("postgres".parse::<DatabaseType>().is_err());
    }

    #[test]
    fn test_in_memory_pool_shares_one_database() {
        let pool = create_in_memory_pool().unwrap();

        {
            let conn = pool.get_connection().unwrap();
            conn.execute(
                "INSERT INTO users (username, email) VALUES (?1, ?2)",
                ("second_user", "second@example.com"),
            ).unwrap();
        }

        let conn = pool.get_connection().unwrap();
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0)).unwrap();
        assert_eq!(count, 2, "Default user plus the inserted one");
    }

    #[test]
    fn test_file_pool_creates_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("bot.db");

        let config = DatabaseConfig {
            sqlite_path: Some(path.to_string_lossy().to_string()),
            ..DatabaseConfig::default()
        };

        let pool = create_sqlite_pool(&config).unwrap();
        assert!(path.exists());

        let info = get_connection_info(&pool).unwrap();
        assert!(info.contains("bot.db"), "unexpected connection info: {}", info);
    }

    #[test]
    fn test_connection_info_for_memory_database() {
        let pool = create_in_memory_pool().unwrap();
        let info = get_connection_info(&pool).unwrap();
        assert!(info.starts_with("SQLite in-memory database"));
        // The single pooled connection is checked out while the info is gathered
        assert!(info.ends_with("(connections: open=1, in_use=1, idle=0)"), "unexpected connection info: {}", info);
    }

    #[test]
    fn test_foreign_keys_are_enforced() {
        let pool = create_in_memory_pool().unwrap();
        let conn = pool.get_connection().unwrap();

        let result = conn.execute(
            "INSERT INTO reminders (user_id, reminder_text, reminder_time) VALUES (?1, ?2, ?3)",
            (999_i64, "orphan", "2024-01-01 08:00:00"),
        );
        assert!(result.is_err());
    }
}
