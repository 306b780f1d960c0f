use std::sync::PoisonError;
use rusqlite::ErrorCode;
use thiserror::Error;
use crate::database::DatabaseError;

/// Error type for repository operations
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    /// SQLite error
    #[error("SQLite error: {0}")]
    Sqlite(rusqlite::Error),

    /// Unique or foreign key constraint rejected the write
    #[error("Constraint violation: {0}")]
    Constraint(String),

    /// Connection pool error
    #[error("Connection pool error: {0}")]
    Pool(#[from] r2d2::Error),

    /// Lock error
    #[error("Lock error: {0}")]
    Lock(String),

    /// Not found error
    #[error("Record not found: {0}")]
    NotFound(String),
}

impl From<rusqlite::Error> for RepositoryError {
    fn from(error: rusqlite::Error) -> Self {
        match error {
            rusqlite::Error::SqliteFailure(ref failure, ref message)
                if failure.code == ErrorCode::ConstraintViolation =>
            {
                RepositoryError::Constraint(
                    message.clone().unwrap_or_else(|| failure.to_string()),
                )
            }
            other => RepositoryError::Sqlite(other),
        }
    }
}

impl<T> From<PoisonError<T>> for RepositoryError {
    fn from(error: PoisonError<T>) -> Self {
        RepositoryError::Lock(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constraint_failures_are_classified() {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        conn.execute_batch("CREATE TABLE t (name TEXT UNIQUE); INSERT INTO t VALUES ('a');").unwrap();

        let err = conn.execute("INSERT INTO t VALUES ('a')", []).unwrap_err();
        let repo_err = RepositoryError::from(err);

        assert!(matches!(repo_err, RepositoryError::Constraint(_)), "got {:?}", repo_err);
        assert!(repo_err.to_string().contains("UNIQUE"));
    }

    #[test]
    fn test_other_sqlite_errors_pass_through() {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        let err = conn.execute("SELECT * FROM missing_table", []).unwrap_err();

        assert!(matches!(RepositoryError::from(err), RepositoryError::Sqlite(_)));
    }
}
