use async_trait::async_trait;
use rusqlite::OptionalExtension;
use tracing::debug;

use crate::database::DatabasePool;
use crate::models::user::{CreateUserRequest, User};
use super::errors::RepositoryError;

/// Repository trait for users
#[async_trait]
pub trait UserRepositoryTrait: Send + Sync {
    /// Create a user; duplicate usernames or emails are constraint violations
    async fn create_user(&self, request: CreateUserRequest) -> Result<User, RepositoryError>;

    /// Get a user by id
    async fn get_user(&self, user_id: i64) -> Result<Option<User>, RepositoryError>;
}

/// SQLite repository for users
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: DatabasePool,
}

impl UserRepository {
    /// Create a new repository
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

fn select_user(conn: &rusqlite::Connection, user_id: i64) -> Result<Option<User>, RepositoryError> {
    let user = conn.query_row(
        "SELECT id, username, email, created_at FROM users WHERE id = ?1",
        [user_id],
        |row| {
            Ok(User {
                id: row.get(0)?,
                username: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
                email: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
                created_at: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
            })
        },
    ).optional()?;

    Ok(user)
}

#[async_trait]
impl UserRepositoryTrait for UserRepository {
    async fn create_user(&self, request: CreateUserRequest) -> Result<User, RepositoryError> {
        debug!("Creating user {}", request.username);

        let conn = self.pool.get_connection()?;
        conn.execute(
            "INSERT INTO users (username, email) VALUES (?1, ?2)",
            (&request.username, &request.email),
        )?;

        let id = conn.last_insert_rowid();
        select_user(&conn, id)?
            .ok_or_else(|| RepositoryError::NotFound(format!("user {}", id)))
    }

    async fn get_user(&self, user_id: i64) -> Result<Option<User>, RepositoryError> {
        let conn = self.pool.get_connection()?;
        select_user(&conn, user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::create_in_memory_pool;
    use crate::database::migrations::{DEFAULT_USERNAME, DEFAULT_USER_ID};

    #[tokio::test]
    async fn test_default_user_exists() {
        let repo = UserRepository::new(create_in_memory_pool().unwrap());

        let user = repo.get_user(DEFAULT_USER_ID).await.unwrap().unwrap();
        assert_eq!(user.username, DEFAULT_USERNAME);
        assert!(repo.get_user(99).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_is_rejected() {
        let repo = UserRepository::new(create_in_memory_pool().unwrap());

        let created = repo.create_user(CreateUserRequest {
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
        }).await.unwrap();
        assert_eq!(created.id, 2);

        let err = repo.create_user(CreateUserRequest {
            username: "alice2".to_string(),
            email: "alice@example.com".to_string(),
        }).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Constraint(_)));
    }
}
