use async_trait::async_trait;
use thiserror::Error;
use tracing::{info, instrument};
use validator::Validate;

use health_bot_data::database::DatabasePool;
use health_bot_data::repository::{RepositoryError, UserRepository, UserRepositoryTrait};

use crate::entities::conversions;
use crate::entities::{CreateUserRequest, UserProfile};
use crate::utils::validate_email;
use super::describe_validation_errors;

/// User service errors
#[derive(Debug, Error)]
pub enum UserServiceError {
    /// Validation error
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Not found error
    #[error("User not found: {0}")]
    NotFound(String),

    /// Username or email already taken
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Repository error
    #[error("Repository error: {0}")]
    RepositoryError(String),
}

impl From<RepositoryError> for UserServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(msg) => UserServiceError::NotFound(msg),
            RepositoryError::Validation(msg) => UserServiceError::ValidationError(msg),
            RepositoryError::Constraint(_) => {
                UserServiceError::Conflict("Username or email is already registered".to_string())
            }
            other => UserServiceError::RepositoryError(other.to_string()),
        }
    }
}

/// Trait for user operations
#[async_trait]
pub trait UserServiceTrait: Send + Sync {
    /// Register a user
    async fn create_user(&self, request: CreateUserRequest) -> Result<UserProfile, UserServiceError>;

    /// Look a user up by id
    async fn get_user(&self, user_id: i64) -> Result<UserProfile, UserServiceError>;
}

/// User service over any user repository
pub struct UserService<R: UserRepositoryTrait> {
    repository: R,
}

impl<R: UserRepositoryTrait> UserService<R> {
    /// Create a new user service
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R: UserRepositoryTrait> UserServiceTrait for UserService<R> {
    #[instrument(skip(self, request), fields(username = %request.username))]
    async fn create_user(&self, request: CreateUserRequest) -> Result<UserProfile, UserServiceError> {
        let request = CreateUserRequest {
            username: request.username.trim().to_string(),
            email: request.email.trim().to_string(),
        };

        request
            .validate()
            .map_err(|e| UserServiceError::ValidationError(describe_validation_errors(&e)))?;

        if !validate_email(&request.email) {
            return Err(UserServiceError::ValidationError(format!(
                "email: '{}' is not a valid email address",
                request.email
            )));
        }

        let data_request = conversions::convert_to_data_user_request(&request);
        let user = self.repository.create_user(data_request).await?;
        info!(user_id = user.id, "User registered");

        Ok(conversions::convert_to_domain_user(user))
    }

    async fn get_user(&self, user_id: i64) -> Result<UserProfile, UserServiceError> {
        self.repository
            .get_user(user_id)
            .await?
            .map(conversions::convert_to_domain_user)
            .ok_or_else(|| UserServiceError::NotFound(format!("User with ID {} not found", user_id)))
    }
}

/// Create a user service on the given pool
pub fn create_user_service(pool: DatabasePool) -> impl UserServiceTrait {
    UserService::new(UserRepository::new(pool))
}

#[cfg(test)]
mod tests {
    use super::*;
    use health_bot_data::database::create_in_memory_pool;

    fn registration(username: &str, email: &str) -> CreateUserRequest {
        CreateUserRequest {
            username: username.to_string(),
            email: email.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_and_get_user() {
        let service = create_user_service(create_in_memory_pool().unwrap());

        let user = service.create_user(registration(" alice ", "alice@example.com")).await.unwrap();
        assert_eq!(user.id, 2);
        assert_eq!(user.username, "alice");

        let fetched = service.get_user(user.id).await.unwrap();
        assert_eq!(fetched, user);
    }

    #[tokio::test]
    async fn test_default_user_is_seeded() {
        let service = create_user_service(create_in_memory_pool().unwrap());
        let user = service.get_user(1).await.unwrap();
        assert_eq!(user.username, "default_user");
    }

    #[tokio::test]
    async fn test_invalid_registrations() {
        let service = create_user_service(create_in_memory_pool().unwrap());

        assert!(matches!(
            service.create_user(registration("bob", "not-an-email")).await,
            Err(UserServiceError::ValidationError(_))
        ));
        assert!(matches!(
            service.create_user(registration("   ", "bob@example.com")).await,
            Err(UserServiceError::ValidationError(_))
        ));
        assert!(matches!(
            service.create_user(registration("someone", "user@example.com")).await,
            Err(UserServiceError::Conflict(_))
        ));
        assert!(matches!(service.get_user(77).await, Err(UserServiceError::NotFound(_))));
    }
}
