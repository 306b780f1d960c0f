use async_trait::async_trait;
use chrono::{Local, NaiveDateTime};
use thiserror::Error;
use tracing::{info, instrument};
use validator::Validate;

use health_bot_data::database::DatabasePool;
use health_bot_data::repository::{ReminderRepository, ReminderRepositoryTrait, RepositoryError};

use crate::entities::conversions;
use crate::entities::{CreateReminderRequest, CreatedReminder, ReminderItem};
use crate::utils::{parse_time_at, to_storage_string};
use super::describe_validation_errors;

/// Reminder service errors
#[derive(Debug, Error)]
pub enum ReminderServiceError {
    /// Validation error
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Not found error
    #[error("Reminder not found: {0}")]
    NotFound(String),

    /// Repository error
    #[error("Repository error: {0}")]
    RepositoryError(String),
}

impl From<RepositoryError> for ReminderServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(msg) => ReminderServiceError::NotFound(msg),
            RepositoryError::Validation(msg) => ReminderServiceError::ValidationError(msg),
            RepositoryError::Constraint(_) => {
                ReminderServiceError::ValidationError("Unknown user".to_string())
            }
            other => ReminderServiceError::RepositoryError(other.to_string()),
        }
    }
}

/// Trait for reminder operations
#[async_trait]
pub trait ReminderServiceTrait: Send + Sync {
    /// Parse the time expression and store the reminder
    async fn create_reminder(&self, request: CreateReminderRequest) -> Result<CreatedReminder, ReminderServiceError>;

    /// Reminders of a user, earliest due first
    async fn list_reminders(&self, user_id: i64) -> Result<Vec<ReminderItem>, ReminderServiceError>;

    async fn delete_reminder(&self, reminder_id: i64) -> Result<(), ReminderServiceError>;

    async fn complete_reminder(&self, reminder_id: i64) -> Result<(), ReminderServiceError>;
}

/// Reminder service over any reminder repository
pub struct ReminderService<R: ReminderRepositoryTrait> {
    repository: R,
    clock: fn() -> NaiveDateTime,
}

fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

impl<R: ReminderRepositoryTrait> ReminderService<R> {
    /// Create a new reminder service using the local clock
    pub fn new(repository: R) -> Self {
        Self { repository, clock: local_now }
    }

    /// Replace the clock used to resolve relative times
    pub fn with_clock(mut self, clock: fn() -> NaiveDateTime) -> Self {
        self.clock = clock;
        self
    }
}

#[async_trait]
impl<R: ReminderRepositoryTrait> ReminderServiceTrait for ReminderService<R> {
    #[instrument(skip(self, request), fields(user_id = request.user_id))]
    async fn create_reminder(&self, request: CreateReminderRequest) -> Result<CreatedReminder, ReminderServiceError> {
        let request = CreateReminderRequest {
            text: request.text.trim().to_string(),
            time: request.time.trim().to_string(),
            ..request
        };

        request
            .validate()
            .map_err(|e| ReminderServiceError::ValidationError(describe_validation_errors(&e)))?;

        let due = parse_time_at(&request.time, (self.clock)()).ok_or_else(|| {
            ReminderServiceError::ValidationError(format!(
                "Could not understand the reminder time '{}'",
                request.time
            ))
        })?;
        let time = to_storage_string(&due);

        let data_request = conversions::convert_to_data_reminder_request(request.user_id, &request.text, &time);
        let reminder_id = self.repository.set_reminder(data_request).await?;

        info!(reminder_id, "Reminder set for {}", time);
        Ok(CreatedReminder { reminder_id, time })
    }

    async fn list_reminders(&self, user_id: i64) -> Result<Vec<ReminderItem>, ReminderServiceError> {
        let reminders = self.repository.get_reminders(user_id).await?;

        Ok(reminders
            .into_iter()
            .map(conversions::convert_to_domain_reminder)
            .collect())
    }

    async fn delete_reminder(&self, reminder_id: i64) -> Result<(), ReminderServiceError> {
        if self.repository.delete_reminder(reminder_id).await? {
            Ok(())
        } else {
            Err(ReminderServiceError::NotFound(format!("Reminder with ID {} not found", reminder_id)))
        }
    }

    async fn complete_reminder(&self, reminder_id: i64) -> Result<(), ReminderServiceError> {
        if self.repository.mark_completed(reminder_id).await? {
            Ok(())
        } else {
            Err(ReminderServiceError::NotFound(format!("Reminder with ID {} not found", reminder_id)))
        }
    }
}

/// Create a reminder service that stores reminders in the database
pub fn create_reminder_service(pool: DatabasePool) -> impl ReminderServiceTrait {
    let repository = ReminderRepository::with_pool(pool);
    info!("Using {} reminder storage", repository.backend_name());
    ReminderService::new(repository)
}

/// Create a reminder service that keeps reminders in memory.
///
/// Owners are checked against the users in `users`, or only the default user when `None`.
pub fn create_in_memory_reminder_service(users: Option<DatabasePool>) -> impl ReminderServiceTrait {
    let repository = match users {
        Some(pool) => ReminderRepository::in_memory_with_users(pool),
        None => ReminderRepository::in_memory(),
    };
    info!("Using {} reminder storage", repository.backend_name());
    ReminderService::new(repository)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed_now() -> NaiveDateTime {
        NaiveDateTime::parse_from_str("2024-05-01 08:00:00", "%Y-%m-%d %H:%M:%S").unwrap()
    }

    fn service() -> ReminderService<ReminderRepository> {
        ReminderService::new(ReminderRepository::in_memory()).with_clock(fixed_now)
    }

    fn request(text: &str, time: &str) -> CreateReminderRequest {
        CreateReminderRequest {
            user_id: 1,
            text: text.to_string(),
            time: time.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_normalizes_time() {
        let service = service();

        let created = service.create_reminder(request("Take vitamins", "in 30 minutes")).await.unwrap();
        assert_eq!(created.reminder_id, 1);
        assert_eq!(created.time, "2024-05-01 08:30:00");

        let created = service.create_reminder(request("Call doctor", "2:15 PM")).await.unwrap();
        assert_eq!(created.time, "2024-05-01 14:15:00");
    }

    #[tokio::test]
    async fn test_create_rejects_bad_input() {
        let service = service();

        let err = service.create_reminder(request("   ", "in 5 minutes")).await.unwrap_err();
        assert!(matches!(err, ReminderServiceError::ValidationError(_)));

        let err = service.create_reminder(request("Walk", "someday")).await.unwrap_err();
        assert!(err.to_string().contains("someday"));

        let err = service.create_reminder(request("Walk", "")).await.unwrap_err();
        assert!(matches!(err, ReminderServiceError::ValidationError(_)));
    }

    #[tokio::test]
    async fn test_list_is_ordered_and_formatted() {
        let service = service();
        service.create_reminder(request("Evening walk", "2024-05-01 19:00")).await.unwrap();
        service.create_reminder(request("Breakfast", "in 1 hour")).await.unwrap();

        let reminders = service.list_reminders(1).await.unwrap();
        let texts: Vec<&str> = reminders.iter().map(|r| r.text.as_str()).collect();
        assert_eq!(texts, vec!["Breakfast", "Evening walk"]);
        assert_eq!(reminders[1].display_time.as_deref(), Some("May 01, 2024 at 07:00 PM"));
    }

    #[tokio::test]
    async fn test_complete_and_delete_missing_reminder() {
        let service = service();
        let created = service.create_reminder(request("Stretch", "09:00")).await.unwrap();

        service.complete_reminder(created.reminder_id).await.unwrap();
        assert!(service.list_reminders(1).await.unwrap()[0].completed);

        service.delete_reminder(created.reminder_id).await.unwrap();
        assert!(matches!(
            service.delete_reminder(created.reminder_id).await,
            Err(ReminderServiceError::NotFound(_))
        ));
        assert!(matches!(
            service.complete_reminder(99).await,
            Err(ReminderServiceError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_unknown_user_is_a_validation_error_on_every_backend() {
        let pool = health_bot_data::database::create_in_memory_pool().unwrap();
        let repositories = [
            ReminderRepository::with_pool(pool.clone()),
            ReminderRepository::in_memory_with_users(pool),
            ReminderRepository::in_memory(),
        ];

        for repository in repositories {
            let service = ReminderService::new(repository).with_clock(fixed_now);
            let err = service
                .create_reminder(CreateReminderRequest { user_id: 42, ..request("Walk", "10:00") })
                .await
                .unwrap_err();
            assert!(
                matches!(err, ReminderServiceError::ValidationError(ref msg) if msg == "Unknown user"),
                "got {:?}",
                err
            );
        }
    }
}
