use std::sync::Arc;

use health_bot_data::database::DatabasePool;
use health_bot_domain::bot::CompletionClient;
use health_bot_domain::knowledge::KnowledgeBase;
use health_bot_domain::services::{
    create_chat_service, create_health_data_service, create_in_memory_reminder_service,
    create_reminder_service, create_user_service, ChatServiceTrait, HealthDataServiceTrait,
    ReminderServiceTrait, UserServiceTrait,
};

use crate::config::{ReminderBackend, DEFAULT_ENVIRONMENT};

/// Services shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub chat: Arc<dyn ChatServiceTrait>,
    pub reminders: Arc<dyn ReminderServiceTrait>,
    pub health_data: Arc<dyn HealthDataServiceTrait>,
    pub users: Arc<dyn UserServiceTrait>,
    pub knowledge: KnowledgeBase,
    /// Deployment environment name reported by `/health`
    pub environment: String,
}

impl AppState {
    /// Wire the services onto one pool and completion client
    pub fn new(
        pool: DatabasePool,
        client: Arc<dyn CompletionClient>,
        reminder_backend: ReminderBackend,
    ) -> Self {
        let reminders: Arc<dyn ReminderServiceTrait> = match reminder_backend {
            ReminderBackend::Database => Arc::new(create_reminder_service(pool.clone())),
            ReminderBackend::Memory => Arc::new(create_in_memory_reminder_service(Some(pool.clone()))),
        };

        Self {
            chat: Arc::new(create_chat_service(pool.clone(), client)),
            reminders,
            health_data: Arc::new(create_health_data_service(pool.clone())),
            users: Arc::new(create_user_service(pool)),
            knowledge: KnowledgeBase::new(),
            environment: DEFAULT_ENVIRONMENT.to_string(),
        }
    }

    /// Report `environment` from `/health`
    pub fn with_environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = environment.into();
        self
    }
}
