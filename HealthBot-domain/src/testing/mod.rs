// Testing utilities and mock implementations for the domain layer
// This module is only available when the "mock" feature is enabled

// Re-export useful test mocks from the data layer
pub use health_bot_data::repository::mock::MockConversationRepository;

use std::collections::HashMap;
use async_trait::async_trait;

use crate::bot::{CompletionClient, CompletionError};
use crate::health::{
    ComponentStatus, HealthComponent, HealthServiceTrait, SystemHealth, DATABASE_COMPONENT,
};

/// Completion client that answers from a script instead of the network
#[derive(Debug)]
pub struct MockCompletionClient {
    reply: Result<String, CompletionError>,
    configured: bool,
}

impl Default for MockCompletionClient {
    fn default() -> Self {
        Self::new()
    }
}

impl MockCompletionClient {
    /// Echo every message back as `Mock reply to: <message>`
    pub fn new() -> Self {
        Self {
            reply: Ok(String::new()),
            configured: true,
        }
    }

    /// Always answer with the given text
    pub fn with_reply(mut self, reply: impl Into<String>) -> Self {
        self.reply = Ok(reply.into());
        self
    }

    /// Always fail with the given error
    pub fn with_error(mut self, error: CompletionError) -> Self {
        self.configured = error != CompletionError::MissingApiKey;
        self.reply = Err(error);
        self
    }
}

#[async_trait]
impl CompletionClient for MockCompletionClient {
    async fn complete(&self, message: &str) -> Result<String, CompletionError> {
        match &self.reply {
            Ok(reply) if reply.is_empty() => Ok(format!("Mock reply to: {}", message)),
            other => other.clone(),
        }
    }

    fn is_configured(&self) -> bool {
        self.configured
    }

    fn model(&self) -> &str {
        "mock/model"
    }
}

/// Mock implementation of health services for testing system health
#[derive(Debug)]
pub struct MockHealthService {
    database_status: ComponentStatus,
    components: HashMap<String, HealthComponent>,
}

impl Default for MockHealthService {
    fn default() -> Self {
        Self::new()
    }
}

impl MockHealthService {
    /// Create a new mock health service with all components healthy
    pub fn new() -> Self {
        Self {
            database_status: ComponentStatus::Healthy,
            components: HashMap::new(),
        }
    }

    /// Configure the mock with an unhealthy database
    pub fn with_unhealthy_database(mut self) -> Self {
        self.database_status = ComponentStatus::Unhealthy;
        self
    }

    /// Add a custom component with a specific status
    pub fn with_component(mut self, name: &str, status: ComponentStatus, details: Option<String>) -> Self {
        self.components.insert(name.to_string(), HealthComponent { status, details });
        self
    }
}

#[async_trait]
impl HealthServiceTrait for MockHealthService {
    async fn get_system_health(&self) -> SystemHealth {
        let mut components = self.components.clone();
        components.insert(
            DATABASE_COMPONENT.to_string(),
            HealthComponent {
                status: self.database_status.clone(),
                details: match self.database_status {
                    ComponentStatus::Unhealthy => Some("Database connection failed".to_string()),
                    _ => None,
                },
            },
        );

        SystemHealth::from_components(components)
    }

    async fn check_database_status(&self) -> Result<String, String> {
        match self.database_status {
            ComponentStatus::Unhealthy => Err("Database connection failed".to_string()),
            _ => Ok("mock database".to_string()),
        }
    }
}
