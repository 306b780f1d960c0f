//! Domain layer health check functionality
//! Reports on the database and the completion API configuration

use std::collections::HashMap;
use std::sync::Arc;
use async_trait::async_trait;
use tracing::warn;

use health_bot_data::database::{get_connection_info, DatabasePool};

use crate::bot::CompletionClient;

/// Component names used in [`SystemHealth::components`]
pub const DATABASE_COMPONENT: &str = "database";
pub const COMPLETION_COMPONENT: &str = "completion_api";

/// System health status
#[derive(Debug, Clone, PartialEq)]
pub enum SystemStatus {
    /// All components are healthy
    Healthy,
    /// Some components are degraded but the system is functional
    Degraded,
    /// System is not functioning properly
    Unhealthy,
}

/// Component health status
#[derive(Debug, Clone, PartialEq)]
pub enum ComponentStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

/// Represents a health component with status and optional details
#[derive(Debug, Clone)]
pub struct HealthComponent {
    /// Status of the component
    pub status: ComponentStatus,
    /// Optional details about the component status
    pub details: Option<String>,
}

/// Represents the overall health of the system
#[derive(Debug, Clone)]
pub struct SystemHealth {
    /// Overall system status
    pub status: SystemStatus,
    /// Map of component names to their health status
    pub components: HashMap<String, HealthComponent>,
}

impl SystemHealth {
    /// Derive the overall status from the worst component
    pub fn from_components(components: HashMap<String, HealthComponent>) -> Self {
        let status = if components.values().any(|c| c.status == ComponentStatus::Unhealthy) {
            SystemStatus::Unhealthy
        } else if components.values().any(|c| c.status == ComponentStatus::Degraded) {
            SystemStatus::Degraded
        } else {
            SystemStatus::Healthy
        };

        Self { status, components }
    }
}

/// Trait for health services
#[async_trait]
pub trait HealthServiceTrait: Send + Sync + std::fmt::Debug {
    /// Get the overall system health
    async fn get_system_health(&self) -> SystemHealth;

    /// Check the status of the database.
    /// Returns a description of the database when a query succeeds.
    async fn check_database_status(&self) -> Result<String, String>;
}

/// Probe the database with a trivial query
pub fn check_database_status(pool: &DatabasePool) -> Result<String, String> {
    let conn = pool
        .get_connection()
        .map_err(|e| format!("Database connection error: {}", e))?;

    conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))
        .map_err(|e| format!("Database query failed: {}", e))?;
    drop(conn);

    get_connection_info(pool).map_err(|e| e.to_string())
}

/// Health service over the application's pool and completion client
pub struct SystemHealthService {
    pool: DatabasePool,
    client: Arc<dyn CompletionClient>,
}

impl std::fmt::Debug for SystemHealthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SystemHealthService")
            .field("pool", &self.pool)
            .field("model", &self.client.model())
            .finish()
    }
}

impl SystemHealthService {
    /// Create a new health service
    pub fn new(pool: DatabasePool, client: Arc<dyn CompletionClient>) -> Self {
        Self { pool, client }
    }

    fn completion_component(&self) -> HealthComponent {
        if self.client.is_configured() {
            HealthComponent {
                status: ComponentStatus::Healthy,
                details: Some(format!("model {}", self.client.model())),
            }
        } else {
            HealthComponent {
                status: ComponentStatus::Degraded,
                details: Some("OPENROUTER_API_KEY is not set; chat replies will explain the missing key".to_string()),
            }
        }
    }
}

#[async_trait]
impl HealthServiceTrait for SystemHealthService {
    async fn get_system_health(&self) -> SystemHealth {
        let database = match self.check_database_status().await {
            Ok(info) => HealthComponent {
                status: ComponentStatus::Healthy,
                details: Some(info),
            },
            Err(e) => {
                warn!("Database health check failed: {}", e);
                HealthComponent {
                    status: ComponentStatus::Unhealthy,
                    details: Some(e),
                }
            }
        };

        let components = HashMap::from([
            (DATABASE_COMPONENT.to_string(), database),
            (COMPLETION_COMPONENT.to_string(), self.completion_component()),
        ]);

        SystemHealth::from_components(components)
    }

    async fn check_database_status(&self) -> Result<String, String> {
        check_database_status(&self.pool)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bot::{CompletionConfig, OpenRouterClient};
    use health_bot_data::database::create_in_memory_pool;

    fn client(api_key: Option<&str>) -> Arc<dyn CompletionClient> {
        let mut config = CompletionConfig::default();
        if let Some(key) = api_key {
            config = config.with_api_key(key);
        }
        Arc::new(OpenRouterClient::new(config).unwrap())
    }

    #[tokio::test]
    async fn test_healthy_when_configured() {
        let service = SystemHealthService::new(create_in_memory_pool().unwrap(), client(Some("sk-test")));
        let health = service.get_system_health().await;

        assert_eq!(health.status, SystemStatus::Healthy);
        assert!(health.components[DATABASE_COMPONENT]
            .details
            .as_deref()
            .unwrap()
            .contains("in-memory"));
    }

    #[tokio::test]
    async fn test_degraded_without_api_key() {
        let service = SystemHealthService::new(create_in_memory_pool().unwrap(), client(None));
        let health = service.get_system_health().await;

        assert_eq!(health.status, SystemStatus::Degraded);
        assert_eq!(health.components[COMPLETION_COMPONENT].status, ComponentStatus::Degraded);
        assert_eq!(health.components[DATABASE_COMPONENT].status, ComponentStatus::Healthy);
    }

    #[test]
    fn test_unhealthy_component_wins() {
        let components = HashMap::from([
            ("a".to_string(), HealthComponent { status: ComponentStatus::Degraded, details: None }),
            ("b".to_string(), HealthComponent { status: ComponentStatus::Unhealthy, details: None }),
        ]);
        assert_eq!(SystemHealth::from_components(components).status, SystemStatus::Unhealthy);
    }
}
