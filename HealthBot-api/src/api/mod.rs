pub mod handlers;
pub mod routes;
pub mod state;

use std::sync::Arc;
use axum::Router;
use tracing::{info, warn};

use health_bot_data::database::{create_in_memory_pool, get_db_pool};
use health_bot_domain::bot::{CompletionClient, OpenRouterClient};
use health_bot_domain::health::SystemHealthService;

use crate::config::ServerConfig;
use handlers::health::{initialize_server_start_time, HealthService};
use state::AppState;

/// Create the application router on the global database pool.
///
/// Uses a private in-memory database when the pool was never initialized.
pub fn create_application(config: &ServerConfig) -> anyhow::Result<Router> {
    let pool = match get_db_pool() {
        Ok(pool) => pool,
        Err(e) => {
            warn!("{}; using an in-memory database", e);
            create_in_memory_pool()?
        }
    };

    let client: Arc<dyn CompletionClient> = Arc::new(OpenRouterClient::from_env()?);
    info!("Completion model: {}", client.model());

    let health_service: HealthService = Arc::new(SystemHealthService::new(pool.clone(), client.clone()));
    let state = AppState::new(pool, client, config.reminder_backend)
        .with_environment(config.environment.clone());

    initialize_server_start_time();

    Ok(routes::create_app(state, health_service, &config.static_dir))
}
