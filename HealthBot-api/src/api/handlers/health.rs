use std::collections::BTreeMap;
use std::sync::{Arc, Once};
use std::time::{SystemTime, UNIX_EPOCH};
use axum::{extract::State, http::StatusCode, response::IntoResponse, Extension, Json};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use utoipa::ToSchema;

use health_bot_domain::health::{ComponentStatus as DomainComponentStatus, HealthServiceTrait, SystemStatus};

use crate::api::state::AppState;

/// Message returned by the liveness endpoint
pub const STATUS_MESSAGE: &str = "✅ Health Bot REST API is live!";

/// Liveness response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StatusResponse {
    /// Always "running"
    pub status: String,
    pub message: String,
}

/// Health check response model with system information
#[derive(Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Current service status ("ok", "degraded", or "error")
    pub status: String,
    /// Current application version from Cargo manifest
    pub version: String,
    /// Timestamp of when the response was generated
    pub timestamp: u64,
    /// Uptime of the service in seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uptime: Option<u64>,
    /// Status of each component, by name
    pub components: BTreeMap<String, ComponentHealthStatus>,
    /// Environment information
    pub environment: String,
}

/// Health status for an individual component
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ComponentHealthStatus {
    /// Status of the component ("ok", "degraded", or "error")
    pub status: String,
    /// Optional message with more details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Health service handle injected into the router
pub type HealthService = Arc<dyn HealthServiceTrait>;

// Track the time when the server started using a thread-safe OnceCell
static SERVER_START_TIME: OnceCell<u64> = OnceCell::new();
static INIT: Once = Once::new();

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Initialize the server start time
pub fn initialize_server_start_time() {
    INIT.call_once(|| {
        let _ = SERVER_START_TIME.set(unix_now());
    });
}

/// Liveness probe used by uptime monitors
#[utoipa::path(
    get,
    path = "/api/status",
    responses(
        (status = 200, description = "API is running", body = StatusResponse)
    ),
    tag = "health"
)]
pub async fn api_status() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "running".to_string(),
        message: STATUS_MESSAGE.to_string(),
    })
}

/// Health check endpoint reporting on the database and the completion API
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "API is healthy", body = HealthResponse),
        (status = 500, description = "API is not healthy", body = HealthResponse),
        (status = 503, description = "API is degraded", body = HealthResponse)
    ),
    tag = "health"
)]
#[instrument(skip(state, health_service))]
pub async fn health_check(
    State(state): State<AppState>,
    Extension(health_service): Extension<HealthService>,
) -> impl IntoResponse {
    info!("Health check requested");

    let now = unix_now();
    let uptime = SERVER_START_TIME.get().map(|&start_time| now.saturating_sub(start_time));

    let system_health = health_service.get_system_health().await;

    let (overall_status, status_code) = match system_health.status {
        SystemStatus::Healthy => ("ok", StatusCode::OK),
        SystemStatus::Degraded => ("degraded", StatusCode::SERVICE_UNAVAILABLE),
        SystemStatus::Unhealthy => ("error", StatusCode::INTERNAL_SERVER_ERROR),
    };

    let components = system_health
        .components
        .into_iter()
        .map(|(name, component)| {
            (
                name,
                ComponentHealthStatus {
                    status: map_component_status(&component.status),
                    message: component.details,
                },
            )
        })
        .collect();

    let response = HealthResponse {
        status: overall_status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: now,
        uptime,
        components,
        environment: state.environment.clone(),
    };

    (status_code, Json(response))
}

/// Map domain component status to API status string
fn map_component_status(status: &DomainComponentStatus) -> String {
    match status {
        DomainComponentStatus::Healthy => "ok",
        DomainComponentStatus::Degraded => "degraded",
        DomainComponentStatus::Unhealthy => "error",
    }
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use health_bot_data::database::create_in_memory_pool;
    use health_bot_domain::testing::{MockCompletionClient, MockHealthService};

    use crate::config::ReminderBackend;

    fn state() -> AppState {
        AppState::new(
            create_in_memory_pool().unwrap(),
            Arc::new(MockCompletionClient::new()),
            ReminderBackend::Database,
        )
    }

    async fn check_with(state: AppState, service: MockHealthService) -> (StatusCode, serde_json::Value) {
        initialize_server_start_time();
        let health_service: HealthService = Arc::new(service);

        let response = health_check(State(state), Extension(health_service)).await.into_response();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    async fn check(service: MockHealthService) -> (StatusCode, serde_json::Value) {
        check_with(state(), service).await
    }

    #[tokio::test]
    async fn test_health_check_healthy() {
        let (status, body) = check(MockHealthService::new()).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["components"]["database"]["status"], "ok");
        assert!(body["uptime"].is_u64());
        assert_eq!(body["environment"], "development");
    }

    #[tokio::test]
    async fn test_health_check_reports_configured_environment() {
        let (_, body) = check_with(state().with_environment("production"), MockHealthService::new()).await;

        assert_eq!(body["environment"], "production");
    }

    #[tokio::test]
    async fn test_health_check_degraded_component() {
        let service = MockHealthService::new().with_component(
            "completion_api",
            DomainComponentStatus::Degraded,
            Some("no key".to_string()),
        );
        let (status, body) = check(service).await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["components"]["completion_api"]["message"], "no key");
    }

    #[tokio::test]
    async fn test_health_check_unhealthy_database() {
        let (status, body) = check(MockHealthService::new().with_unhealthy_database()).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["status"], "error");
    }

    #[tokio::test]
    async fn test_api_status() {
        let Json(status) = api_status().await;
        assert_eq!(status.status, "running");
        assert_eq!(status.message, STATUS_MESSAGE);
    }
}
