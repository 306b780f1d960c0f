use std::path::Path;
use axum::{
    routing::{delete, get, post},
    Extension, Router,
};
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use tracing::debug;

use crate::api::handlers::{
    api_status, calculate_bmi, chat, chat_page, complete_reminder, conversation_history,
    create_user, delete_reminder, get_topic, get_user, health::HealthService, health_check, index,
    legacy_chat, list_categories, list_health_data, list_reminders, record_health_data, search,
    set_reminder,
};
use crate::api::state::AppState;
use crate::openapi::configure_swagger_routes;

/// Create the application router
pub fn create_app(state: AppState, health_service: HealthService, static_dir: &Path) -> Router {
    debug!("Creating application router");

    // JSON endpoints under /api
    let api_routes = Router::new()
        .route("/status", get(api_status))
        .route("/chat", post(legacy_chat))
        .route("/conversations", get(conversation_history))
        .route("/set_reminder", post(set_reminder))
        .route("/reminders", get(list_reminders))
        .route("/reminders/:id", delete(delete_reminder))
        .route("/reminders/:id/complete", post(complete_reminder))
        .route("/knowledge", get(list_categories))
        .route("/knowledge/search", get(search))
        .route("/knowledge/:category/:topic", get(get_topic))
        .route("/bmi", post(calculate_bmi))
        .route("/health_data", get(list_health_data).post(record_health_data))
        .route("/users", post(create_user))
        .route("/users/:id", get(get_user));

    debug!("API routes configured");

    // Pages, the chat endpoint used by the front end, and the health check
    let public_routes = Router::new()
        .route("/", get(index))
        .route("/chatpage", get(chat_page))
        .route("/chat", post(chat))
        .route("/health", get(health_check))
        .layer(Extension(health_service));

    debug!("Public routes configured");

    let app = Router::new()
        .merge(public_routes)
        .nest("/api", api_routes)
        .with_state(state)
        .nest_service("/static", ServeDir::new(static_dir));

    let app = add_swagger_ui(app);
    debug!("Swagger UI merged");

    app.layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Add Swagger UI to the router
pub fn add_swagger_ui(app: Router) -> Router {
    app.merge(configure_swagger_routes())
}
