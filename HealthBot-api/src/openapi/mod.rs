use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Configure Swagger UI endpoints
pub fn configure_swagger_routes() -> SwaggerUi {
    SwaggerUi::new("/api-docs")
        .url("/api-docs/openapi.json", ApiDoc::openapi())
}

// API Documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health endpoints
        crate::api::handlers::health::health_check,
        crate::api::handlers::health::api_status,

        // Chat endpoints
        crate::api::handlers::chat::chat,
        crate::api::handlers::chat::legacy_chat,
        crate::api::handlers::chat::conversation_history,

        // Reminder endpoints
        crate::api::handlers::reminders::set_reminder,
        crate::api::handlers::reminders::list_reminders,
        crate::api::handlers::reminders::delete_reminder,
        crate::api::handlers::reminders::complete_reminder,

        // Knowledge base endpoints
        crate::api::handlers::knowledge::get_topic,
        crate::api::handlers::knowledge::search,
        crate::api::handlers::knowledge::list_categories,

        // Health data endpoints
        crate::api::handlers::health_data::calculate_bmi,
        crate::api::handlers::health_data::record_health_data,
        crate::api::handlers::health_data::list_health_data,

        // User endpoints
        crate::api::handlers::users::create_user,
        crate::api::handlers::users::get_user
    ),
    components(
        schemas(
            crate::entities::common::ErrorResponse,
            crate::entities::chat::ChatMessageRequest,
            crate::entities::chat::ChatMessageResponse,
            crate::entities::chat::LegacyChatResponse,
            crate::entities::chat::ChatErrorResponse,
            crate::entities::chat::HistoryEntryResponse,
            crate::entities::chat::HistoryResponse,
            crate::entities::reminders::SetReminderRequest,
            crate::entities::reminders::ReminderActionResponse,
            crate::entities::reminders::ReminderResponse,
            crate::entities::reminders::ReminderListResponse,
            crate::entities::knowledge::TopicResponse,
            crate::entities::knowledge::SearchHit,
            crate::entities::knowledge::SearchResponse,
            crate::entities::knowledge::CategoriesResponse,
            crate::entities::health_data::BmiRequest,
            crate::entities::health_data::BmiResponse,
            crate::entities::health_data::HealthDataRequest,
            crate::entities::health_data::HealthDataResponse,
            crate::entities::health_data::HealthDataListResponse,
            crate::entities::users::CreateUserBody,
            crate::entities::users::UserResponse,

            // Health handlers
            crate::api::handlers::health::StatusResponse,
            crate::api::handlers::health::HealthResponse,
            crate::api::handlers::health::ComponentHealthStatus
        )
    ),
    tags(
        (name = "health", description = "Liveness and health check endpoints"),
        (name = "chat", description = "Health assistant chat"),
        (name = "reminders", description = "Reminder management"),
        (name = "knowledge", description = "Static health recommendations"),
        (name = "health_data", description = "Health measurements and BMI"),
        (name = "users", description = "User registration")
    ),
    info(
        title = "Health Bot API",
        version = "0.1.0",
        description = "Health assistant chat backend with reminders and a wellness knowledge base",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        ),
    ),
    servers(
        (url = "/", description = "Local development server")
    )
)]
pub struct ApiDoc;
