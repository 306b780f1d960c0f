use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use tracing::{error, instrument, warn};

use health_bot_domain::entities::{HealthMeasurement, RecordHealthDataRequest, DEFAULT_USER_ID};
use health_bot_domain::services::health_data::compute_bmi;
use health_bot_domain::services::HealthDataServiceError;

use crate::api::state::AppState;
use crate::entities::health_data::{
    BmiRequest, BmiResponse, HealthDataListResponse, HealthDataQuery, HealthDataRequest,
    HealthDataResponse,
};
use crate::entities::ErrorResponse;

fn map_service_error(err: HealthDataServiceError) -> ErrorResponse {
    match err {
        HealthDataServiceError::ValidationError(msg) => {
            warn!("Invalid health data: {}", msg);
            ErrorResponse::validation_error(&msg, None)
        }
        HealthDataServiceError::RepositoryError(msg) => {
            error!("Health data storage failed: {}", msg);
            ErrorResponse::internal_error()
        }
    }
}

fn convert_to_public_measurement(measurement: HealthMeasurement) -> HealthDataResponse {
    HealthDataResponse {
        id: measurement.id,
        user_id: measurement.user_id,
        data_type: measurement.data_type,
        value: measurement.value,
        unit: measurement.unit,
        recorded_at: measurement.recorded_at,
    }
}

/// Compute a body mass index, storing it when a user is given
#[utoipa::path(
    post,
    path = "/api/bmi",
    request_body = BmiRequest,
    responses(
        (status = 200, description = "BMI and category", body = BmiResponse),
        (status = 400, description = "Non-positive height or weight", body = ErrorResponse),
    ),
    tag = "health_data"
)]
#[instrument(skip(state))]
pub async fn calculate_bmi(
    State(state): State<AppState>,
    Json(request): Json<BmiRequest>,
) -> Result<Json<BmiResponse>, ErrorResponse> {
    let result = match request.user_id {
        Some(user_id) => state
            .health_data
            .record_bmi(user_id, request.weight_kg, request.height_m)
            .await,
        None => compute_bmi(request.weight_kg, request.height_m),
    }
    .map_err(map_service_error)?;

    Ok(Json(BmiResponse {
        bmi: result.bmi,
        category: result.category.to_string(),
    }))
}

/// Record a health measurement
#[utoipa::path(
    post,
    path = "/api/health_data",
    request_body = HealthDataRequest,
    responses(
        (status = 201, description = "Measurement stored", body = HealthDataResponse),
        (status = 400, description = "Invalid measurement", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "health_data"
)]
#[instrument(skip(state, request))]
pub async fn record_health_data(
    State(state): State<AppState>,
    Json(request): Json<HealthDataRequest>,
) -> Result<(StatusCode, Json<HealthDataResponse>), ErrorResponse> {
    let measurement = state
        .health_data
        .record(RecordHealthDataRequest {
            user_id: request.user_id.unwrap_or(DEFAULT_USER_ID),
            data_type: request.data_type,
            value: request.value,
            unit: request.unit,
            recorded_at: request.recorded_at,
        })
        .await
        .map_err(map_service_error)?;

    Ok((StatusCode::CREATED, Json(convert_to_public_measurement(measurement))))
}

/// List a user's measurements, newest first
#[utoipa::path(
    get,
    path = "/api/health_data",
    params(HealthDataQuery),
    responses(
        (status = 200, description = "Measurements", body = HealthDataListResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "health_data"
)]
#[instrument(skip(state))]
pub async fn list_health_data(
    State(state): State<AppState>,
    Query(query): Query<HealthDataQuery>,
) -> Result<Json<HealthDataListResponse>, ErrorResponse> {
    let measurements = state
        .health_data
        .list(query.user_id.unwrap_or(DEFAULT_USER_ID), query.data_type, query.limit)
        .await
        .map_err(map_service_error)?;

    Ok(Json(HealthDataListResponse {
        data: measurements.into_iter().map(convert_to_public_measurement).collect(),
    }))
}
