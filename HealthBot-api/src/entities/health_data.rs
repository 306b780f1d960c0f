use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Body of `POST /api/bmi`
#[derive(Debug, Deserialize, ToSchema)]
pub struct BmiRequest {
    pub weight_kg: f64,
    pub height_m: f64,

    /// When set, the result is also stored as a `bmi` measurement
    pub user_id: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BmiResponse {
    pub bmi: f64,
    /// Underweight, Normal weight, Overweight or Obese
    pub category: String,
}

/// Body of `POST /api/health_data`
#[derive(Debug, Deserialize, ToSchema)]
pub struct HealthDataRequest {
    /// Owner (default: 1)
    pub user_id: Option<i64>,

    /// Kind of measurement, e.g. `weight`
    #[serde(rename = "type")]
    pub data_type: String,

    pub value: f64,
    pub unit: Option<String>,

    /// When the measurement was taken (default: now)
    pub recorded_at: Option<String>,
}

/// Public representation of a measurement
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthDataResponse {
    pub id: i64,
    pub user_id: i64,
    #[serde(rename = "type")]
    pub data_type: String,
    pub value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    /// Server local time, `%Y-%m-%d %H:%M:%S`
    pub recorded_at: String,
}

/// Filters for listing measurements
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct HealthDataQuery {
    /// User id (default: 1)
    pub user_id: Option<i64>,

    /// Only this kind of measurement
    #[serde(rename = "type")]
    pub data_type: Option<String>,

    /// Maximum number of results (default: 50, max: 500)
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthDataListResponse {
    pub data: Vec<HealthDataResponse>,
}
