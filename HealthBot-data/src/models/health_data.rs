use serde::{Deserialize, Serialize};

/// Storage model for a health measurement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthDataEntry {
    /// Row id
    pub id: i64,

    /// Owner of the measurement
    pub user_id: i64,

    /// Kind of measurement (e.g. weight, bmi, heart_rate)
    pub data_type: String,

    /// Measured value
    pub value: f64,

    /// Optional unit of the value
    pub unit: Option<String>,

    /// When the measurement was taken (`%Y-%m-%d %H:%M:%S`)
    pub recorded_at: String,
}

/// Input data for storing a health measurement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateHealthDataRequest {
    pub user_id: i64,
    pub data_type: String,
    pub value: f64,
    pub unit: Option<String>,
    pub recorded_at: String,
}
