use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::utils::BmiCategory;

/// Measurement type under which computed BMI values are stored
pub const BMI_DATA_TYPE: &str = "bmi";

/// A recorded health measurement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthMeasurement {
    pub id: i64,
    pub user_id: i64,
    pub data_type: String,
    pub value: f64,
    pub unit: Option<String>,
    /// When the measurement was taken, server local time (`%Y-%m-%d %H:%M:%S`)
    pub recorded_at: String,
}

/// Request to record a health measurement
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RecordHealthDataRequest {
    /// Owner of the measurement
    pub user_id: i64,

    /// Kind of measurement, e.g. `weight` or `heart_rate`
    #[validate(length(min = 1, max = 50, message = "Type must be between 1 and 50 characters"))]
    pub data_type: String,

    /// Measured value
    pub value: f64,

    /// Optional unit, e.g. `kg`
    #[validate(length(max = 20, message = "Unit cannot exceed 20 characters"))]
    pub unit: Option<String>,

    /// When the measurement was taken; defaults to now
    pub recorded_at: Option<String>,
}

/// A computed body mass index
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BmiResult {
    pub bmi: f64,
    pub category: BmiCategory,
}
