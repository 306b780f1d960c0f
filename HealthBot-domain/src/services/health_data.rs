use async_trait::async_trait;
use chrono::Local;
use thiserror::Error;
use tracing::{debug, instrument};
use validator::Validate;

use health_bot_data::database::DatabasePool;
use health_bot_data::models::CreateHealthDataRequest;
use health_bot_data::repository::{HealthDataRepository, HealthDataRepositoryTrait, RepositoryError};

use crate::entities::conversions;
use crate::entities::{BmiResult, HealthMeasurement, RecordHealthDataRequest, BMI_DATA_TYPE};
use crate::utils::{calculate_bmi, get_bmi_category, parse_time, to_storage_string};
use super::describe_validation_errors;

/// Unit stored alongside computed BMI values
pub const BMI_UNIT: &str = "kg/m²";

/// Default and maximum number of measurements returned by a listing
pub const DEFAULT_LIST_LIMIT: usize = 50;
pub const MAX_LIST_LIMIT: usize = 500;

/// Health data service errors
#[derive(Debug, Error)]
pub enum HealthDataServiceError {
    /// Validation error
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Repository error
    #[error("Repository error: {0}")]
    RepositoryError(String),
}

impl From<RepositoryError> for HealthDataServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Validation(msg) => HealthDataServiceError::ValidationError(msg),
            RepositoryError::Constraint(_) => {
                HealthDataServiceError::ValidationError("Unknown user".to_string())
            }
            other => HealthDataServiceError::RepositoryError(other.to_string()),
        }
    }
}

/// Compute a BMI and its category without storing anything
pub fn compute_bmi(weight_kg: f64, height_m: f64) -> Result<BmiResult, HealthDataServiceError> {
    if !weight_kg.is_finite() || weight_kg <= 0.0 {
        return Err(HealthDataServiceError::ValidationError(
            "Weight must be a positive number".to_string(),
        ));
    }

    let bmi = calculate_bmi(weight_kg, height_m).ok_or_else(|| {
        HealthDataServiceError::ValidationError("Height must be greater than zero".to_string())
    })?;

    Ok(BmiResult {
        bmi,
        category: get_bmi_category(bmi),
    })
}

/// Trait for health measurement operations
#[async_trait]
pub trait HealthDataServiceTrait: Send + Sync {
    /// Store a measurement
    async fn record(&self, request: RecordHealthDataRequest) -> Result<HealthMeasurement, HealthDataServiceError>;

    /// Measurements of a user, newest first, optionally of one type
    async fn list(
        &self,
        user_id: i64,
        data_type: Option<String>,
        limit: Option<usize>,
    ) -> Result<Vec<HealthMeasurement>, HealthDataServiceError>;

    /// Compute a BMI and store it as a `bmi` measurement
    async fn record_bmi(&self, user_id: i64, weight_kg: f64, height_m: f64) -> Result<BmiResult, HealthDataServiceError>;
}

/// Health data service over any health data repository
pub struct HealthDataService<R: HealthDataRepositoryTrait> {
    repository: R,
}

impl<R: HealthDataRepositoryTrait> HealthDataService<R> {
    /// Create a new health data service
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    fn validate_request(&self, request: &RecordHealthDataRequest) -> Result<(), HealthDataServiceError> {
        request
            .validate()
            .map_err(|e| HealthDataServiceError::ValidationError(describe_validation_errors(&e)))?;

        if request.data_type.trim().is_empty() {
            return Err(HealthDataServiceError::ValidationError(
                "data_type: Type must be between 1 and 50 characters".to_string(),
            ));
        }

        if !request.value.is_finite() {
            return Err(HealthDataServiceError::ValidationError(
                "value: Value must be a finite number".to_string(),
            ));
        }

        Ok(())
    }
}

#[async_trait]
impl<R: HealthDataRepositoryTrait> HealthDataServiceTrait for HealthDataService<R> {
    #[instrument(skip(self, request), fields(user_id = request.user_id, data_type = %request.data_type))]
    async fn record(&self, request: RecordHealthDataRequest) -> Result<HealthMeasurement, HealthDataServiceError> {
        self.validate_request(&request)?;

        let recorded_at = match request.recorded_at.as_deref().map(str::trim) {
            None | Some("") => to_storage_string(&Local::now().naive_local()),
            Some(raw) => {
                let parsed = parse_time(raw).ok_or_else(|| {
                    HealthDataServiceError::ValidationError(format!(
                        "recorded_at: Could not understand the time '{}'",
                        raw
                    ))
                })?;
                to_storage_string(&parsed)
            }
        };

        let entry = self
            .repository
            .record(CreateHealthDataRequest {
                user_id: request.user_id,
                data_type: request.data_type.trim().to_lowercase(),
                value: request.value,
                unit: request.unit.map(|u| u.trim().to_string()).filter(|u| !u.is_empty()),
                recorded_at,
            })
            .await?;

        debug!(id = entry.id, "Health measurement stored");
        Ok(conversions::convert_to_domain_measurement(entry))
    }

    async fn list(
        &self,
        user_id: i64,
        data_type: Option<String>,
        limit: Option<usize>,
    ) -> Result<Vec<HealthMeasurement>, HealthDataServiceError> {
        let data_type = data_type
            .map(|t| t.trim().to_lowercase())
            .filter(|t| !t.is_empty());
        let limit = limit.unwrap_or(DEFAULT_LIST_LIMIT).min(MAX_LIST_LIMIT);

        let entries = self.repository.list(user_id, data_type, limit).await?;

        Ok(entries
            .into_iter()
            .map(conversions::convert_to_domain_measurement)
            .collect())
    }

    async fn record_bmi(&self, user_id: i64, weight_kg: f64, height_m: f64) -> Result<BmiResult, HealthDataServiceError> {
        let result = compute_bmi(weight_kg, height_m)?;

        self.record(RecordHealthDataRequest {
            user_id,
            data_type: BMI_DATA_TYPE.to_string(),
            value: result.bmi,
            unit: Some(BMI_UNIT.to_string()),
            recorded_at: None,
        })
        .await?;

        Ok(result)
    }
}

/// Create a health data service on the given pool
pub fn create_health_data_service(pool: DatabasePool) -> impl HealthDataServiceTrait {
    HealthDataService::new(HealthDataRepository::new(pool))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::BmiCategory;
    use health_bot_data::database::create_in_memory_pool;
    use health_bot_data::models::HealthDataEntry;

    fn service() -> impl HealthDataServiceTrait {
        create_health_data_service(create_in_memory_pool().unwrap())
    }

    fn measurement(data_type: &str, value: f64, recorded_at: Option<&str>) -> RecordHealthDataRequest {
        RecordHealthDataRequest {
            user_id: 1,
            data_type: data_type.to_string(),
            value,
            unit: Some("kg".to_string()),
            recorded_at: recorded_at.map(str::to_string),
        }
    }

    #[test]
    fn test_compute_bmi() {
        let result = compute_bmi(70.0, 1.75).unwrap();
        assert!((result.bmi - 22.86).abs() < 0.01);
        assert_eq!(result.category, BmiCategory::NormalWeight);

        assert!(compute_bmi(70.0, 0.0).is_err());
        assert!(compute_bmi(-5.0, 1.8).is_err());
    }

    #[tokio::test]
    async fn test_record_and_filter() {
        let service = service();

        service.record(measurement("Weight", 80.5, Some("2024-01-01 08:00"))).await.unwrap();
        service.record(measurement("weight", 80.0, Some("2024-02-01 08:00"))).await.unwrap();
        service.record(measurement("heart_rate", 62.0, None)).await.unwrap();

        let weights = service.list(1, Some("WEIGHT".to_string()), None).await.unwrap();
        assert_eq!(weights.len(), 2);
        assert_eq!(weights[0].value, 80.0);
        assert_eq!(weights[0].recorded_at, "2024-02-01 08:00:00");

        let all = service.list(1, None, Some(2)).await.unwrap();
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn test_record_rejects_invalid_values() {
        let service = service();

        assert!(service.record(measurement("  ", 1.0, None)).await.is_err());
        assert!(service.record(measurement("weight", f64::NAN, None)).await.is_err());
        assert!(service.record(measurement("weight", 70.0, Some("last week"))).await.is_err());

        let mut unknown_user = measurement("weight", 70.0, None);
        unknown_user.user_id = 404;
        assert!(matches!(
            service.record(unknown_user).await,
            Err(HealthDataServiceError::ValidationError(_))
        ));
    }

    #[tokio::test]
    async fn test_record_bmi_stores_measurement() {
        let service = service();

        let result = service.record_bmi(1, 95.0, 1.70).await.unwrap();
        assert_eq!(result.category, BmiCategory::Obese);

        let stored = service.list(1, Some(BMI_DATA_TYPE.to_string()), None).await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].unit.as_deref(), Some(BMI_UNIT));
        assert!((stored[0].value - result.bmi).abs() < f64::EPSILON);
    }

    /// Repository that only remembers the limits it was asked for
    #[derive(Default)]
    struct LimitRecorder {
        limits: std::sync::Mutex<Vec<usize>>,
    }

    #[async_trait]
    impl HealthDataRepositoryTrait for LimitRecorder {
        async fn record(&self, _request: CreateHealthDataRequest) -> Result<HealthDataEntry, RepositoryError> {
            Err(RepositoryError::Validation("read-only".to_string()))
        }

        async fn list(&self, _user_id: i64, _data_type: Option<String>, limit: usize) -> Result<Vec<HealthDataEntry>, RepositoryError> {
            self.limits.lock()?.push(limit);
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn test_list_limit_defaults_and_cap() {
        let service = HealthDataService::new(LimitRecorder::default());

        service.list(1, None, None).await.unwrap();
        service.list(1, None, Some(10_000)).await.unwrap();
        service.list(1, None, Some(3)).await.unwrap();

        let limits = service.repository.limits.lock().unwrap().clone();
        assert_eq!(limits, vec![DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT, 3]);
    }
}
