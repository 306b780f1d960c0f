use async_trait::async_trait;
use tracing::debug;

use crate::database::DatabasePool;
use crate::models::health_data::{CreateHealthDataRequest, HealthDataEntry};
use super::errors::RepositoryError;

/// Repository trait for health measurements
#[async_trait]
pub trait HealthDataRepositoryTrait: Send + Sync {
    /// Store a measurement
    async fn record(&self, request: CreateHealthDataRequest) -> Result<HealthDataEntry, RepositoryError>;

    /// List a user's measurements, newest first, optionally of one type only
    async fn list(&self, user_id: i64, data_type: Option<String>, limit: usize) -> Result<Vec<HealthDataEntry>, RepositoryError>;
}

/// SQLite repository for health measurements
#[derive(Debug, Clone)]
pub struct HealthDataRepository {
    pool: DatabasePool,
}

impl HealthDataRepository {
    /// Create a new repository
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

fn map_entry(row: &rusqlite::Row<'_>) -> rusqlite::Result<HealthDataEntry> {
    Ok(HealthDataEntry {
        id: row.get(0)?,
        user_id: row.get(1)?,
        data_type: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
        value: row.get::<_, Option<f64>>(3)?.unwrap_or_default(),
        unit: row.get(4)?,
        recorded_at: row.get::<_, Option<String>>(5)?.unwrap_or_default(),
    })
}

#[async_trait]
impl HealthDataRepositoryTrait for HealthDataRepository {
    async fn record(&self, request: CreateHealthDataRequest) -> Result<HealthDataEntry, RepositoryError> {
        debug!("Recording {} measurement for user {}", request.data_type, request.user_id);

        let conn = self.pool.get_connection()?;
        conn.execute(
            "INSERT INTO health_data (user_id, type, value, unit, recorded_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            (
                request.user_id,
                &request.data_type,
                request.value,
                &request.unit,
                &request.recorded_at,
            ),
        )?;

        Ok(HealthDataEntry {
            id: conn.last_insert_rowid(),
            user_id: request.user_id,
            data_type: request.data_type,
            value: request.value,
            unit: request.unit,
            recorded_at: request.recorded_at,
        })
    }

    async fn list(&self, user_id: i64, data_type: Option<String>, limit: usize) -> Result<Vec<HealthDataEntry>, RepositoryError> {
        debug!("Listing health data for user {} (type={:?}, limit={})", user_id, data_type, limit);

        let conn = self.pool.get_connection()?;
        let mut stmt = conn.prepare(
            "SELECT id, user_id, type, value, unit, recorded_at
             FROM health_data
             WHERE user_id = ?1 AND (?2 IS NULL OR type = ?2)
             ORDER BY recorded_at DESC, id DESC
             LIMIT ?3"
        )?;

        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows = stmt.query_map((user_id, &data_type, limit), map_entry)?;

        let mut entries = Vec::new();
        for entry in rows {
            entries.push(entry?);
        }

        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::create_in_memory_pool;

    fn measurement(data_type: &str, value: f64, recorded_at: &str) -> CreateHealthDataRequest {
        CreateHealthDataRequest {
            user_id: 1,
            data_type: data_type.to_string(),
            value,
            unit: Some("kg".to_string()),
            recorded_at: recorded_at.to_string(),
        }
    }

    #[tokio::test]
    async fn test_record_and_list_newest_first() {
        let repo = HealthDataRepository::new(create_in_memory_pool().unwrap());

        repo.record(measurement("weight", 71.5, "2024-01-01 07:00:00")).await.unwrap();
        repo.record(measurement("weight", 70.9, "2024-01-08 07:00:00")).await.unwrap();

        let entries = repo.list(1, None, 10).await.unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].value, 70.9);
        assert_eq!(entries[0].unit.as_deref(), Some("kg"));
    }

    #[tokio::test]
    async fn test_list_filters_by_type_and_limit() {
        let repo = HealthDataRepository::new(create_in_memory_pool().unwrap());

        repo.record(measurement("weight", 71.5, "2024-01-01 07:00:00")).await.unwrap();
        repo.record(measurement("bmi", 23.1, "2024-01-02 07:00:00")).await.unwrap();
        repo.record(measurement("weight", 70.9, "2024-01-08 07:00:00")).await.unwrap();

        let weights = repo.list(1, Some("weight".to_string()), 10).await.unwrap();
        assert_eq!(weights.len(), 2);
        assert!(weights.iter().all(|e| e.data_type == "weight"));

        let latest = repo.list(1, None, 1).await.unwrap();
        assert_eq!(latest.len(), 1);
        assert_eq!(latest[0].recorded_at, "2024-01-08 07:00:00");
    }
}
