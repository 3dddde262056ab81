//! PostgreSQL implementation of MeasurementRepository.
//!
//! The measurement columns are generated from `BodyMeasurements::FIELDS`
//! so the SQL and the domain struct cannot drift apart.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use sqlx::postgres::PgRow;
use sqlx::types::Json;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use super::database_error;
use crate::domain::customer::{BodyMeasurements, Measurement};
use crate::domain::foundation::{DomainError, Timestamp, UserId};
use crate::ports::MeasurementRepository;

static SELECT_SQL: Lazy<String> = Lazy::new(|| {
    format!(
        "SELECT customer_id, {}, images, created_at, updated_at \
         FROM measurements WHERE customer_id = $1",
        BodyMeasurements::FIELDS.join(", ")
    )
});

static UPSERT_SQL: Lazy<String> = Lazy::new(|| {
    let fields = BodyMeasurements::FIELDS;
    let columns = fields.join(", ");
    // $1 is customer_id, the measurements follow, then images and timestamps.
    let placeholders = (2..fields.len() + 5)
        .map(|i| format!("${}", i))
        .collect::<Vec<_>>()
        .join(", ");
    let updates = fields
        .iter()
        .map(|f| format!("{f} = EXCLUDED.{f}"))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "INSERT INTO measurements (customer_id, {columns}, images, created_at, updated_at) \
         VALUES ($1, {placeholders}) \
         ON CONFLICT (customer_id) DO UPDATE SET {updates}, \
         images = EXCLUDED.images, updated_at = EXCLUDED.updated_at"
    )
});

#[derive(Clone)]
pub struct PostgresMeasurementRepository {
    pool: PgPool,
}

impl PostgresMeasurementRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn measurement_from_row(row: &PgRow) -> Result<Measurement, sqlx::Error> {
    let mut values = BodyMeasurements::default();
    for field in BodyMeasurements::FIELDS {
        values.set(field, row.try_get::<Option<f64>, _>(*field)?);
    }
    let customer_id: Uuid = row.try_get("customer_id")?;
    let images: Json<Vec<String>> = row.try_get("images")?;
    let created_at: DateTime<Utc> = row.try_get("created_at")?;
    let updated_at: DateTime<Utc> = row.try_get("updated_at")?;

    Ok(Measurement {
        customer_id: UserId::from_uuid(customer_id),
        values,
        images: images.0,
        created_at: Timestamp::from_datetime(created_at),
        updated_at: Timestamp::from_datetime(updated_at),
    })
}

#[async_trait]
impl MeasurementRepository for PostgresMeasurementRepository {
    async fn find_by_customer(
        &self,
        customer_id: &UserId,
    ) -> Result<Option<Measurement>, DomainError> {
        let row = sqlx::query(SELECT_SQL.as_str())
            .bind(customer_id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| database_error("find measurement", e))?;

        row.as_ref()
            .map(measurement_from_row)
            .transpose()
            .map_err(|e| database_error("decode measurement", e))
    }

    async fn upsert(&self, measurement: &Measurement) -> Result<(), DomainError> {
        let mut query = sqlx::query(UPSERT_SQL.as_str()).bind(measurement.customer_id.as_uuid());
        for (_, value) in measurement.values.values() {
            query = query.bind(value);
        }
        query
            .bind(Json(&measurement.images))
            .bind(measurement.created_at.as_datetime())
            .bind(measurement.updated_at.as_datetime())
            .execute(&self.pool)
            .await
            .map_err(|e| database_error("upsert measurement", e))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upsert_sql_has_one_placeholder_per_column() {
        let columns = BodyMeasurements::FIELDS.len() + 4;
        assert!(UPSERT_SQL.contains(&format!("${}", columns)));
        assert!(!UPSERT_SQL.contains(&format!("${}", columns + 1)));
    }

    #[test]
    fn upsert_sql_updates_every_measurement() {
        for field in BodyMeasurements::FIELDS {
            assert!(UPSERT_SQL.contains(&format!("{f} = EXCLUDED.{f}", f = field)));
        }
    }

    #[test]
    fn select_sql_reads_every_measurement() {
        assert!(SELECT_SQL.contains("round_head"));
        assert!(SELECT_SQL.contains("inseam"));
    }
}
