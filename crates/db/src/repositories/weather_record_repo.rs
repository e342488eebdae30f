//! Repository for the `weather_records` table.
//!
//! Records are addressed through their location; callers verify location
//! ownership first.

use journey_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::weather_record::{CreateWeatherRecord, TemperatureRow, WeatherRecord};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, location_id, temperature, humidity, pressure, wind_speed, \
                       wind_direction, description, icon, recorded_at";

const INSERT: &str = "INSERT INTO weather_records
        (location_id, temperature, humidity, pressure, wind_speed, wind_direction,
         description, icon, recorded_at)
     VALUES ($1, $2, $3, $4, $5, $6, $7, $8, COALESCE($9, NOW()))";

/// Provides insert and query operations for weather observations.
pub struct WeatherRecordRepo;

impl WeatherRecordRepo {
    /// Insert one observation, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateWeatherRecord,
    ) -> Result<WeatherRecord, sqlx::Error> {
        let query = format!("{INSERT} RETURNING {COLUMNS}");
        sqlx::query_as::<_, WeatherRecord>(&query)
            .bind(input.location_id)
            .bind(input.temperature)
            .bind(input.humidity)
            .bind(input.pressure)
            .bind(input.wind_speed)
            .bind(input.wind_direction)
            .bind(&input.description)
            .bind(&input.icon)
            .bind(input.recorded_at)
            .fetch_one(pool)
            .await
    }

    /// Insert a batch inside one transaction. Either every row lands or none do.
    ///
    /// Returns the number of inserted rows.
    pub async fn create_batch(
        pool: &PgPool,
        inputs: &[CreateWeatherRecord],
    ) -> Result<u64, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let mut inserted = 0;
        for input in inputs {
            let result = sqlx::query(INSERT)
                .bind(input.location_id)
                .bind(input.temperature)
                .bind(input.humidity)
                .bind(input.pressure)
                .bind(input.wind_speed)
                .bind(input.wind_direction)
                .bind(&input.description)
                .bind(&input.icon)
                .bind(input.recorded_at)
                .execute(&mut *tx)
                .await?;
            inserted += result.rows_affected();
        }
        tx.commit().await?;
        Ok(inserted)
    }

    /// Observations for a location, newest first.
    pub async fn list_for_location(
        pool: &PgPool,
        location_id: DbId,
        limit: i64,
    ) -> Result<Vec<WeatherRecord>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM weather_records
             WHERE location_id = $1
             ORDER BY recorded_at DESC, id DESC
             LIMIT $2"
        );
        sqlx::query_as::<_, WeatherRecord>(&query)
            .bind(location_id)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Temperature samples for a location inside `[start, end]`, oldest first.
    pub async fn samples_between(
        pool: &PgPool,
        location_id: DbId,
        start: Timestamp,
        end: Timestamp,
    ) -> Result<Vec<TemperatureRow>, sqlx::Error> {
        sqlx::query_as::<_, TemperatureRow>(
            "SELECT recorded_at, temperature, description FROM weather_records
             WHERE location_id = $1 AND recorded_at BETWEEN $2 AND $3
             ORDER BY recorded_at",
        )
        .bind(location_id)
        .bind(start)
        .bind(end)
        .fetch_all(pool)
        .await
    }

    /// Every temperature sample recorded for a location, oldest first.
    pub async fn all_samples(
        pool: &PgPool,
        location_id: DbId,
    ) -> Result<Vec<TemperatureRow>, sqlx::Error> {
        sqlx::query_as::<_, TemperatureRow>(
            "SELECT recorded_at, temperature, description FROM weather_records
             WHERE location_id = $1
             ORDER BY recorded_at",
        )
        .bind(location_id)
        .fetch_all(pool)
        .await
    }
}
