//! Aggregate queries for the weather dashboard.

use journey_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::dashboard::{DashboardTotals, RecentWeather};
use crate::models::weather_record::TemperatureRow;

/// `latest`: one row per location of user `$1`, its most recent record.
const LATEST_PER_LOCATION: &str = "latest AS (
    SELECT DISTINCT ON (w.location_id)
           w.id, w.location_id, l.name AS location_name, w.temperature,
           w.description, w.icon, w.recorded_at
    FROM weather_records w
    JOIN locations l ON l.id = w.location_id
    WHERE l.user_id = $1
    ORDER BY w.location_id, w.recorded_at DESC, w.id DESC
)";

/// Read-only aggregates across a user's locations, people and weather.
pub struct DashboardRepo;

impl DashboardRepo {
    /// Entity counts for a user, plus the mean of each location's latest
    /// reading.
    pub async fn totals(pool: &PgPool, user_id: DbId) -> Result<DashboardTotals, sqlx::Error> {
        sqlx::query_as::<_, DashboardTotals>(&format!(
            "WITH {LATEST_PER_LOCATION}
             SELECT
                (SELECT COUNT(*) FROM locations WHERE user_id = $1) AS total_locations,
                (SELECT COUNT(*) FROM people WHERE user_id = $1) AS total_people,
                (SELECT COUNT(*) FROM person_visits v
                    JOIN people p ON p.id = v.person_id
                    WHERE p.user_id = $1) AS total_visits,
                (SELECT COUNT(*) FROM weather_records w
                    JOIN locations l ON l.id = w.location_id
                    WHERE l.user_id = $1) AS total_weather_records,
                (SELECT AVG(temperature) FROM latest) AS average_temperature"
        ))
        .bind(user_id)
        .fetch_one(pool)
        .await
    }

    /// The newest observation of each location, newest first.
    pub async fn recent_weather(
        pool: &PgPool,
        user_id: DbId,
        limit: i64,
    ) -> Result<Vec<RecentWeather>, sqlx::Error> {
        sqlx::query_as::<_, RecentWeather>(&format!(
            "WITH {LATEST_PER_LOCATION}
             SELECT id, location_id, location_name, temperature, description, icon, recorded_at
             FROM latest
             ORDER BY recorded_at DESC, id DESC
             LIMIT $2"
        ))
        .bind(user_id)
        .bind(limit)
        .fetch_all(pool)
        .await
    }

    /// Temperature samples across a user's locations recorded at or after `since`.
    pub async fn samples_since(
        pool: &PgPool,
        user_id: DbId,
        since: Timestamp,
    ) -> Result<Vec<TemperatureRow>, sqlx::Error> {
        sqlx::query_as::<_, TemperatureRow>(
            "SELECT w.recorded_at, w.temperature, w.description
             FROM weather_records w
             JOIN locations l ON l.id = w.location_id
             WHERE l.user_id = $1 AND w.recorded_at >= $2
             ORDER BY w.recorded_at",
        )
        .bind(user_id)
        .bind(since)
        .fetch_all(pool)
        .await
    }
}
