//! Repository for the `locations` table.

use journey_core::types::DbId;
use sqlx::PgPool;

use crate::models::location::{CreateLocation, Location, LocationStats, UpdateLocation};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, user_id, name, city, country, latitude, longitude, notes, created_at, updated_at";

/// Provides CRUD operations for locations.
pub struct LocationRepo;

impl LocationRepo {
    /// Insert a new location owned by `user_id`, returning the created row.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateLocation,
    ) -> Result<Location, sqlx::Error> {
        let query = format!(
            "INSERT INTO locations (user_id, name, city, country, latitude, longitude, notes)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Location>(&query)
            .bind(user_id)
            .bind(&input.name)
            .bind(&input.city)
            .bind(&input.country)
            .bind(input.latitude)
            .bind(input.longitude)
            .bind(&input.notes)
            .fetch_one(pool)
            .await
    }

    /// Find a location by ID, scoped to its owner.
    pub async fn find_by_id(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
    ) -> Result<Option<Location>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM locations WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, Location>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// List a user's locations, most recently created first.
    pub async fn list(pool: &PgPool, user_id: DbId) -> Result<Vec<Location>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM locations WHERE user_id = $1 ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Location>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Update a location. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if the location does not exist or belongs to another user.
    pub async fn update(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
        input: &UpdateLocation,
    ) -> Result<Option<Location>, sqlx::Error> {
        let query = format!(
            "UPDATE locations SET
                name = COALESCE($3, name),
                city = COALESCE($4, city),
                country = COALESCE($5, country),
                latitude = COALESCE($6, latitude),
                longitude = COALESCE($7, longitude),
                notes = COALESCE($8, notes)
             WHERE id = $1 AND user_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Location>(&query)
            .bind(id)
            .bind(user_id)
            .bind(&input.name)
            .bind(&input.city)
            .bind(&input.country)
            .bind(input.latitude)
            .bind(input.longitude)
            .bind(&input.notes)
            .fetch_optional(pool)
            .await
    }

    /// Delete a location. Returns `true` if a row was removed.
    ///
    /// Fails with a foreign-key violation while any visit references it.
    pub async fn delete(pool: &PgPool, user_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM locations WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Location, country and city counts for a user.
    ///
    /// Countries and cities are counted case-insensitively.
    pub async fn stats(pool: &PgPool, user_id: DbId) -> Result<LocationStats, sqlx::Error> {
        sqlx::query_as::<_, LocationStats>(
            "SELECT COUNT(*) AS total_locations,
                    COUNT(DISTINCT LOWER(country)) AS countries_visited,
                    COUNT(DISTINCT LOWER(city) || '|' || LOWER(country)) AS cities_visited
             FROM locations
             WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_one(pool)
        .await
    }
}
