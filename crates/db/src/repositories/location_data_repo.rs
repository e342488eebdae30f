//! Read-only queries over the `countries`, `states` and `cities` tables.

use journey_core::types::DbId;
use sqlx::PgPool;

use crate::models::location_data::{City, Country, State};
use crate::repositories::contains_pattern;

const COUNTRY_COLUMNS: &str =
    "id, name, iso_code, iso_code_3, phone_code, currency, created_at, updated_at";
const STATE_COLUMNS: &str =
    "id, country_id, name, abbreviation, state_type, created_at, updated_at";
const CITY_COLUMNS: &str = "id, country_id, state_id, name, latitude, longitude, population, \
                            timezone, created_at, updated_at";

/// Maximum number of rows returned by [`LocationDataRepo::search_cities`].
pub const CITY_SEARCH_LIMIT: i64 = 10;

/// Lookups backing the location picker.
pub struct LocationDataRepo;

impl LocationDataRepo {
    /// All countries ordered by name.
    pub async fn countries(pool: &PgPool) -> Result<Vec<Country>, sqlx::Error> {
        let query = format!("SELECT {COUNTRY_COLUMNS} FROM countries ORDER BY name");
        sqlx::query_as::<_, Country>(&query).fetch_all(pool).await
    }

    /// States of a country ordered by name.
    pub async fn states_by_country(
        pool: &PgPool,
        country_id: DbId,
    ) -> Result<Vec<State>, sqlx::Error> {
        let query =
            format!("SELECT {STATE_COLUMNS} FROM states WHERE country_id = $1 ORDER BY name");
        sqlx::query_as::<_, State>(&query)
            .bind(country_id)
            .fetch_all(pool)
            .await
    }

    /// Cities of a country ordered by name.
    pub async fn cities_by_country(
        pool: &PgPool,
        country_id: DbId,
    ) -> Result<Vec<City>, sqlx::Error> {
        let query =
            format!("SELECT {CITY_COLUMNS} FROM cities WHERE country_id = $1 ORDER BY name");
        sqlx::query_as::<_, City>(&query)
            .bind(country_id)
            .fetch_all(pool)
            .await
    }

    /// Cities of one state of a country ordered by name.
    pub async fn cities_by_state(
        pool: &PgPool,
        country_id: DbId,
        state_id: DbId,
    ) -> Result<Vec<City>, sqlx::Error> {
        let query = format!(
            "SELECT {CITY_COLUMNS} FROM cities
             WHERE country_id = $1 AND state_id = $2
             ORDER BY name"
        );
        sqlx::query_as::<_, City>(&query)
            .bind(country_id)
            .bind(state_id)
            .fetch_all(pool)
            .await
    }

    /// Case-insensitive substring search on city name, at most
    /// [`CITY_SEARCH_LIMIT`] rows.
    pub async fn search_cities(pool: &PgPool, term: &str) -> Result<Vec<City>, sqlx::Error> {
        let query = format!(
            "SELECT {CITY_COLUMNS} FROM cities
             WHERE name ILIKE $1
             ORDER BY population DESC NULLS LAST, name
             LIMIT $2"
        );
        sqlx::query_as::<_, City>(&query)
            .bind(contains_pattern(term))
            .bind(CITY_SEARCH_LIMIT)
            .fetch_all(pool)
            .await
    }
}
