//! Repository for the `people` table.

use journey_core::types::DbId;
use sqlx::PgPool;

use crate::models::person::{CreatePerson, Person, PersonSummary, UpdatePerson};
use crate::repositories::contains_pattern;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, first_name, last_name, birth_date, home_location_id, \
                       notes, created_at, updated_at";

/// Correlated count of a person's visits, aliased for [`PersonSummary`].
const VISIT_COUNT: &str =
    "(SELECT COUNT(*) FROM person_visits v WHERE v.person_id = people.id) AS visit_count";

/// Provides CRUD operations for tracked people.
pub struct PersonRepo;

impl PersonRepo {
    /// Insert a new person owned by `user_id`, returning the created row.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreatePerson,
    ) -> Result<Person, sqlx::Error> {
        let query = format!(
            "INSERT INTO people (user_id, first_name, last_name, birth_date, home_location_id, notes)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Person>(&query)
            .bind(user_id)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(input.birth_date)
            .bind(input.home_location_id)
            .bind(&input.notes)
            .fetch_one(pool)
            .await
    }

    /// Find a person by ID, scoped to its owner.
    pub async fn find_by_id(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
    ) -> Result<Option<Person>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM people WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, Person>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// List a user's people with their visit counts, ordered by name.
    pub async fn list(pool: &PgPool, user_id: DbId) -> Result<Vec<PersonSummary>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS}, {VISIT_COUNT} FROM people
             WHERE user_id = $1
             ORDER BY last_name, first_name, id"
        );
        sqlx::query_as::<_, PersonSummary>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Case-insensitive substring search over first, last and full name.
    pub async fn search(
        pool: &PgPool,
        user_id: DbId,
        term: &str,
    ) -> Result<Vec<PersonSummary>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS}, {VISIT_COUNT} FROM people
             WHERE user_id = $1
               AND (first_name ILIKE $2
                    OR last_name ILIKE $2
                    OR (first_name || ' ' || last_name) ILIKE $2)
             ORDER BY last_name, first_name, id"
        );
        sqlx::query_as::<_, PersonSummary>(&query)
            .bind(user_id)
            .bind(contains_pattern(term))
            .fetch_all(pool)
            .await
    }

    /// Update a person. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if the person does not exist or belongs to another user.
    pub async fn update(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
        input: &UpdatePerson,
    ) -> Result<Option<Person>, sqlx::Error> {
        let query = format!(
            "UPDATE people SET
                first_name = COALESCE($3, first_name),
                last_name = COALESCE($4, last_name),
                birth_date = CASE WHEN $5 THEN $6 ELSE birth_date END,
                home_location_id = CASE WHEN $7 THEN $8 ELSE home_location_id END,
                notes = COALESCE($9, notes)
             WHERE id = $1 AND user_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Person>(&query)
            .bind(id)
            .bind(user_id)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(input.birth_date.is_some())
            .bind(input.birth_date.flatten())
            .bind(input.home_location_id.is_some())
            .bind(input.home_location_id.flatten())
            .bind(&input.notes)
            .fetch_optional(pool)
            .await
    }

    /// Delete a person and, by cascade, their visits. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, user_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM people WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
