//! Repository for the `person_visits` table.
//!
//! Visits are addressed through their person; callers verify the person
//! belongs to the requesting user before calling in.

use journey_core::types::DbId;
use sqlx::PgPool;

use crate::models::visit::{CreateVisit, UpdateVisit, Visit, VisitWithLocation};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, person_id, location_id, start_date, end_date, notes, created_at, updated_at";

/// Provides CRUD operations for visits.
pub struct VisitRepo;

impl VisitRepo {
    /// Insert a visit for `person_id`, returning the created row.
    pub async fn create(
        pool: &PgPool,
        person_id: DbId,
        input: &CreateVisit,
    ) -> Result<Visit, sqlx::Error> {
        let query = format!(
            "INSERT INTO person_visits (person_id, location_id, start_date, end_date, notes)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Visit>(&query)
            .bind(person_id)
            .bind(input.location_id)
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(&input.notes)
            .fetch_one(pool)
            .await
    }

    /// Find one of a person's visits by ID.
    pub async fn find_by_id(
        pool: &PgPool,
        person_id: DbId,
        id: DbId,
    ) -> Result<Option<Visit>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM person_visits WHERE id = $1 AND person_id = $2");
        sqlx::query_as::<_, Visit>(&query)
            .bind(id)
            .bind(person_id)
            .fetch_optional(pool)
            .await
    }

    /// All visits of a person, newest first.
    pub async fn list_for_person(
        pool: &PgPool,
        person_id: DbId,
    ) -> Result<Vec<Visit>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM person_visits
             WHERE person_id = $1
             ORDER BY start_date DESC, id DESC"
        );
        sqlx::query_as::<_, Visit>(&query)
            .bind(person_id)
            .fetch_all(pool)
            .await
    }

    /// All visits of a person with their location labels, newest first.
    pub async fn list_with_location(
        pool: &PgPool,
        person_id: DbId,
    ) -> Result<Vec<VisitWithLocation>, sqlx::Error> {
        sqlx::query_as::<_, VisitWithLocation>(
            "SELECT v.id, v.person_id, v.location_id, v.start_date, v.end_date, v.notes,
                    v.created_at, v.updated_at,
                    l.name AS location_name, l.city AS location_city,
                    l.country AS location_country
             FROM person_visits v
             JOIN locations l ON l.id = v.location_id
             WHERE v.person_id = $1
             ORDER BY v.start_date DESC, v.id DESC",
        )
        .bind(person_id)
        .fetch_all(pool)
        .await
    }

    /// Update a visit. Only fields present in `input` are applied; a present
    /// but empty `end_date` clears the column.
    ///
    /// Returns `None` if no such visit exists for the person.
    pub async fn update(
        pool: &PgPool,
        person_id: DbId,
        id: DbId,
        input: &UpdateVisit,
    ) -> Result<Option<Visit>, sqlx::Error> {
        let query = format!(
            "UPDATE person_visits SET
                location_id = COALESCE($3, location_id),
                start_date = COALESCE($4, start_date),
                end_date = CASE WHEN $5 THEN $6 ELSE end_date END,
                notes = COALESCE($7, notes)
             WHERE id = $1 AND person_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Visit>(&query)
            .bind(id)
            .bind(person_id)
            .bind(input.location_id)
            .bind(input.start_date)
            .bind(input.end_date.is_some())
            .bind(input.end_date.flatten())
            .bind(&input.notes)
            .fetch_optional(pool)
            .await
    }

    /// Delete exactly one visit. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, person_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM person_visits WHERE id = $1 AND person_id = $2")
            .bind(id)
            .bind(person_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
