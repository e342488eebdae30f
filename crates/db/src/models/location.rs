//! Location entity model and DTOs.

use journey_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A location row from the `locations` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Location {
    pub id: DbId,
    pub user_id: DbId,
    pub name: String,
    pub city: String,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting a location. Coordinates are resolved before insert.
#[derive(Debug, Clone)]
pub struct CreateLocation {
    pub name: String,
    pub city: String,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
    pub notes: Option<String>,
}

/// DTO for updating an existing location. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateLocation {
    pub name: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub notes: Option<String>,
}

/// Per-user location counts.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct LocationStats {
    pub total_locations: i64,
    pub countries_visited: i64,
    pub cities_visited: i64,
}
