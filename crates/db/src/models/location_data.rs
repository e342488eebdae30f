//! Read-only country/state/city reference rows.

use journey_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Country {
    pub id: DbId,
    pub name: String,
    pub iso_code: String,
    pub iso_code_3: Option<String>,
    pub phone_code: Option<String>,
    pub currency: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A first-level subdivision (state, province, region).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct State {
    pub id: DbId,
    pub country_id: DbId,
    pub name: String,
    pub abbreviation: Option<String>,
    pub state_type: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct City {
    pub id: DbId,
    pub country_id: DbId,
    pub state_id: Option<DbId>,
    pub name: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub population: Option<i32>,
    pub timezone: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
