//! Aggregate rows for the weather dashboard.

use journey_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Entity counts and the all-time average temperature for one user.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DashboardTotals {
    pub total_locations: i64,
    pub total_people: i64,
    pub total_visits: i64,
    pub total_weather_records: i64,
    /// `None` when the user has no weather records.
    pub average_temperature: Option<f64>,
}

/// A recent observation labelled with its location.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RecentWeather {
    pub id: DbId,
    pub location_id: DbId,
    pub location_name: String,
    pub temperature: f64,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub recorded_at: Timestamp,
}
