//! Shared query parameter types for API handlers.

use journey_core::weather::TemperatureUnit;
use serde::Deserialize;

/// Free-text search (`?q=`). A missing parameter reads as empty.
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

/// Display unit for statistics endpoints (`?unit=celsius|fahrenheit`).
#[derive(Debug, Default, Deserialize)]
pub struct UnitParams {
    #[serde(default)]
    pub unit: TemperatureUnit,
}

/// Range and unit for `GET /weather/{id}/period-stats`.
///
/// Dates stay as strings so that a bad value yields a validation error
/// naming the field instead of a generic query rejection.
#[derive(Debug, Deserialize)]
pub struct PeriodStatsParams {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    #[serde(default)]
    pub unit: TemperatureUnit,
}

/// Page size for history listings (`?limit=`), clamped by the handler.
#[derive(Debug, Deserialize)]
pub struct LimitParams {
    pub limit: Option<i64>,
}

/// Place name for `GET /geocode?query=`.
#[derive(Debug, Deserialize)]
pub struct GeocodeParams {
    #[serde(default)]
    pub query: String,
}
