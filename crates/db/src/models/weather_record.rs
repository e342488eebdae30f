//! Weather observation model and DTOs.

use journey_core::types::{DbId, Timestamp};
use journey_core::weather::WeatherSample;
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `weather_records` table. Temperatures are in Celsius.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct WeatherRecord {
    pub id: DbId,
    pub location_id: DbId,
    pub temperature: f64,
    pub humidity: Option<f64>,
    pub pressure: Option<f64>,
    pub wind_speed: Option<f64>,
    pub wind_direction: Option<f64>,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub recorded_at: Timestamp,
}

/// DTO for inserting an observation. `recorded_at` defaults to now.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateWeatherRecord {
    pub location_id: DbId,
    pub temperature: f64,
    pub humidity: Option<f64>,
    pub pressure: Option<f64>,
    pub wind_speed: Option<f64>,
    pub wind_direction: Option<f64>,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub recorded_at: Option<Timestamp>,
}

/// The subset of a record needed for statistics.
#[derive(Debug, Clone, FromRow)]
pub struct TemperatureRow {
    pub recorded_at: Timestamp,
    pub temperature: f64,
    pub description: Option<String>,
}

impl From<TemperatureRow> for WeatherSample {
    fn from(row: TemperatureRow) -> Self {
        WeatherSample {
            recorded_at: row.recorded_at,
            temperature: row.temperature,
            description: row.description,
        }
    }
}
