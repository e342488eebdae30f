//! Current-conditions lookups that are persisted as weather records.

use journey_core::types::DbId;
use journey_db::models::location::Location;
use journey_db::models::weather_record::{CreateWeatherRecord, WeatherRecord};
use journey_db::repositories::WeatherRecordRepo;
use journey_weather::CurrentWeather;

use crate::error::AppResult;
use crate::state::AppState;

/// Ask the provider for current conditions at `location` and store them.
///
/// Provider failures surface as [`crate::error::AppError::Weather`]; callers
/// decide whether that fails the request.
pub async fn fetch_and_record(state: &AppState, location: &Location) -> AppResult<WeatherRecord> {
    let current = state
        .weather
        .current_weather(location.latitude, location.longitude)
        .await?;

    let record = WeatherRecordRepo::create(&state.pool, &to_record(location.id, current)).await?;
    tracing::info!(
        location_id = location.id,
        record_id = record.id,
        temperature = record.temperature,
        "Recorded current weather",
    );
    Ok(record)
}

fn to_record(location_id: DbId, current: CurrentWeather) -> CreateWeatherRecord {
    CreateWeatherRecord {
        location_id,
        temperature: current.temperature,
        humidity: current.humidity,
        pressure: current.pressure,
        wind_speed: current.wind_speed,
        wind_direction: current.wind_direction,
        description: current.description,
        icon: current.icon,
        recorded_at: None,
    }
}
