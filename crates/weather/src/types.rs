//! Provider-neutral result types and the raw provider payloads they are
//! parsed from.

use serde::{Deserialize, Serialize};

use crate::error::WeatherError;

/// A current-conditions observation. Temperature is in Celsius.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentWeather {
    pub temperature: f64,
    pub humidity: Option<f64>,
    pub pressure: Option<f64>,
    pub wind_speed: Option<f64>,
    pub wind_direction: Option<f64>,
    pub description: Option<String>,
    pub icon: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

// ---- raw provider payloads ----

#[derive(Debug, Deserialize)]
pub(crate) struct CurrentResponse {
    main: MainBlock,
    #[serde(default)]
    wind: Option<WindBlock>,
    #[serde(default)]
    weather: Vec<ConditionBlock>,
}

#[derive(Debug, Deserialize)]
struct MainBlock {
    temp: f64,
    humidity: Option<f64>,
    pressure: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct WindBlock {
    speed: Option<f64>,
    deg: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct ConditionBlock {
    description: String,
    icon: Option<String>,
}

impl TryFrom<CurrentResponse> for CurrentWeather {
    type Error = WeatherError;

    fn try_from(raw: CurrentResponse) -> Result<Self, Self::Error> {
        let condition = raw
            .weather
            .into_iter()
            .next()
            .ok_or_else(|| WeatherError::Parse("missing weather condition".into()))?;
        let (wind_speed, wind_direction) = raw
            .wind
            .map(|w| (w.speed, w.deg))
            .unwrap_or((None, None));

        Ok(Self {
            temperature: raw.main.temp,
            humidity: raw.main.humidity,
            pressure: raw.main.pressure,
            wind_speed,
            wind_direction,
            description: Some(condition.description),
            icon: condition.icon,
        })
    }
}

/// One entry of the direct geocoding response.
#[derive(Debug, Deserialize)]
pub(crate) struct GeocodeEntry {
    pub lat: f64,
    pub lon: f64,
}
