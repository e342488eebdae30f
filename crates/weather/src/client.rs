//! HTTP client for the weather provider.
//!
//! Wraps the OpenWeatherMap current-weather and direct-geocoding endpoints
//! using [`reqwest`]. One request per call; no retry and no caching.

use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::error::WeatherError;
use crate::mock;
use crate::types::{Coordinates, CurrentResponse, CurrentWeather, GeocodeEntry};

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Provider connection settings.
#[derive(Debug, Clone)]
pub struct WeatherConfig {
    /// `None` switches the client into mock mode.
    pub api_key: Option<String>,
    /// Base URL without trailing slash, e.g. `https://api.openweathermap.org`.
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// Weather and geocoding client shared across requests.
pub struct WeatherClient {
    client: reqwest::Client,
    config: WeatherConfig,
}

impl WeatherClient {
    /// Build a client with the configured request timeout.
    pub fn new(config: WeatherConfig) -> Result<Self, WeatherError> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    /// True when no API key is configured and answers are synthesized.
    pub fn is_mock(&self) -> bool {
        self.api_key().is_none()
    }

    /// Current conditions at a coordinate.
    ///
    /// Sends `GET /data/2.5/weather?lat&lon&appid&units=metric`.
    pub async fn current_weather(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<CurrentWeather, WeatherError> {
        let Some(api_key) = self.api_key() else {
            tracing::debug!(latitude, longitude, "No weather API key, using mock data");
            return Ok(mock::current_weather(latitude, &mut rand::rng()));
        };

        let response = self
            .client
            .get(format!("{}/data/2.5/weather", self.config.base_url))
            .query(&[
                ("lat", latitude.to_string()),
                ("lon", longitude.to_string()),
                ("appid", api_key.to_string()),
                ("units", "metric".to_string()),
            ])
            .send()
            .await?;

        let raw: CurrentResponse = Self::parse_response(response).await?;
        raw.try_into()
    }

    /// Resolve a free-text place name to coordinates.
    ///
    /// Sends `GET /geo/1.0/direct?q&limit=1&appid`. Returns `None` when the
    /// provider knows no such place.
    pub async fn geocode(&self, query: &str) -> Result<Option<Coordinates>, WeatherError> {
        let Some(api_key) = self.api_key() else {
            tracing::debug!(query, "No weather API key, using mock coordinates");
            return Ok(Some(mock::coordinates(query)));
        };

        let response = self
            .client
            .get(format!("{}/geo/1.0/direct", self.config.base_url))
            .query(&[("q", query), ("limit", "1"), ("appid", api_key)])
            .send()
            .await?;

        let entries: Vec<GeocodeEntry> = Self::parse_response(response).await?;
        Ok(entries.into_iter().next().map(|e| Coordinates {
            latitude: e.lat,
            longitude: e.lon,
        }))
    }

    // ---- private helpers ----

    fn api_key(&self) -> Option<&str> {
        self.config
            .api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
    }

    /// Ensure the response has a success status code. Returns the
    /// response unchanged on success, or a [`WeatherError::Api`]
    /// containing the status and body text on failure.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, WeatherError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(WeatherError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// Parse a successful JSON response body into the expected type.
    async fn parse_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, WeatherError> {
        let response = Self::ensure_success(response).await?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| WeatherError::Parse(e.to_string()))
    }
}
