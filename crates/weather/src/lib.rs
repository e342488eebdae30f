//! Client for the OpenWeatherMap-compatible weather and geocoding provider.
//!
//! Without an API key the client answers from [`mock`] instead of the
//! network, which keeps local development and tests offline.

pub mod client;
pub mod error;
pub mod mock;
pub mod types;

pub use client::{WeatherClient, WeatherConfig};
pub use error::WeatherError;
pub use types::{Coordinates, CurrentWeather};
