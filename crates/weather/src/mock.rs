//! Offline stand-ins for the provider, used when no API key is configured.
//!
//! Current weather is synthesized from latitude with random jitter.
//! Geocoding is deterministic: the same query always maps to the same point.

use rand::seq::IndexedRandom;
use rand::Rng;
use sha2::{Digest, Sha256};

use crate::types::{Coordinates, CurrentWeather};

const BASE_TEMPERATURE: f64 = 20.0;
const POLAR_DROP: f64 = 20.0;
const JITTER: f64 = 5.0;

/// Synthesize plausible current conditions for a latitude.
///
/// Temperature falls linearly from 20 °C at the equator to 0 °C at the
/// poles, plus up to ±5 °C jitter. The description is drawn from the
/// temperature band.
pub fn current_weather<R: Rng>(latitude: f64, rng: &mut R) -> CurrentWeather {
    let lat_factor = latitude.abs().min(90.0) / 90.0;
    let temperature =
        round1(BASE_TEMPERATURE - lat_factor * POLAR_DROP + rng.random_range(-JITTER..=JITTER));

    let description = describe(temperature)
        .choose(rng)
        .copied()
        .unwrap_or("clear sky");

    CurrentWeather {
        temperature,
        humidity: Some(f64::from(rng.random_range(30..=90_i32))),
        pressure: Some(f64::from(rng.random_range(980..=1030_i32))),
        wind_speed: Some(round1(rng.random_range(0.0..15.0))),
        wind_direction: Some(f64::from(rng.random_range(0..=360_i32))),
        description: Some(description.to_string()),
        icon: Some("01d".to_string()),
    }
}

/// Candidate descriptions for a temperature band.
fn describe(temperature: f64) -> &'static [&'static str] {
    if temperature < 0.0 {
        &["snow", "freezing rain", "blizzard"]
    } else if temperature < 10.0 {
        &["rain", "drizzle", "fog"]
    } else if temperature < 20.0 {
        &["partly cloudy", "cloudy", "light rain"]
    } else {
        &["sunny", "clear sky", "scattered clouds"]
    }
}

/// Deterministic coordinates for a place name, case-insensitive.
pub fn coordinates(query: &str) -> Coordinates {
    let digest = Sha256::digest(query.trim().to_lowercase().as_bytes());
    let lat_bits = u32::from_be_bytes([digest[0], digest[1], digest[2], digest[3]]);
    let lon_bits = u32::from_be_bytes([digest[4], digest[5], digest[6], digest[7]]);

    let scale = |bits: u32, span: f64| f64::from(bits) / f64::from(u32::MAX) * span - span / 2.0;
    Coordinates {
        latitude: round4(scale(lat_bits, 180.0)),
        longitude: round4(scale(lon_bits, 360.0)),
    }
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

fn round4(v: f64) -> f64 {
    (v * 10_000.0).round() / 10_000.0
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
