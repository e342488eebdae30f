use std::str::FromStr;
use std::time::Duration;

use journey_weather::client::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
use journey_weather::WeatherConfig;

use crate::auth::jwt::{JwtConfig, DEFAULT_ACCESS_EXPIRY_MINS, DEFAULT_REFRESH_EXPIRY_DAYS};

/// Startup configuration problems. Reported by `main` before anything binds.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set in the environment")]
    Missing(&'static str),

    #[error("{name} has an invalid value '{value}'")]
    Invalid { name: &'static str, value: String },
}

/// Log output format selected by `LOG_FORMAT`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            _ => Err(()),
        }
    }
}

/// Server configuration loaded from environment variables.
///
/// Everything except the database URL and the JWT secret has a default
/// suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    pub database_url: String,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// JWT token configuration (secret, expiry durations).
    pub jwt: JwtConfig,
    /// Weather provider settings. No API key means mock mode.
    pub weather: WeatherConfig,
    pub log_format: LogFormat,
}

impl ServerConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var                   | Default                          |
    /// |---------------------------|----------------------------------|
    /// | `DATABASE_URL`            | required                         |
    /// | `HOST`                    | `0.0.0.0`                        |
    /// | `PORT`                    | `3000`                           |
    /// | `CORS_ORIGINS`            | `http://localhost:5173`          |
    /// | `REQUEST_TIMEOUT_SECS`    | `30`                             |
    /// | `JWT_SECRET`              | required                         |
    /// | `JWT_ACCESS_EXPIRY_MINS`  | `1440`                           |
    /// | `JWT_REFRESH_EXPIRY_DAYS` | `30`                             |
    /// | `OPENWEATHER_API_KEY`     | unset (mock mode)                |
    /// | `OPENWEATHER_BASE_URL`    | `https://api.openweathermap.org` |
    /// | `WEATHER_TIMEOUT_SECS`    | `10`                             |
    /// | `LOG_FORMAT`              | `pretty`                         |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let database_url = var("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;
        let secret = var("JWT_SECRET").ok_or(ConfigError::Missing("JWT_SECRET"))?;

        let host = var("HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port: u16 = parse_or(&var, "PORT", 3000)?;

        let cors_origins: Vec<String> = var("CORS_ORIGINS")
            .unwrap_or_else(|| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = parse_or(&var, "REQUEST_TIMEOUT_SECS", 30)?;

        let jwt = JwtConfig {
            secret,
            access_token_expiry_mins: parse_or(
                &var,
                "JWT_ACCESS_EXPIRY_MINS",
                DEFAULT_ACCESS_EXPIRY_MINS,
            )?,
            refresh_token_expiry_days: parse_or(
                &var,
                "JWT_REFRESH_EXPIRY_DAYS",
                DEFAULT_REFRESH_EXPIRY_DAYS,
            )?,
        };

        let weather = WeatherConfig {
            api_key: var("OPENWEATHER_API_KEY"),
            base_url: var("OPENWEATHER_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            timeout: Duration::from_secs(parse_or(
                &var,
                "WEATHER_TIMEOUT_SECS",
                DEFAULT_TIMEOUT_SECS,
            )?),
        };

        let log_format = parse_or(&var, "LOG_FORMAT", LogFormat::Pretty)?;

        Ok(Self {
            host,
            port,
            database_url,
            cors_origins,
            request_timeout_secs,
            jwt,
            weather,
            log_format,
        })
    }
}

fn parse_or<T, F>(var: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match var(name) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
    }
}
