#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use sqlx::PgPool;
use tower::ServiceExt;

use journey_api::auth::jwt::JwtConfig;
use journey_api::config::{LogFormat, ServerConfig};
use journey_api::router::build_app_router;
use journey_api::state::AppState;
use journey_weather::{WeatherClient, WeatherConfig};

pub const TEST_PASSWORD: &str = "journey-pass-123";

/// Build a test `ServerConfig` with safe defaults and a mock-mode weather client.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        database_url: "postgres://unused".to_string(),
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "integration-test-secret-long-enough".to_string(),
            access_token_expiry_mins: 15,
            refresh_token_expiry_days: 7,
        },
        weather: WeatherConfig::default(),
        log_format: LogFormat::Pretty,
    }
}

/// Full application router over `pool`, weather in mock mode.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with_weather(pool, WeatherConfig::default())
}

/// Full application router with a specific weather provider configuration.
pub fn build_test_app_with_weather(pool: PgPool, weather: WeatherConfig) -> Router {
    let config = ServerConfig {
        weather,
        ..test_config()
    };
    let client = WeatherClient::new(config.weather.clone()).expect("weather client should build");
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        weather: Arc::new(client),
    };
    build_app_router(state, &config)
}

/// A provider configuration with an API key whose requests cannot succeed.
pub fn unreachable_weather() -> WeatherConfig {
    WeatherConfig {
        api_key: Some("test-key".to_string()),
        base_url: "http://127.0.0.1:9".to_string(),
        timeout: Duration::from_secs(2),
    }
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

pub async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None, None).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn put_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::DELETE, uri, Some(token), None).await
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Register `username` through the API and return the full auth response.
pub async fn register(app: Router, username: &str) -> Value {
    let body = json!({
        "username": username,
        "email": format!("{username}@example.com"),
        "password": TEST_PASSWORD,
    });
    let response = post_json(app, "/api/v1/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

/// Register `username` and return its access token.
pub async fn token_for(app: Router, username: &str) -> String {
    register(app, username).await["access_token"]
        .as_str()
        .unwrap()
        .to_string()
}

/// Create a location with explicit coordinates and return its id.
pub async fn create_location(app: Router, token: &str, name: &str, city: &str) -> i64 {
    let body = json!({
        "name": name,
        "city": city,
        "country": "Portugal",
        "latitude": 38.72,
        "longitude": -9.14,
    });
    let response = post_json_auth(app, "/api/v1/locations", body, token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

/// Create a person and return their id.
pub async fn create_person(app: Router, token: &str, body: Value) -> i64 {
    let response = post_json_auth(app, "/api/v1/people", body, token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

/// Add a visit and return the raw response.
pub async fn add_visit(
    app: Router,
    token: &str,
    person_id: i64,
    location_id: i64,
    start: &str,
    end: Option<&str>,
) -> Response {
    let body = json!({
        "location_id": location_id,
        "start_date": start,
        "end_date": end,
    });
    post_json_auth(app, &format!("/api/v1/people/{person_id}/visits"), body, token).await
}
