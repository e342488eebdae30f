//! `AppError` rendering, exercised without a server or database.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use http_body_util::BodyExt;
use journey_api::error::AppError;
use journey_core::error::CoreError;
use journey_weather::WeatherError;
use serde_json::Value;

async fn render(err: AppError) -> (StatusCode, Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn client_errors_keep_their_message() {
    let cases = [
        (
            AppError::Core(CoreError::NotFound { entity: "Person", id: 42 }),
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Person with id 42 not found",
        ),
        (
            AppError::Core(CoreError::Validation("start_date is required".into())),
            StatusCode::BAD_REQUEST,
            "VALIDATION_ERROR",
            "start_date is required",
        ),
        (
            AppError::Core(CoreError::Conflict("Visit overlaps visit 3".into())),
            StatusCode::CONFLICT,
            "CONFLICT",
            "Visit overlaps visit 3",
        ),
        (
            AppError::Core(CoreError::Unauthorized("Invalid or expired token".into())),
            StatusCode::UNAUTHORIZED,
            "UNAUTHORIZED",
            "Invalid or expired token",
        ),
        (
            AppError::Core(CoreError::Forbidden("not yours".into())),
            StatusCode::FORBIDDEN,
            "FORBIDDEN",
            "not yours",
        ),
        (
            AppError::NotFound("Location 'Atlantis' not found".into()),
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Location 'Atlantis' not found",
        ),
        (
            AppError::BadRequest("Search query must not be empty".into()),
            StatusCode::BAD_REQUEST,
            "BAD_REQUEST",
            "Search query must not be empty",
        ),
        (
            AppError::Database(sqlx::Error::RowNotFound),
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found",
        ),
    ];

    for (err, status, code, message) in cases {
        let (got_status, json) = render(err).await;
        assert_eq!(got_status, status, "{message}");
        assert_eq!(json["code"], code, "{message}");
        assert_eq!(json["error"], message);
    }
}

#[tokio::test]
async fn internal_errors_are_sanitized() {
    for err in [
        AppError::Core(CoreError::Internal("pool exhausted at 10.0.0.3".into())),
        AppError::InternalError("token signing key missing".into()),
        AppError::Database(sqlx::Error::PoolTimedOut),
    ] {
        let (status, json) = render(err).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["code"], "INTERNAL_ERROR");
        assert_eq!(json["error"], "An internal error occurred");
    }
}

#[tokio::test]
async fn provider_failure_is_bad_gateway_without_upstream_body() {
    let err = AppError::Weather(WeatherError::Api {
        status: 401,
        body: "Invalid API key abc123".into(),
    });

    let (status, json) = render(err).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(json["code"], "BAD_GATEWAY");
    assert!(!json["error"].as_str().unwrap().contains("abc123"));
}
