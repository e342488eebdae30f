use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use journey_core::error::CoreError;
use journey_weather::WeatherError;
use serde::Serialize;

/// Everything a handler can fail with.
///
/// Rendered as `{ "error": <message>, "code": <CODE> }`. Internal failures
/// are logged in full and answered with a generic message.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Only for endpoints that exist to reach the provider (refresh, geocode).
    #[error("Weather provider error: {0}")]
    Weather(#[from] WeatherError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

pub type AppResult<T> = Result<T, AppError>;

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    code: &'static str,
}

/// Status, machine-readable code and client-facing message.
type Rendered = (StatusCode, &'static str, String);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, error) = self.render();
        (status, Json(ErrorBody { error, code })).into_response()
    }
}

impl AppError {
    fn render(&self) -> Rendered {
        match self {
            AppError::Core(err) => render_core(err),
            AppError::Database(err) => render_sqlx(err),
            AppError::Weather(err) => {
                tracing::warn!(error = %err, "Weather provider call failed");
                (
                    StatusCode::BAD_GATEWAY,
                    "BAD_GATEWAY",
                    "Weather provider is unavailable".into(),
                )
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Handler failed");
                sanitized()
            }
        }
    }
}

fn render_core(err: &CoreError) -> Rendered {
    match err {
        CoreError::NotFound { entity, id } => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            format!("{entity} with id {id} not found"),
        ),
        CoreError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
        CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
        CoreError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone()),
        CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
        CoreError::Internal(msg) => {
            tracing::error!(error = %msg, "Domain invariant broken");
            sanitized()
        }
    }
}

/// Constraint violations become client errors; named `uq_*` constraints
/// are the only unique indexes reported as conflicts.
fn render_sqlx(err: &sqlx::Error) -> Rendered {
    if let sqlx::Error::RowNotFound = err {
        return (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".into(),
        );
    }

    if let sqlx::Error::Database(db_err) = err {
        let constraint = db_err.constraint().unwrap_or("unknown");
        let code = db_err.code();
        match code.as_deref() {
            Some("23505") if constraint.starts_with("uq_") => {
                return (
                    StatusCode::CONFLICT,
                    "CONFLICT",
                    format!("Duplicate value violates unique constraint: {constraint}"),
                )
            }
            Some("23503") => {
                return (
                    StatusCode::CONFLICT,
                    "CONFLICT",
                    format!("Operation violates reference constraint: {constraint}"),
                )
            }
            Some("23514") => {
                return (
                    StatusCode::BAD_REQUEST,
                    "VALIDATION_ERROR",
                    format!("Value violates check constraint: {constraint}"),
                )
            }
            _ => {}
        }
    }

    tracing::error!(error = %err, "Unhandled database error");
    sanitized()
}

fn sanitized() -> Rendered {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".into(),
    )
}
