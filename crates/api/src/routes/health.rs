use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
}

impl HealthStatus {
    fn from_db(db_healthy: bool) -> Self {
        Self {
            status: if db_healthy { "ok" } else { "degraded" },
            version: env!("CARGO_PKG_VERSION"),
            db_healthy,
        }
    }
}

/// GET /health. Always 200; a dead database shows up as `"degraded"`.
async fn health(State(state): State<AppState>) -> Json<HealthStatus> {
    let db_healthy = journey_db::health_check(&state.pool)
        .await
        .inspect_err(|e| tracing::warn!(error = %e, "Database ping failed"))
        .is_ok();

    Json(HealthStatus::from_db(db_healthy))
}

/// Unauthenticated, outside the `/api/v1` prefix.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
