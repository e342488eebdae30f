//! Route definitions for the `/weather` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{dashboard, weather};
use crate::state::AppState;

/// Routes mounted at `/weather`.
///
/// ```text
/// GET  /dashboard                       -> dashboard::get_dashboard
/// GET  /{location_id}                   -> current
/// POST /{location_id}/refresh           -> refresh
/// GET  /{location_id}/history           -> history
/// GET  /{location_id}/stats             -> location_stats
/// GET  /{location_id}/period-stats      -> period_stats
/// POST /{location_id}/upload            -> upload
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(dashboard::get_dashboard))
        .route("/{location_id}", get(weather::current))
        .route("/{location_id}/refresh", post(weather::refresh))
        .route("/{location_id}/history", get(weather::history))
        .route("/{location_id}/stats", get(weather::location_stats))
        .route("/{location_id}/period-stats", get(weather::period_stats))
        .route("/{location_id}/upload", post(weather::upload))
}
