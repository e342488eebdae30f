use axum::routing::get;
use axum::Router;

use crate::handlers::geocoding;
use crate::state::AppState;

/// `GET /geocode?query=` (requires auth).
pub fn router() -> Router<AppState> {
    Router::new().route("/geocode", get(geocoding::geocode))
}
