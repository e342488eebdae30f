//! Route definitions for the read-only `/location-data` lookups.

use axum::routing::get;
use axum::Router;

use crate::handlers::location_data;
use crate::state::AppState;

/// Routes mounted at `/location-data`.
///
/// ```text
/// GET /countries                          -> countries
/// GET /states/{country_id}                -> states
/// GET /cities/{country_id}                -> cities_by_country
/// GET /cities/{country_id}/{state_id}     -> cities_by_state
/// GET /search/cities?q=                   -> search_cities
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/countries", get(location_data::countries))
        .route("/states/{country_id}", get(location_data::states))
        .route("/cities/{country_id}", get(location_data::cities_by_country))
        .route(
            "/cities/{country_id}/{state_id}",
            get(location_data::cities_by_state),
        )
        .route("/search/cities", get(location_data::search_cities))
}
