//! Handlers for the read-only `/location-data` reference lookups.

use axum::extract::{Path, Query, State};
use axum::Json;
use journey_core::types::DbId;
use journey_db::models::location_data::{City, Country, State as Region};
use journey_db::repositories::LocationDataRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::query::SearchParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/location-data/countries
pub async fn countries(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> AppResult<Json<DataResponse<Vec<Country>>>> {
    let countries = LocationDataRepo::countries(&state.pool).await?;
    Ok(Json(DataResponse { data: countries }))
}

/// GET /api/v1/location-data/states/{country_id}
pub async fn states(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(country_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Region>>>> {
    let states = LocationDataRepo::states_by_country(&state.pool, country_id).await?;
    Ok(Json(DataResponse { data: states }))
}

/// GET /api/v1/location-data/cities/{country_id}
pub async fn cities_by_country(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(country_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<City>>>> {
    let cities = LocationDataRepo::cities_by_country(&state.pool, country_id).await?;
    Ok(Json(DataResponse { data: cities }))
}

/// GET /api/v1/location-data/cities/{country_id}/{state_id}
pub async fn cities_by_state(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path((country_id, state_id)): Path<(DbId, DbId)>,
) -> AppResult<Json<DataResponse<Vec<City>>>> {
    let cities = LocationDataRepo::cities_by_state(&state.pool, country_id, state_id).await?;
    Ok(Json(DataResponse { data: cities }))
}

/// GET /api/v1/location-data/search/cities?q=
///
/// An empty query returns an empty list.
pub async fn search_cities(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<DataResponse<Vec<City>>>> {
    let term = params.q.trim();
    if term.is_empty() {
        return Ok(Json(DataResponse { data: Vec::new() }));
    }
    let cities = LocationDataRepo::search_cities(&state.pool, term).await?;
    Ok(Json(DataResponse { data: cities }))
}
