//! Handler for `GET /geocode`.

use axum::extract::{Query, State};
use axum::Json;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::GeocodeParams;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct GeocodeResponse {
    pub latitude: f64,
    pub longitude: f64,
    pub query: String,
}

/// GET /api/v1/geocode?query=
///
/// 404 when the provider knows no such place.
pub async fn geocode(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(params): Query<GeocodeParams>,
) -> AppResult<Json<DataResponse<GeocodeResponse>>> {
    let query = params.query.trim();
    if query.is_empty() {
        return Err(AppError::BadRequest("Query parameter is required".into()));
    }

    let coords = state
        .weather
        .geocode(query)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Location '{query}' not found")))?;

    Ok(Json(DataResponse {
        data: GeocodeResponse {
            latitude: coords.latitude,
            longitude: coords.longitude,
            query: query.to_string(),
        },
    }))
}
