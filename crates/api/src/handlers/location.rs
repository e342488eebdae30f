//! Handlers for the `/locations` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use journey_core::error::CoreError;
use journey_core::types::DbId;
use journey_core::validation::{require_non_empty, validate_coordinates};
use journey_db::models::location::{CreateLocation, Location, LocationStats, UpdateLocation};
use journey_db::repositories::LocationRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /locations`. Coordinates are optional: when either
/// is missing the place is geocoded from `"{city}, {country}"`.
#[derive(Debug, Deserialize)]
pub struct CreateLocationRequest {
    pub name: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub notes: Option<String>,
}

/// POST /api/v1/locations
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<CreateLocationRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Location>>)> {
    let name = require_non_empty("name", input.name.as_deref())?;
    let city = require_non_empty("city", input.city.as_deref())?;
    let country = require_non_empty("country", input.country.as_deref())?;

    let (latitude, longitude) = match (input.latitude, input.longitude) {
        (Some(lat), Some(lon)) => (lat, lon),
        _ => resolve_coordinates(&state, city, country).await?,
    };
    validate_coordinates(latitude, longitude)?;

    let create = CreateLocation {
        name: name.to_string(),
        city: city.to_string(),
        country: country.to_string(),
        latitude,
        longitude,
        notes: input.notes,
    };
    let location = LocationRepo::create(&state.pool, auth.user_id, &create).await?;

    tracing::info!(
        user_id = auth.user_id,
        location_id = location.id,
        city = %location.city,
        "Location created",
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: location })))
}

/// GET /api/v1/locations
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<Vec<Location>>>> {
    let locations = LocationRepo::list(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse { data: locations }))
}

/// GET /api/v1/locations/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Location>>> {
    let location = find_owned(&state, auth.user_id, id).await?;
    Ok(Json(DataResponse { data: location }))
}

/// PUT /api/v1/locations/{id}
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateLocation>,
) -> AppResult<Json<DataResponse<Location>>> {
    for (field, value) in [
        ("name", &input.name),
        ("city", &input.city),
        ("country", &input.country),
    ] {
        if value.is_some() {
            require_non_empty(field, value.as_deref())?;
        }
    }
    // A missing half of the pair is left as stored; 0.0 is always in range.
    validate_coordinates(input.latitude.unwrap_or(0.0), input.longitude.unwrap_or(0.0))?;

    let location = LocationRepo::update(&state.pool, auth.user_id, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Location",
            id,
        }))?;
    Ok(Json(DataResponse { data: location }))
}

/// DELETE /api/v1/locations/{id}
///
/// Refused with 409 while any visit still references the location.
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = LocationRepo::delete(&state.pool, auth.user_id, id).await?;
    if deleted {
        tracing::info!(user_id = auth.user_id, location_id = id, "Location deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Location",
            id,
        }))
    }
}

/// GET /api/v1/locations/stats
pub async fn stats(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<LocationStats>>> {
    let stats = LocationRepo::stats(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse { data: stats }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Load a location owned by `user_id`, or 404.
pub(crate) async fn find_owned(
    state: &AppState,
    user_id: DbId,
    id: DbId,
) -> AppResult<Location> {
    LocationRepo::find_by_id(&state.pool, user_id, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Location",
            id,
        }))
}

async fn resolve_coordinates(
    state: &AppState,
    city: &str,
    country: &str,
) -> AppResult<(f64, f64)> {
    let query = format!("{city}, {country}");
    match state.weather.geocode(&query).await {
        Ok(Some(coords)) => Ok((coords.latitude, coords.longitude)),
        Ok(None) => Err(AppError::Core(CoreError::Validation(format!(
            "Could not determine coordinates for '{query}'"
        )))),
        Err(e) => {
            tracing::warn!(query = %query, error = %e, "Geocoding failed");
            Err(AppError::Core(CoreError::Validation(format!(
                "Could not determine coordinates for '{query}'"
            ))))
        }
    }
}
