//! Handlers for the `/weather/{location_id}` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use journey_core::error::CoreError;
use journey_core::types::{DbId, Timestamp};
use journey_core::validation::parse_timestamp;
use journey_core::weather::{DataCoverage, PeriodStats, StatsWindow};
use journey_db::models::location::Location;
use journey_db::models::weather_record::{CreateWeatherRecord, WeatherRecord};
use journey_db::repositories::WeatherRecordRepo;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::handlers::location::find_owned as find_owned_location;
use crate::middleware::auth::AuthUser;
use crate::query::{LimitParams, PeriodStatsParams, UnitParams};
use crate::response::DataResponse;
use crate::services::{observation, stats};
use crate::state::AppState;

/// Default number of records returned by the history endpoint.
const DEFAULT_HISTORY_LIMIT: i64 = 100;
/// Upper bound on `?limit=` for the history endpoint.
const MAX_HISTORY_LIMIT: i64 = 1000;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Current conditions at a location. `weather` is `None` when the provider
/// could not be reached.
#[derive(Debug, Serialize)]
pub struct CurrentWeatherResponse {
    pub location: Location,
    pub weather: Option<WeatherRecord>,
}

#[derive(Debug, Serialize)]
pub struct LocationStatsResponse {
    pub location_id: DbId,
    /// `None` when the location has no records.
    pub stats: Option<PeriodStats>,
}

#[derive(Debug, Serialize)]
pub struct PeriodStatsResponse {
    pub location_id: DbId,
    pub start: Timestamp,
    pub end: Timestamp,
    pub stats: Option<PeriodStats>,
}

/// One entry of a historical upload.
///
/// `date` accepts `YYYY-MM-DD` or an ISO datetime; both it and `temperature`
/// are required. They are optional here so that a missing value is reported
/// with its position instead of failing the whole body parse.
#[derive(Debug, Deserialize)]
pub struct UploadRecord {
    pub date: Option<String>,
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub pressure: Option<f64>,
    pub wind_speed: Option<f64>,
    pub wind_direction: Option<f64>,
    pub description: Option<String>,
    pub icon: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UploadResult {
    pub inserted: u64,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/weather/{location_id}
///
/// Fetches and stores current conditions. A provider failure is logged and
/// answered with `weather: null`.
pub async fn current(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(location_id): Path<DbId>,
) -> AppResult<Json<DataResponse<CurrentWeatherResponse>>> {
    let location = find_owned_location(&state, auth.user_id, location_id).await?;

    let weather = match observation::fetch_and_record(&state, &location).await {
        Ok(record) => Some(record),
        Err(AppError::Weather(e)) => {
            tracing::warn!(location_id, error = %e, "Current weather unavailable");
            None
        }
        Err(other) => return Err(other),
    };

    Ok(Json(DataResponse {
        data: CurrentWeatherResponse { location, weather },
    }))
}

/// POST /api/v1/weather/{location_id}/refresh
///
/// Like [`current`] but a provider failure is a 502.
pub async fn refresh(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(location_id): Path<DbId>,
) -> AppResult<Json<DataResponse<CurrentWeatherResponse>>> {
    let location = find_owned_location(&state, auth.user_id, location_id).await?;
    let record = observation::fetch_and_record(&state, &location).await?;

    Ok(Json(DataResponse {
        data: CurrentWeatherResponse {
            location,
            weather: Some(record),
        },
    }))
}

/// GET /api/v1/weather/{location_id}/history?limit=
///
/// Newest first.
pub async fn history(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(location_id): Path<DbId>,
    Query(params): Query<LimitParams>,
) -> AppResult<Json<DataResponse<Vec<WeatherRecord>>>> {
    find_owned_location(&state, auth.user_id, location_id).await?;

    let limit = params
        .limit
        .unwrap_or(DEFAULT_HISTORY_LIMIT)
        .clamp(1, MAX_HISTORY_LIMIT);
    let records = WeatherRecordRepo::list_for_location(&state.pool, location_id, limit).await?;
    Ok(Json(DataResponse { data: records }))
}

/// GET /api/v1/weather/{location_id}/stats?unit=
pub async fn location_stats(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(location_id): Path<DbId>,
    Query(params): Query<UnitParams>,
) -> AppResult<Json<DataResponse<LocationStatsResponse>>> {
    find_owned_location(&state, auth.user_id, location_id).await?;

    let stats = stats::all_time_stats(&state.pool, location_id, DataCoverage::Complete)
        .await?
        .map(|s| s.in_unit(params.unit));

    Ok(Json(DataResponse {
        data: LocationStatsResponse { location_id, stats },
    }))
}

/// GET /api/v1/weather/{location_id}/period-stats?start_date=&end_date=&unit=
pub async fn period_stats(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(location_id): Path<DbId>,
    Query(params): Query<PeriodStatsParams>,
) -> AppResult<Json<DataResponse<PeriodStatsResponse>>> {
    let (Some(start_raw), Some(end_raw)) = (params.start_date, params.end_date) else {
        return Err(AppError::Core(CoreError::Validation(
            "start_date and end_date parameters are required".into(),
        )));
    };
    let start = parse_timestamp("start_date", &start_raw)?;
    let end = parse_timestamp("end_date", &end_raw)?;
    let window = StatsWindow::new(start.naive_utc(), end.naive_utc())?;

    find_owned_location(&state, auth.user_id, location_id).await?;

    let stats = stats::period_stats(&state.pool, location_id, &window)
        .await?
        .map(|s| s.in_unit(params.unit));

    Ok(Json(DataResponse {
        data: PeriodStatsResponse {
            location_id,
            start,
            end,
            stats,
        },
    }))
}

/// POST /api/v1/weather/{location_id}/upload
///
/// Bulk historical import. Every entry is validated before anything is
/// written, and the batch is inserted in one transaction.
pub async fn upload(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(location_id): Path<DbId>,
    Json(entries): Json<Vec<UploadRecord>>,
) -> AppResult<(StatusCode, Json<DataResponse<UploadResult>>)> {
    find_owned_location(&state, auth.user_id, location_id).await?;

    if entries.is_empty() {
        return Err(AppError::BadRequest("No weather records provided".into()));
    }

    let records = entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| to_record(location_id, index, entry))
        .collect::<Result<Vec<_>, _>>()?;

    let inserted = WeatherRecordRepo::create_batch(&state.pool, &records).await?;
    tracing::info!(user_id = auth.user_id, location_id, inserted, "Historical weather uploaded");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: UploadResult { inserted },
        }),
    ))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn to_record(
    location_id: DbId,
    index: usize,
    entry: UploadRecord,
) -> Result<CreateWeatherRecord, CoreError> {
    let field = |name: &str| format!("records[{index}].{name}");

    let date = entry
        .date
        .ok_or_else(|| CoreError::Validation(format!("{} is required", field("date"))))?;
    let recorded_at = parse_timestamp(&field("date"), &date)?;
    let temperature = entry
        .temperature
        .ok_or_else(|| CoreError::Validation(format!("{} is required", field("temperature"))))?;

    Ok(CreateWeatherRecord {
        location_id,
        temperature,
        humidity: entry.humidity,
        pressure: entry.pressure,
        wind_speed: entry.wind_speed,
        wind_direction: entry.wind_direction,
        description: entry.description,
        icon: entry.icon,
        recorded_at: Some(recorded_at),
    })
}
