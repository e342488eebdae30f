//! Handler for `GET /weather/dashboard`.

use axum::extract::{Query, State};
use axum::Json;
use chrono::{Duration, Utc};
use journey_core::weather::{daily_averages, round1, DailyTemperature, WeatherSample, TREND_DAYS};
use journey_db::models::dashboard::{DashboardTotals, RecentWeather};
use journey_db::repositories::DashboardRepo;
use serde::Serialize;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::query::UnitParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Number of recent observations shown on the dashboard.
const RECENT_WEATHER_LIMIT: i64 = 10;

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    #[serde(flatten)]
    pub totals: DashboardTotals,
    pub recent_weather: Vec<RecentWeather>,
    /// Daily averages over the last seven days, oldest first.
    pub temperature_trends: Vec<DailyTemperature>,
}

/// GET /api/v1/weather/dashboard?unit=
pub async fn get_dashboard(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<UnitParams>,
) -> AppResult<Json<DataResponse<DashboardResponse>>> {
    let since = Utc::now() - Duration::days(TREND_DAYS);

    let (mut totals, mut recent_weather, trend_rows) = futures::try_join!(
        DashboardRepo::totals(&state.pool, auth.user_id),
        DashboardRepo::recent_weather(&state.pool, auth.user_id, RECENT_WEATHER_LIMIT),
        DashboardRepo::samples_since(&state.pool, auth.user_id, since),
    )?;

    let samples: Vec<WeatherSample> = trend_rows.into_iter().map(Into::into).collect();
    let mut temperature_trends = daily_averages(&samples);

    let unit = params.unit;
    totals.average_temperature = totals
        .average_temperature
        .map(|t| round1(unit.from_celsius(t)));
    for recent in &mut recent_weather {
        recent.temperature = round1(unit.from_celsius(recent.temperature));
    }
    for day in &mut temperature_trends {
        day.average_temp = round1(unit.from_celsius(day.average_temp));
    }

    Ok(Json(DataResponse {
        data: DashboardResponse {
            totals,
            recent_weather,
            temperature_trends,
        },
    }))
}
