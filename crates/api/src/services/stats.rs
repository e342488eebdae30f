//! Weather statistics backed by stored observations.

use async_trait::async_trait;
use journey_core::annotate::PeriodStatsSource;
use journey_core::error::CoreError;
use journey_core::types::DbId;
use journey_core::weather::{
    classify_coverage, DataCoverage, PeriodStats, StatsWindow, WeatherSample,
};
use journey_db::repositories::WeatherRecordRepo;
use journey_db::DbPool;

/// Statistics for `location_id` over `window`.
///
/// When the window holds no records the location's full history is used and
/// the result is marked [`DataCoverage::Fallback`]. `None` means the location
/// has never had a record.
pub async fn period_stats(
    pool: &DbPool,
    location_id: DbId,
    window: &StatsWindow,
) -> Result<Option<PeriodStats>, sqlx::Error> {
    let in_window: Vec<WeatherSample> = WeatherRecordRepo::samples_between(
        pool,
        location_id,
        window.start_utc(),
        window.end_utc(),
    )
    .await?
    .into_iter()
    .map(Into::into)
    .collect();

    if !in_window.is_empty() {
        let coverage = classify_coverage(window, &in_window);
        return Ok(PeriodStats::from_samples(&in_window, coverage));
    }

    tracing::debug!(
        location_id,
        start = %window.start,
        end = %window.end,
        "No records in window, using location history",
    );
    all_time_stats(pool, location_id, DataCoverage::Fallback).await
}

/// Statistics over every record of a location.
pub async fn all_time_stats(
    pool: &DbPool,
    location_id: DbId,
    coverage: DataCoverage,
) -> Result<Option<PeriodStats>, sqlx::Error> {
    let samples: Vec<WeatherSample> = WeatherRecordRepo::all_samples(pool, location_id)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(PeriodStats::from_samples(&samples, coverage))
}

/// [`PeriodStatsSource`] reading from the `weather_records` table.
pub struct DbStatsSource {
    pool: DbPool,
}

impl DbStatsSource {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PeriodStatsSource for DbStatsSource {
    async fn period_stats(
        &self,
        location_id: DbId,
        window: StatsWindow,
    ) -> Result<Option<PeriodStats>, CoreError> {
        period_stats(&self.pool, location_id, &window)
            .await
            .map_err(|e| CoreError::Internal(format!("weather statistics query failed: {e}")))
    }
}
