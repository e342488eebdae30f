//! Concurrent weather annotation of timeline events.

use async_trait::async_trait;
use futures::future::join_all;
use serde::Serialize;

use crate::error::CoreError;
use crate::timeline::TimelineEvent;
use crate::types::DbId;
use crate::weather::{event_window, PeriodStats, StatsWindow};

/// Anything that can summarize recorded weather for a location and window.
#[async_trait]
pub trait PeriodStatsSource: Send + Sync {
    /// Statistics for `location_id` over `window`, or `None` when the
    /// location has no weather data at all.
    async fn period_stats(
        &self,
        location_id: DbId,
        window: StatsWindow,
    ) -> Result<Option<PeriodStats>, CoreError>;
}

/// A timeline event together with its weather summary, if any.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnotatedEvent {
    #[serde(flatten)]
    pub event: TimelineEvent,
    pub weather: Option<PeriodStats>,
}

/// Attach weather statistics to every event.
///
/// All lookups run concurrently. A failed lookup is logged and leaves that
/// event without weather; the remaining events are unaffected. Output order
/// matches input order.
pub async fn annotate_events<S>(source: &S, events: Vec<TimelineEvent>) -> Vec<AnnotatedEvent>
where
    S: PeriodStatsSource + ?Sized,
{
    let lookups = events.iter().map(|event| async move {
        let window = event_window(event);
        match source.period_stats(event.location_id, window).await {
            Ok(stats) => stats,
            Err(e) => {
                tracing::warn!(
                    location_id = event.location_id,
                    start = %event.start_date,
                    end = %event.end_date,
                    error = %e,
                    "Weather lookup failed for timeline event",
                );
                None
            }
        }
    });
    let results = join_all(lookups).await;

    events
        .into_iter()
        .zip(results)
        .map(|(event, weather)| AnnotatedEvent { event, weather })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
