//! Handler for `GET /people/{id}/timeline`.

use std::collections::HashMap;

use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::Utc;
use journey_core::annotate::{annotate_events, AnnotatedEvent};
use journey_core::timeline::{build_timeline, days_alive};
use journey_core::types::DbId;
use journey_db::models::location::Location;
use journey_db::models::visit::Visit;
use journey_db::repositories::{LocationRepo, VisitRepo};
use serde::Serialize;

use crate::error::AppResult;
use crate::handlers::person::find_owned as find_owned_person;
use crate::middleware::auth::AuthUser;
use crate::query::UnitParams;
use crate::response::DataResponse;
use crate::services::stats::DbStatsSource;
use crate::state::AppState;

/// A person's reconstructed life timeline, most recent event first.
#[derive(Debug, Serialize)]
pub struct TimelineResponse {
    pub person_id: DbId,
    /// `None` when the birth date is unknown.
    pub days_alive: Option<i64>,
    pub events: Vec<TimelineEntry>,
}

/// One event with its location row and weather summary.
#[derive(Debug, Serialize)]
pub struct TimelineEntry {
    #[serde(flatten)]
    pub event: AnnotatedEvent,
    pub location: Option<Location>,
}

/// GET /api/v1/people/{id}/timeline?unit=
///
/// Weather for every event is looked up concurrently; an event whose lookup
/// fails is returned without weather.
pub async fn get_timeline(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(person_id): Path<DbId>,
    Query(params): Query<UnitParams>,
) -> AppResult<Json<DataResponse<TimelineResponse>>> {
    let person = find_owned_person(&state, auth.user_id, person_id).await?;
    let visits = VisitRepo::list_for_person(&state.pool, person.id).await?;
    let periods: Vec<_> = visits.iter().map(Visit::period).collect();
    let today = Utc::now().date_naive();

    let events = build_timeline(person.birth_date, person.home_location_id, &periods, today)?;
    tracing::debug!(person_id, events = events.len(), "Timeline built");

    let source = DbStatsSource::new(state.pool.clone());
    let annotated = annotate_events(&source, events).await;

    let locations: HashMap<DbId, Location> = LocationRepo::list(&state.pool, auth.user_id)
        .await?
        .into_iter()
        .map(|l| (l.id, l))
        .collect();

    let events = annotated
        .into_iter()
        .map(|mut event| {
            event.weather = event.weather.map(|w| w.in_unit(params.unit));
            let location = locations.get(&event.event.location_id).cloned();
            TimelineEntry { event, location }
        })
        .collect();

    Ok(Json(DataResponse {
        data: TimelineResponse {
            person_id: person.id,
            days_alive: days_alive(person.birth_date, today),
            events,
        },
    }))
}
