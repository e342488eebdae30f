//! Handlers for `/people/{id}/visits`.
//!
//! A person's visits may touch but never overlap; a create or update that
//! would overlap another visit of the same person is refused with 409.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use journey_core::error::CoreError;
use journey_core::timeline::{validate_visit_range, visits_overlap, VisitPeriod};
use journey_core::types::DbId;
use journey_db::models::visit::{CreateVisit, UpdateVisit, Visit};
use journey_db::repositories::VisitRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::location::find_owned as find_owned_location;
use crate::handlers::person::find_owned as find_owned_person;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/people/{id}/visits
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(person_id): Path<DbId>,
    Json(input): Json<CreateVisit>,
) -> AppResult<(StatusCode, Json<DataResponse<Visit>>)> {
    let person = find_owned_person(&state, auth.user_id, person_id).await?;
    find_owned_location(&state, auth.user_id, input.location_id).await?;

    let candidate = VisitPeriod {
        visit_id: 0,
        location_id: input.location_id,
        start_date: input.start_date,
        end_date: input.end_date,
    };
    check_period(&state, person.id, &candidate, None).await?;

    let visit = VisitRepo::create(&state.pool, person.id, &input).await?;
    tracing::info!(
        person_id = person.id,
        visit_id = visit.id,
        location_id = visit.location_id,
        start = %visit.start_date,
        "Visit created",
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: visit })))
}

/// PUT /api/v1/people/{id}/visits/{visit_id}
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((person_id, visit_id)): Path<(DbId, DbId)>,
    Json(input): Json<UpdateVisit>,
) -> AppResult<Json<DataResponse<Visit>>> {
    let person = find_owned_person(&state, auth.user_id, person_id).await?;
    let existing = find_visit(&state, person.id, visit_id).await?;
    if let Some(location_id) = input.location_id {
        find_owned_location(&state, auth.user_id, location_id).await?;
    }

    let candidate = input.apply_to(&existing);
    check_period(&state, person.id, &candidate, Some(visit_id)).await?;

    let visit = VisitRepo::update(&state.pool, person.id, visit_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Visit",
            id: visit_id,
        }))?;
    Ok(Json(DataResponse { data: visit }))
}

/// DELETE /api/v1/people/{id}/visits/{visit_id}
///
/// Removes exactly that visit.
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((person_id, visit_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    let person = find_owned_person(&state, auth.user_id, person_id).await?;
    let deleted = VisitRepo::delete(&state.pool, person.id, visit_id).await?;
    if deleted {
        tracing::info!(person_id = person.id, visit_id, "Visit deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Visit",
            id: visit_id,
        }))
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn find_visit(state: &AppState, person_id: DbId, visit_id: DbId) -> AppResult<Visit> {
    VisitRepo::find_by_id(&state.pool, person_id, visit_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Visit",
            id: visit_id,
        }))
}

/// Validate the date range of `candidate` and reject it when it overlaps any
/// other visit of the person. `replacing` is the visit being edited, if any.
async fn check_period(
    state: &AppState,
    person_id: DbId,
    candidate: &VisitPeriod,
    replacing: Option<DbId>,
) -> AppResult<()> {
    validate_visit_range(candidate.start_date, candidate.end_date)?;

    let others = VisitRepo::list_for_person(&state.pool, person_id).await?;
    let clash = others
        .iter()
        .filter(|v| Some(v.id) != replacing)
        .map(Visit::period)
        .find(|other| visits_overlap(candidate, other));

    match clash {
        Some(other) => Err(AppError::Core(CoreError::Conflict(format!(
            "Visit overlaps visit {} ({} to {})",
            other.visit_id,
            other.start_date,
            other.effective_end()
        )))),
        None => Ok(()),
    }
}
