//! Handlers for the `/people` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use journey_core::error::CoreError;
use journey_core::types::DbId;
use journey_core::validation::require_non_empty;
use journey_db::models::person::{CreatePerson, Person, PersonSummary, UpdatePerson};
use journey_db::models::visit::VisitWithLocation;
use journey_db::repositories::{PersonRepo, VisitRepo};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::handlers::location::find_owned as find_owned_location;
use crate::middleware::auth::AuthUser;
use crate::query::SearchParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// A person together with their visits, newest first.
#[derive(Debug, Serialize)]
pub struct PersonDetail {
    #[serde(flatten)]
    pub person: Person,
    pub visits: Vec<VisitWithLocation>,
}

/// POST /api/v1/people
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(mut input): Json<CreatePerson>,
) -> AppResult<(StatusCode, Json<DataResponse<Person>>)> {
    input.first_name = require_non_empty("first_name", Some(&input.first_name))?.to_string();
    input.last_name = require_non_empty("last_name", Some(&input.last_name))?.to_string();
    if let Some(home_id) = input.home_location_id {
        find_owned_location(&state, auth.user_id, home_id).await?;
    }

    let person = PersonRepo::create(&state.pool, auth.user_id, &input).await?;
    tracing::info!(
        user_id = auth.user_id,
        person_id = person.id,
        name = %person.full_name(),
        "Person created",
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: person })))
}

/// GET /api/v1/people
///
/// Each entry carries its `visit_count`.
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<Vec<PersonSummary>>>> {
    let people = PersonRepo::list(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse { data: people }))
}

/// GET /api/v1/people/search?q=
///
/// Case-insensitive substring match on first or last name.
pub async fn search(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<DataResponse<Vec<PersonSummary>>>> {
    let term = params.q.trim();
    if term.is_empty() {
        return Err(AppError::BadRequest("Search query must not be empty".into()));
    }
    let people = PersonRepo::search(&state.pool, auth.user_id, term).await?;
    Ok(Json(DataResponse { data: people }))
}

/// GET /api/v1/people/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<PersonDetail>>> {
    let person = find_owned(&state, auth.user_id, id).await?;
    let visits = VisitRepo::list_with_location(&state.pool, person.id).await?;
    Ok(Json(DataResponse {
        data: PersonDetail { person, visits },
    }))
}

/// PUT /api/v1/people/{id}
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdatePerson>,
) -> AppResult<Json<DataResponse<Person>>> {
    if input.first_name.is_some() {
        require_non_empty("first_name", input.first_name.as_deref())?;
    }
    if input.last_name.is_some() {
        require_non_empty("last_name", input.last_name.as_deref())?;
    }
    if let Some(Some(home_id)) = input.home_location_id {
        find_owned_location(&state, auth.user_id, home_id).await?;
    }

    let person = PersonRepo::update(&state.pool, auth.user_id, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Person",
            id,
        }))?;
    Ok(Json(DataResponse { data: person }))
}

/// DELETE /api/v1/people/{id}
///
/// The person's visits are removed with them.
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = PersonRepo::delete(&state.pool, auth.user_id, id).await?;
    if deleted {
        tracing::info!(user_id = auth.user_id, person_id = id, "Person deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Person",
            id,
        }))
    }
}

/// Load a person owned by `user_id`, or 404.
pub(crate) async fn find_owned(state: &AppState, user_id: DbId, id: DbId) -> AppResult<Person> {
    PersonRepo::find_by_id(&state.pool, user_id, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Person",
            id,
        }))
}
