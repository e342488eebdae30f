//! Route definitions for the `/locations` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::location;
use crate::state::AppState;

/// Routes mounted at `/locations`.
///
/// ```text
/// GET    /         -> list
/// POST   /         -> create
/// GET    /stats    -> stats
/// GET    /{id}     -> get_by_id
/// PUT    /{id}     -> update
/// DELETE /{id}     -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(location::list).post(location::create))
        .route("/stats", get(location::stats))
        .route(
            "/{id}",
            get(location::get_by_id)
                .put(location::update)
                .delete(location::delete),
        )
}
