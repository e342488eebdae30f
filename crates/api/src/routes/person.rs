//! Route definitions for the `/people` resource and its nested visits.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{person, timeline, visit};
use crate::state::AppState;

/// Routes mounted at `/people`.
///
/// ```text
/// GET    /                          -> list
/// POST   /                          -> create
/// GET    /search?q=                 -> search
/// GET    /{id}                      -> get_by_id (with visits)
/// PUT    /{id}                      -> update
/// DELETE /{id}                      -> delete
/// POST   /{id}/visits               -> visit::create
/// PUT    /{id}/visits/{visit_id}    -> visit::update
/// DELETE /{id}/visits/{visit_id}    -> visit::delete
/// GET    /{id}/timeline             -> timeline::get_timeline
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(person::list).post(person::create))
        .route("/search", get(person::search))
        .route(
            "/{id}",
            get(person::get_by_id)
                .put(person::update)
                .delete(person::delete),
        )
        .route("/{id}/visits", post(visit::create))
        .route(
            "/{id}/visits/{visit_id}",
            put(visit::update).delete(visit::delete),
        )
        .route("/{id}/timeline", get(timeline::get_timeline))
}
