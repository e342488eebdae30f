//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. Queries on user-owned rows
//! take the owning `user_id` so a row belonging to someone else reads as
//! missing.

pub mod dashboard_repo;
pub mod location_data_repo;
pub mod location_repo;
pub mod person_repo;
pub mod session_repo;
pub mod user_repo;
pub mod visit_repo;
pub mod weather_record_repo;

pub use dashboard_repo::DashboardRepo;
pub use location_data_repo::LocationDataRepo;
pub use location_repo::LocationRepo;
pub use person_repo::PersonRepo;
pub use session_repo::SessionRepo;
pub use user_repo::UserRepo;
pub use visit_repo::VisitRepo;
pub use weather_record_repo::WeatherRecordRepo;

/// Build an `ILIKE` pattern matching `term` anywhere, with wildcards in
/// `term` itself escaped.
pub(crate) fn contains_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}
