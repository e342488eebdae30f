pub mod auth;
pub mod geocoding;
pub mod health;
pub mod location;
pub mod location_data;
pub mod person;
pub mod weather;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                                   register (public)
/// /auth/login                                      login (public)
/// /auth/refresh                                    refresh (public)
/// /auth/logout                                     logout
/// /auth/profile                                    get, update
/// /auth/change-password                            change password
///
/// /locations                                       list, create
/// /locations/stats                                 per-user counts
/// /locations/{id}                                  get, update, delete
///
/// /people                                          list, create
/// /people/search                                   name search (?q=)
/// /people/{id}                                     get, update, delete
/// /people/{id}/visits                              create visit
/// /people/{id}/visits/{visit_id}                   update, delete visit
/// /people/{id}/timeline                            timeline with weather
///
/// /weather/dashboard                               dashboard aggregates
/// /weather/{location_id}                           current conditions
/// /weather/{location_id}/refresh                   force provider fetch
/// /weather/{location_id}/history                   stored records
/// /weather/{location_id}/stats                     all-time statistics
/// /weather/{location_id}/period-stats              statistics over a range
/// /weather/{location_id}/upload                    bulk historical import
///
/// /geocode                                         place name to coordinates
///
/// /location-data/countries                         reference countries
/// /location-data/states/{country_id}               states of a country
/// /location-data/cities/{country_id}               cities of a country
/// /location-data/cities/{country_id}/{state_id}    cities of a state
/// /location-data/search/cities                     city search (?q=)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/locations", location::router())
        .nest("/people", person::router())
        .nest("/weather", weather::router())
        .nest("/location-data", location_data::router())
        .merge(geocoding::router())
}
