//! Request handlers.
//!
//! Each submodule provides the async handler functions for one resource.
//! Handlers delegate to the repositories in `journey_db` and map errors via
//! [`AppError`].

use journey_core::error::CoreError;
use validator::Validate;

use crate::error::AppError;

pub mod auth;
pub mod dashboard;
pub mod geocoding;
pub mod location;
pub mod location_data;
pub mod person;
pub mod timeline;
pub mod visit;
pub mod weather;

/// Run derive-based validation on a request body.
pub(crate) fn validate_body<T: Validate>(input: &T) -> Result<(), AppError> {
    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))
}
