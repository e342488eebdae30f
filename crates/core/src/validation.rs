//! Input parsing and validation helpers shared by the HTTP layer.

use chrono::{DateTime, NaiveDateTime, NaiveTime};

use crate::error::CoreError;
use crate::types::{CalendarDate, Timestamp};

/// Parse a point in time given as a bare date (midnight UTC), an RFC 3339
/// timestamp, or a naive `YYYY-MM-DDTHH:MM:SS` taken as UTC.
pub fn parse_timestamp(field: &str, value: &str) -> Result<Timestamp, CoreError> {
    let value = value.trim();

    if let Ok(date) = CalendarDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN).and_utc());
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Ok(ts.to_utc());
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(naive.and_utc());
        }
    }

    Err(CoreError::Validation(format!(
        "{field} must be an ISO date or datetime, got '{value}'"
    )))
}

/// Reject a missing or blank string field, returning the trimmed value.
pub fn require_non_empty<'a>(field: &str, value: Option<&'a str>) -> Result<&'a str, CoreError> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(CoreError::Validation(format!("{field} is required"))),
    }
}

/// Ensure a latitude/longitude pair lies on the globe.
pub fn validate_coordinates(latitude: f64, longitude: f64) -> Result<(), CoreError> {
    if !(-90.0..=90.0).contains(&latitude) {
        return Err(CoreError::Validation(format!(
            "latitude must be between -90 and 90, got {latitude}"
        )));
    }
    if !(-180.0..=180.0).contains(&longitude) {
        return Err(CoreError::Validation(format!(
            "longitude must be between -180 and 180, got {longitude}"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
