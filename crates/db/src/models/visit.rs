//! Visit entity model and DTOs (`person_visits` table).

use journey_core::timeline::VisitPeriod;
use journey_core::types::{nullable, CalendarDate, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A visit row: one person at one location over a date range.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Visit {
    pub id: DbId,
    pub person_id: DbId,
    pub location_id: DbId,
    pub start_date: CalendarDate,
    /// `None` means a single-day or still-open visit.
    pub end_date: Option<CalendarDate>,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Visit {
    /// The date span consumed by the timeline builder.
    pub fn period(&self) -> VisitPeriod {
        VisitPeriod {
            visit_id: self.id,
            location_id: self.location_id,
            start_date: self.start_date,
            end_date: self.end_date,
        }
    }
}

/// A visit joined with the name and place of its location.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct VisitWithLocation {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub visit: Visit,
    pub location_name: String,
    pub location_city: String,
    pub location_country: String,
}

/// DTO for creating a visit. The person comes from the URL path.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateVisit {
    pub location_id: DbId,
    pub start_date: CalendarDate,
    pub end_date: Option<CalendarDate>,
    pub notes: Option<String>,
}

/// DTO for updating a visit. Missing fields are left alone; `end_date: null`
/// clears the end date, turning the visit into a single-day one.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateVisit {
    pub location_id: Option<DbId>,
    pub start_date: Option<CalendarDate>,
    #[serde(default, deserialize_with = "nullable")]
    pub end_date: Option<Option<CalendarDate>>,
    pub notes: Option<String>,
}

impl UpdateVisit {
    /// The span `visit` would have once this update is applied.
    pub fn apply_to(&self, visit: &Visit) -> VisitPeriod {
        VisitPeriod {
            visit_id: visit.id,
            location_id: self.location_id.unwrap_or(visit.location_id),
            start_date: self.start_date.unwrap_or(visit.start_date),
            end_date: self.end_date.unwrap_or(visit.end_date),
        }
    }
}
