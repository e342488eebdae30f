//! Person entity model and DTOs.

use journey_core::types::{nullable, CalendarDate, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A person row from the `people` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Person {
    pub id: DbId,
    pub user_id: DbId,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: Option<CalendarDate>,
    pub home_location_id: Option<DbId>,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Person {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// A person row with the number of recorded visits, for list views.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PersonSummary {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub person: Person,
    pub visit_count: i64,
}

/// DTO for creating a new person.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePerson {
    pub first_name: String,
    pub last_name: String,
    pub birth_date: Option<CalendarDate>,
    pub home_location_id: Option<DbId>,
    pub notes: Option<String>,
}

/// DTO for updating an existing person. Missing fields are left alone;
/// `birth_date` and `home_location_id` can be cleared with an explicit `null`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePerson {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub birth_date: Option<Option<CalendarDate>>,
    #[serde(default, deserialize_with = "nullable")]
    pub home_location_id: Option<Option<DbId>>,
    pub notes: Option<String>,
}
