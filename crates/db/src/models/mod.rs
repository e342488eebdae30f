//! Row models and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches
//!
//! Reference data (`location_data`) and aggregates (`dashboard`) are read-only
//! and only carry row structs.

pub mod dashboard;
pub mod location;
pub mod location_data;
pub mod person;
pub mod session;
pub mod user;
pub mod visit;
pub mod weather_record;
