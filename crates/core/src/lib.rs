//! Domain core for the weather journey service.
//!
//! Holds everything that does not touch the database or the network:
//! shared id/time types, the domain error, timeline reconstruction,
//! weather statistics, and input validation helpers.

pub mod annotate;
pub mod error;
pub mod timeline;
pub mod types;
pub mod validation;
pub mod weather;
