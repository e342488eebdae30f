//! Logic shared by several handlers that is neither a pure domain rule nor
//! a single repository call.
//!
//! - [`stats`] -- database-backed weather statistics with coverage fallback.
//! - [`observation`] -- fetch current conditions and persist them.

pub mod observation;
pub mod stats;
