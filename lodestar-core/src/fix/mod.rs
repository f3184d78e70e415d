//! Reconciled fix state
//!
//! The snapshot of last-known sensor truth. Every quantity carries its own
//! validity flag; consumers branch on it before reading the value.

pub mod field;
pub mod quality;
pub mod snapshot;

pub use field::FixField;
pub use lodestar_protocol::UtcTime;
pub use quality::FixQuality;
pub use snapshot::{Coordinates, FixSnapshot};
