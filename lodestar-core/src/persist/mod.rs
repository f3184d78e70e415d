//! Durable persistence
//!
//! Rate-limited writes of the last good position, immediate writes of the
//! brightness setting, and the one-time restore at startup.

pub mod cadence;
pub mod record;

pub use cadence::{PersistError, PersistOutcome, PersistenceController, Restored, SkipReason};
pub use record::{BrightnessRecord, LastKnownPosition, PositionRecord};
