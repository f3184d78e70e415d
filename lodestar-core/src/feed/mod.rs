//! Sensor feed reconciliation
//!
//! Drains raw bytes from the sensor serial port into the external decoder,
//! copies decoded field updates into the [`FixSnapshot`](crate::fix::FixSnapshot)
//! and watches the stream for liveness.

pub mod decoder;
pub mod liveness;
pub mod reconciler;

pub use decoder::{FieldUpdate, SensorDecoder};
pub use liveness::{FaultKind, LivenessMonitor, LivenessStatus};
pub use reconciler::{DrainStats, FeedReconciler};
