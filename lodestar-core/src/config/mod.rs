//! Configuration types
//!
//! Every tunable of the telemetry core. Configuration is stored in the
//! durable store as postcard binary data and falls back to defaults when
//! nothing has been written yet.

pub mod loader;
pub mod types;

pub use loader::ConfigError;
pub use types::*;
