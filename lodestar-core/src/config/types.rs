//! Configuration type definitions

use heapless::String;
use lodestar_protocol::MAX_DEVICE_NAME_LEN;
use serde::{Deserialize, Serialize};

/// Nominal main-loop period
pub const DEFAULT_TICK_INTERVAL_MS: u32 = 100;

/// Minimum spacing between position writes to durable storage
pub const DEFAULT_PERSIST_INTERVAL_MS: u32 = 60_000;

/// Minimum spacing between position sentences over the radio
pub const DEFAULT_TRANSMIT_INTERVAL_MS: u32 = 1_000;

/// Below this ground speed the reported course is noise
pub const DEFAULT_HEADING_MIN_SPEED_KMH: f32 = 1.0;

/// Hold time that turns a press into a long press
pub const DEFAULT_LONG_PRESS_MS: u32 = 1_000;

/// Cap on sensor bytes drained in a single tick
pub const DEFAULT_MAX_BYTES_PER_TICK: u16 = 512;

/// Device id sent in the identification sentence
pub const DEFAULT_DEVICE_ID: u16 = 0x0A71;

/// Device name sent in the identification sentence
pub const DEFAULT_DEVICE_NAME: &str = "Lodestar";

/// Sensor liveness thresholds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LivenessConfig {
    /// Startup grace period before the feed is judged (ms)
    pub grace_ms: u32,
    /// Bytes that must have arrived once the grace period is over
    pub min_bytes: u32,
    /// Flag a stalled feed after this long without new bytes (ms)
    pub silence_timeout_ms: Option<u32>,
}

impl Default for LivenessConfig {
    fn default() -> Self {
        Self {
            grace_ms: 5_000,
            min_bytes: 10,
            silence_timeout_ms: None,
        }
    }
}

/// Identity announced to a newly connected peer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceIdentity {
    pub id: u16,
    pub name: String<MAX_DEVICE_NAME_LEN>,
}

impl Default for DeviceIdentity {
    fn default() -> Self {
        let mut name = String::new();
        let _ = name.push_str(DEFAULT_DEVICE_NAME);
        Self {
            id: DEFAULT_DEVICE_ID,
            name,
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for DeviceIdentity {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{=u16:#x} {=str}", self.id, self.name.as_str());
    }
}

/// Complete telemetry configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TelemetryConfig {
    /// Config format version
    pub version: u8,
    /// Nominal main-loop period (ms)
    pub tick_interval_ms: u32,
    /// Position persistence cadence (ms)
    pub persist_interval_ms: u32,
    /// Position sentence cadence while connected (ms)
    pub transmit_interval_ms: u32,
    /// Heading is hidden at or below this speed (km/h)
    pub heading_min_speed_kmh: f32,
    /// Long-press threshold for the gesture classifier (ms)
    pub long_press_ms: u32,
    /// Sensor bytes drained per tick at most
    pub max_bytes_per_tick: u16,
    pub liveness: LivenessConfig,
    pub device: DeviceIdentity,
}

impl TelemetryConfig {
    /// Current config format version
    pub const VERSION: u8 = 1;

    /// Create the default configuration
    pub fn new() -> Self {
        Self::default()
    }
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            version: Self::VERSION,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            persist_interval_ms: DEFAULT_PERSIST_INTERVAL_MS,
            transmit_interval_ms: DEFAULT_TRANSMIT_INTERVAL_MS,
            heading_min_speed_kmh: DEFAULT_HEADING_MIN_SPEED_KMH,
            long_press_ms: DEFAULT_LONG_PRESS_MS,
            max_bytes_per_tick: DEFAULT_MAX_BYTES_PER_TICK,
            liveness: LivenessConfig::default(),
            device: DeviceIdentity::default(),
        }
    }
}
