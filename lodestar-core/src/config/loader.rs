//! Configuration persistence and validation
//!
//! Loads the telemetry configuration from the durable store. Falls back to
//! defaults if the store is empty or unreadable.

use lodestar_hal::{KeyValueStore, StorageError, StorageKey};
use lodestar_protocol::SENTENCE_CAPACITY;

use super::types::TelemetryConfig;

/// Maximum serialized config size (binary)
const MAX_CONFIG_SIZE: usize = 96;

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// A cadence or threshold that must be positive is zero
    IntervalZero,
    /// Device name empty
    DeviceNameEmpty,
    /// Device name contains non-ASCII or sentence framing characters
    DeviceNameInvalid,
    /// Per-tick byte budget smaller than one sentence
    ByteBudgetTooSmall,
    /// Heading speed threshold negative or not finite
    HeadingThresholdInvalid,
    /// Storage operation failed
    Storage(StorageError),
    /// Serialization or deserialization failed
    Codec,
    /// Config version mismatch
    VersionMismatch,
}

impl From<StorageError> for ConfigError {
    fn from(e: StorageError) -> Self {
        ConfigError::Storage(e)
    }
}

impl TelemetryConfig {
    /// Check construction-time invariants
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_interval_ms == 0
            || self.persist_interval_ms == 0
            || self.transmit_interval_ms == 0
            || self.long_press_ms == 0
        {
            return Err(ConfigError::IntervalZero);
        }

        // One full sentence must be drainable per tick or the feed can
        // never catch up with a 1 Hz receiver
        if usize::from(self.max_bytes_per_tick) < SENTENCE_CAPACITY {
            return Err(ConfigError::ByteBudgetTooSmall);
        }

        if !self.heading_min_speed_kmh.is_finite() || self.heading_min_speed_kmh < 0.0 {
            return Err(ConfigError::HeadingThresholdInvalid);
        }

        let name = self.device.name.as_str();
        if name.is_empty() {
            return Err(ConfigError::DeviceNameEmpty);
        }
        if !name.is_ascii() || name.bytes().any(|b| matches!(b, b'$' | b'*' | b',')) {
            return Err(ConfigError::DeviceNameInvalid);
        }

        Ok(())
    }

    /// Load configuration from the store
    ///
    /// A missing record yields defaults (normal at first boot). An
    /// unreadable or invalid record is logged and also yields defaults.
    pub fn load<K: KeyValueStore + ?Sized>(store: &mut K) -> Self {
        match Self::load_binary(store) {
            Ok(config) => {
                info!("configuration loaded from store");
                config
            }
            Err(ConfigError::Storage(StorageError::NotFound)) => {
                debug!("no stored configuration, using defaults");
                Self::default()
            }
            Err(e) => {
                warn!("stored configuration unusable ({}), using defaults", e);
                Self::default()
            }
        }
    }

    /// Load configuration from binary postcard format
    fn load_binary<K: KeyValueStore + ?Sized>(store: &mut K) -> Result<Self, ConfigError> {
        let mut buffer = [0u8; MAX_CONFIG_SIZE];
        let len = store.read(StorageKey::Config, &mut buffer)?;

        let record = buffer.get(..len).ok_or(ConfigError::Codec)?;
        let config: TelemetryConfig =
            postcard::from_bytes(record).map_err(|_| ConfigError::Codec)?;

        if config.version != Self::VERSION {
            warn!(
                "config version mismatch: found {}, expected {}",
                config.version,
                Self::VERSION
            );
            return Err(ConfigError::VersionMismatch);
        }

        config.validate()?;
        Ok(config)
    }

    /// Write configuration to the store
    pub fn save<K: KeyValueStore + ?Sized>(&self, store: &mut K) -> Result<(), ConfigError> {
        self.validate()?;
        let mut buffer = [0u8; MAX_CONFIG_SIZE];
        let encoded = postcard::to_slice(self, &mut buffer).map_err(|_| ConfigError::Codec)?;
        store.write(StorageKey::Config, encoded)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MemoryStore;

    #[test]
    fn test_default_is_valid() {
        assert_eq!(TelemetryConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_zero_interval_rejected() {
        let config = TelemetryConfig {
            transmit_interval_ms: 0,
            ..TelemetryConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::IntervalZero));
    }

    #[test]
    fn test_small_byte_budget_rejected() {
        let config = TelemetryConfig {
            max_bytes_per_tick: 16,
            ..TelemetryConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ByteBudgetTooSmall));
    }

    #[test]
    fn test_heading_threshold_rules() {
        for bad in [f32::NAN, f32::INFINITY, -0.5] {
            let config = TelemetryConfig {
                heading_min_speed_kmh: bad,
                ..TelemetryConfig::default()
            };
            assert_eq!(config.validate(), Err(ConfigError::HeadingThresholdInvalid));
        }
        let config = TelemetryConfig {
            heading_min_speed_kmh: 0.0,
            ..TelemetryConfig::default()
        };
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_device_name_rules() {
        let mut config = TelemetryConfig::default();
        config.device.name.clear();
        assert_eq!(config.validate(), Err(ConfigError::DeviceNameEmpty));

        let _ = config.device.name.push_str("bad,name");
        assert_eq!(config.validate(), Err(ConfigError::DeviceNameInvalid));
    }

    #[test]
    fn test_missing_record_gives_defaults() {
        let mut store = MemoryStore::new();
        assert_eq!(TelemetryConfig::load(&mut store), TelemetryConfig::default());
    }

    #[test]
    fn test_save_then_load() {
        let mut store = MemoryStore::new();
        let config = TelemetryConfig {
            transmit_interval_ms: 2_000,
            persist_interval_ms: 30_000,
            ..TelemetryConfig::default()
        };
        config.save(&mut store).unwrap();
        assert_eq!(TelemetryConfig::load(&mut store), config);
    }

    #[test]
    fn test_corrupt_record_gives_defaults() {
        let mut store = MemoryStore::new();
        store.insert(StorageKey::Config, &[0xFF, 0xFF, 0xFF]);
        assert_eq!(TelemetryConfig::load(&mut store), TelemetryConfig::default());
    }

    #[test]
    fn test_oversized_read_length_gives_defaults() {
        let mut store = OverreportingStore;
        assert_eq!(TelemetryConfig::load(&mut store), TelemetryConfig::default());
    }

    /// Store that claims more bytes than the caller's buffer holds
    struct OverreportingStore;

    impl KeyValueStore for OverreportingStore {
        fn read(&mut self, _key: StorageKey, buffer: &mut [u8]) -> Result<usize, StorageError> {
            Ok(buffer.len() + 1)
        }

        fn write(&mut self, _key: StorageKey, _data: &[u8]) -> Result<(), StorageError> {
            Ok(())
        }
    }

    #[test]
    fn test_unavailable_store_gives_defaults() {
        let mut store = MemoryStore::new();
        store.set_unavailable(true);
        assert_eq!(TelemetryConfig::load(&mut store), TelemetryConfig::default());
    }
}
