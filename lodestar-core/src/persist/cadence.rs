//! Persistence cadence controller
//!
//! Position writes are rate limited to one attempt per interval and only
//! happen while the live fix is valid. Brightness writes happen as soon as
//! the setting changes. A failed write never takes anything down: the
//! in-memory state stays authoritative and the next attempt catches up.

use lodestar_hal::{KeyValueStore, StorageError, StorageKey};

use super::record::{BrightnessRecord, LastKnownPosition, PositionRecord, MAX_RECORD_SIZE};
use crate::fix::{Coordinates, FixSnapshot};
use crate::view::BrightnessLevel;

/// Persistence errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PersistError {
    /// Store rejected the write
    Storage(StorageError),
    /// Record could not be encoded
    Encode,
}

impl From<StorageError> for PersistError {
    fn from(e: StorageError) -> Self {
        PersistError::Storage(e)
    }
}

/// Why a position write did not happen this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SkipReason {
    /// Live position invalid
    NoFix,
    /// Last attempt was less than one interval ago
    NotDue,
}

/// Result of one cadence check
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PersistOutcome {
    Skipped(SkipReason),
    Written(Coordinates),
    Failed(PersistError),
}

/// State read back from the store at startup
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Restored {
    pub last_known: LastKnownPosition,
    pub brightness: BrightnessLevel,
}

/// Persistence cadence controller
#[derive(Debug, Clone)]
pub struct PersistenceController {
    /// Minimum spacing between position attempts (ms)
    interval_ms: u32,
    /// Timestamp of the last position attempt (ms)
    last_attempt_ms: Option<u32>,
    /// Mirror of the last position handed to the store
    last_known: LastKnownPosition,
    /// Successful store writes since startup
    writes: u32,
    /// Failed store writes since startup
    failures: u32,
}

impl PersistenceController {
    /// Create a controller seeded with the restored position
    pub fn new(interval_ms: u32, last_known: LastKnownPosition) -> Self {
        Self {
            interval_ms,
            last_attempt_ms: None,
            last_known,
            writes: 0,
            failures: 0,
        }
    }

    /// Read persisted state once at startup
    ///
    /// Missing keys are normal at first boot. Unreadable or implausible
    /// records are logged and treated as missing.
    pub fn restore<K: KeyValueStore + ?Sized>(store: &mut K) -> Restored {
        let last_known = match read_record::<PositionRecord, K>(store, StorageKey::Position) {
            Some(record) if record.is_plausible() => {
                info!(
                    "restored last position {} {}",
                    record.latitude, record.longitude
                );
                LastKnownPosition::from_coordinates(record.into())
            }
            Some(_) => {
                warn!("stored position out of range, ignoring");
                LastKnownPosition::empty()
            }
            None => LastKnownPosition::empty(),
        };

        let brightness = read_record::<BrightnessRecord, K>(store, StorageKey::Brightness)
            .and_then(|record| BrightnessLevel::from_index(record.index))
            .unwrap_or_default();

        Restored {
            last_known,
            brightness,
        }
    }

    /// Position currently mirrored in memory
    pub fn last_known(&self) -> LastKnownPosition {
        self.last_known
    }

    /// Successful position and brightness writes since startup
    pub fn writes(&self) -> u32 {
        self.writes
    }

    /// Failed position and brightness writes since startup
    pub fn failures(&self) -> u32 {
        self.failures
    }

    /// Write the live position if it is valid and an interval has passed
    ///
    /// The first valid fix of a session is written straight away.
    pub fn maybe_persist<K: KeyValueStore + ?Sized>(
        &mut self,
        now_ms: u32,
        snapshot: &FixSnapshot,
        store: &mut K,
    ) -> PersistOutcome {
        let Some(coords) = snapshot.position() else {
            return PersistOutcome::Skipped(SkipReason::NoFix);
        };

        if let Some(last) = self.last_attempt_ms {
            if now_ms.wrapping_sub(last) < self.interval_ms {
                return PersistOutcome::Skipped(SkipReason::NotDue);
            }
        }

        self.last_attempt_ms = Some(now_ms);
        self.last_known.update(coords);

        match write_record(store, StorageKey::Position, &PositionRecord::from(coords)) {
            Ok(()) => {
                self.writes = self.writes.saturating_add(1);
                debug!("position persisted");
                PersistOutcome::Written(coords)
            }
            Err(e) => {
                self.failures = self.failures.saturating_add(1);
                warn!("position persist failed: {}", e);
                PersistOutcome::Failed(e)
            }
        }
    }

    /// Write the brightness setting immediately
    pub fn persist_brightness<K: KeyValueStore + ?Sized>(
        &mut self,
        level: BrightnessLevel,
        store: &mut K,
    ) -> Result<(), PersistError> {
        let record = BrightnessRecord {
            index: level.index(),
        };
        match write_record(store, StorageKey::Brightness, &record) {
            Ok(()) => {
                self.writes = self.writes.saturating_add(1);
                Ok(())
            }
            Err(e) => {
                self.failures = self.failures.saturating_add(1);
                warn!("brightness persist failed: {}", e);
                Err(e)
            }
        }
    }
}

fn read_record<T, K>(store: &mut K, key: StorageKey) -> Option<T>
where
    T: serde::de::DeserializeOwned,
    K: KeyValueStore + ?Sized,
{
    let mut buffer = [0u8; MAX_RECORD_SIZE];
    match store.read(key, &mut buffer) {
        Ok(len) => match postcard::from_bytes(&buffer[..len.min(MAX_RECORD_SIZE)]) {
            Ok(record) => Some(record),
            Err(_) => {
                warn!("stored record {} corrupt", key);
                None
            }
        },
        Err(StorageError::NotFound) => None,
        Err(e) => {
            warn!("reading {} failed: {}", key, e);
            None
        }
    }
}

fn write_record<T, K>(store: &mut K, key: StorageKey, record: &T) -> Result<(), PersistError>
where
    T: serde::Serialize,
    K: KeyValueStore + ?Sized,
{
    let mut buffer = [0u8; MAX_RECORD_SIZE];
    let encoded = postcard::to_slice(record, &mut buffer).map_err(|_| PersistError::Encode)?;
    store.write(key, encoded)?;
    Ok(())
}
