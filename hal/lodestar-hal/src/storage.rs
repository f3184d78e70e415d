//! Durable storage abstractions
//!
//! Provides the key/value contract backed by whatever non-volatile store the
//! board has (NVS partition, wear-levelled flash map, EEPROM).

/// Storage keys for persisted records
///
/// Each key holds one small postcard-encoded record. The store
/// implementation is responsible for wear levelling and integrity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum StorageKey {
    /// Last known good position (two floating-point values)
    Position = 0,
    /// Display brightness table index
    Brightness = 1,
    /// Telemetry configuration (binary postcard format)
    Config = 2,
}

impl StorageKey {
    /// Get the key as a byte value
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Create a key from a byte value
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(StorageKey::Position),
            1 => Some(StorageKey::Brightness),
            2 => Some(StorageKey::Config),
            _ => None,
        }
    }

    /// Short name, useful for namespaced stores such as ESP-IDF NVS
    pub fn name(self) -> &'static str {
        match self {
            StorageKey::Position => "pos",
            StorageKey::Brightness => "bright",
            StorageKey::Config => "config",
        }
    }
}

/// Errors from durable storage operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StorageError {
    /// Store could not be opened or the operation failed
    Unavailable,
    /// Key not found (normal at first boot)
    NotFound,
    /// Buffer too small for the data
    BufferTooSmall,
    /// Data corrupted or invalid
    Corrupted,
    /// Storage is full
    Full,
}

/// Key/value storage trait
///
/// Every call is a complete open-operate-close session: nothing is held
/// open between calls, so a failed session leaves no state behind.
pub trait KeyValueStore {
    /// Read a value by key into the provided buffer
    ///
    /// # Returns
    /// The number of bytes read, or [`StorageError::NotFound`] when the key
    /// has never been written.
    fn read(&mut self, key: StorageKey, buffer: &mut [u8]) -> Result<usize, StorageError>;

    /// Write a value by key, replacing any previous value
    fn write(&mut self, key: StorageKey, data: &[u8]) -> Result<(), StorageError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &mut T {
    fn read(&mut self, key: StorageKey, buffer: &mut [u8]) -> Result<usize, StorageError> {
        (**self).read(key, buffer)
    }

    fn write(&mut self, key: StorageKey, data: &[u8]) -> Result<(), StorageError> {
        (**self).write(key, data)
    }
}

#[cfg(feature = "sequential-storage")]
use sequential_storage::map::SerializationError;

/// Map key encoding: one byte, the key's discriminant
#[cfg(feature = "sequential-storage")]
impl sequential_storage::map::Key for StorageKey {
    fn serialize_into(&self, buffer: &mut [u8]) -> Result<usize, SerializationError> {
        let slot = buffer.first_mut().ok_or(SerializationError::BufferTooSmall)?;
        *slot = self.as_u8();
        Ok(1)
    }

    fn deserialize_from(buffer: &[u8]) -> Result<(Self, usize), SerializationError> {
        let &byte = buffer.first().ok_or(SerializationError::BufferTooSmall)?;
        let key = StorageKey::from_u8(byte).ok_or(SerializationError::InvalidFormat)?;
        Ok((key, 1))
    }
}
