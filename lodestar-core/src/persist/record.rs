//! Persisted record types
//!
//! Stored as postcard binary under their own [`StorageKey`](lodestar_hal::StorageKey).

use serde::{Deserialize, Serialize};

use crate::fix::Coordinates;

/// Largest encoded record (two f64 values)
pub const MAX_RECORD_SIZE: usize = 16;

/// Position record under `StorageKey::Position`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PositionRecord {
    pub latitude: f64,
    pub longitude: f64,
}

impl PositionRecord {
    /// Only finite, in-range coordinates are accepted back from storage
    pub fn is_plausible(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

impl From<Coordinates> for PositionRecord {
    fn from(c: Coordinates) -> Self {
        Self {
            latitude: c.latitude,
            longitude: c.longitude,
        }
    }
}

impl From<PositionRecord> for Coordinates {
    fn from(r: PositionRecord) -> Self {
        Coordinates::new(r.latitude, r.longitude)
    }
}

/// Brightness record under `StorageKey::Brightness`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrightnessRecord {
    pub index: u8,
}

/// In-memory mirror of the last position written to durable storage
///
/// Once it holds a value it never goes back to empty; it is only replaced
/// by a newer valid sample.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LastKnownPosition {
    latitude: f64,
    longitude: f64,
    has_value: bool,
}

impl LastKnownPosition {
    /// Nothing known yet
    pub const fn empty() -> Self {
        Self {
            latitude: 0.0,
            longitude: 0.0,
            has_value: false,
        }
    }

    /// Seeded from a restored record
    pub fn from_coordinates(coords: Coordinates) -> Self {
        Self {
            latitude: coords.latitude,
            longitude: coords.longitude,
            has_value: true,
        }
    }

    /// Replace with a newer valid sample
    pub fn update(&mut self, coords: Coordinates) {
        self.latitude = coords.latitude;
        self.longitude = coords.longitude;
        self.has_value = true;
    }

    pub fn has_value(&self) -> bool {
        self.has_value
    }

    /// Stored coordinates, if any
    pub fn get(&self) -> Option<Coordinates> {
        if self.has_value {
            Some(Coordinates::new(self.latitude, self.longitude))
        } else {
            None
        }
    }
}
