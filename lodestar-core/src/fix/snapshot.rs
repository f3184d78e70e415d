//! Fix snapshot
//!
//! Created once at startup with every field invalid and mutated in place for
//! the life of the process. Only the feed reconciler writes it.

use lodestar_protocol::{PositionFix, UtcTime};
use serde::{Deserialize, Serialize};

use super::{FixField, FixQuality};

/// A latitude/longitude pair in signed decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Reconciled snapshot of the sensor feed
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FixSnapshot {
    latitude: FixField<f64>,
    longitude: FixField<f64>,
    /// Meters above mean sea level
    altitude_m: FixField<f32>,
    speed_kmh: FixField<f32>,
    /// Degrees true, 0-360
    course_deg: FixField<f32>,
    satellites: FixField<u8>,
    hdop: FixField<f32>,
    time: FixField<UtcTime>,
    quality: FixField<FixQuality>,
    /// Bytes the decoder has consumed since startup
    bytes_processed: u32,
    /// Sentences the decoder rejected on checksum since startup
    checksum_failures: u32,
}

impl FixSnapshot {
    /// Startup snapshot: nothing known yet
    pub fn new() -> Self {
        Self::default()
    }

    pub fn latitude(&self) -> FixField<f64> {
        self.latitude
    }

    pub fn longitude(&self) -> FixField<f64> {
        self.longitude
    }

    pub fn altitude_m(&self) -> FixField<f32> {
        self.altitude_m
    }

    pub fn speed_kmh(&self) -> FixField<f32> {
        self.speed_kmh
    }

    pub fn course_deg(&self) -> FixField<f32> {
        self.course_deg
    }

    pub fn satellites(&self) -> FixField<u8> {
        self.satellites
    }

    pub fn hdop(&self) -> FixField<f32> {
        self.hdop
    }

    pub fn time(&self) -> FixField<UtcTime> {
        self.time
    }

    pub fn quality(&self) -> FixField<FixQuality> {
        self.quality
    }

    pub fn bytes_processed(&self) -> u32 {
        self.bytes_processed
    }

    pub fn checksum_failures(&self) -> u32 {
        self.checksum_failures
    }

    /// Current position, only when both latitude and longitude are valid
    pub fn position(&self) -> Option<Coordinates> {
        match (self.latitude.get(), self.longitude.get()) {
            (Some(latitude), Some(longitude)) => Some(Coordinates::new(latitude, longitude)),
            _ => None,
        }
    }

    /// Map to the sentence encoder's input, dropping invalid fields
    pub fn to_position_fix(&self) -> PositionFix {
        PositionFix {
            time: self.time.get(),
            coordinates: self.position().map(|c| (c.latitude, c.longitude)),
            quality_code: self.quality.get().map(FixQuality::code).unwrap_or(0),
            satellites: self.satellites.get(),
            hdop: self.hdop.get(),
            altitude_m: self.altitude_m.get(),
        }
    }

    pub(crate) fn set_location(&mut self, location: FixField<Coordinates>) {
        let coords = location.get().unwrap_or_default();
        let valid = location.is_valid();
        self.latitude = FixField::new(coords.latitude, valid);
        self.longitude = FixField::new(coords.longitude, valid);
    }

    pub(crate) fn set_altitude(&mut self, field: FixField<f32>) {
        self.altitude_m = field;
    }

    pub(crate) fn set_speed(&mut self, field: FixField<f32>) {
        self.speed_kmh = field;
    }

    pub(crate) fn set_course(&mut self, field: FixField<f32>) {
        self.course_deg = field;
    }

    pub(crate) fn set_satellites(&mut self, field: FixField<u8>) {
        self.satellites = field;
    }

    pub(crate) fn set_hdop(&mut self, field: FixField<f32>) {
        self.hdop = field;
    }

    pub(crate) fn set_time(&mut self, field: FixField<UtcTime>) {
        self.time = field;
    }

    pub(crate) fn set_quality(&mut self, field: FixField<FixQuality>) {
        self.quality = field;
    }

    /// Raise the counters to the decoder's totals; they never go backwards
    pub(crate) fn sync_counters(&mut self, bytes_processed: u32, checksum_failures: u32) {
        self.bytes_processed = self.bytes_processed.max(bytes_processed);
        self.checksum_failures = self.checksum_failures.max(checksum_failures);
    }
}
