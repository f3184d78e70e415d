//! Sensor decoder contract
//!
//! The sentence decoder itself is an external collaborator. The core only
//! needs it to accept bytes one at a time and report which fields changed.

use crate::fix::{Coordinates, FixField, FixQuality, UtcTime};

/// One decoded field, reported when the decoder has fresh data for it
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FieldUpdate {
    /// Latitude and longitude, always reported together
    Location(FixField<Coordinates>),
    /// Meters above mean sea level
    Altitude(FixField<f32>),
    /// Ground speed in km/h
    Speed(FixField<f32>),
    /// Course over ground in degrees true
    Course(FixField<f32>),
    Satellites(FixField<u8>),
    Hdop(FixField<f32>),
    Time(FixField<UtcTime>),
    Quality(FixField<FixQuality>),
}

/// Incremental sensor sentence decoder
///
/// # Contract
/// - `feed` never blocks and accepts any byte, including garbage
/// - `take_update` drains updates produced by previous `feed` calls, oldest
///   first, and returns `None` once none are pending
/// - the counters are running totals since the decoder was created
pub trait SensorDecoder {
    /// Consume one byte from the sensor stream
    fn feed(&mut self, byte: u8);

    /// Next pending field update, if any
    fn take_update(&mut self) -> Option<FieldUpdate>;

    /// Total bytes consumed
    fn bytes_processed(&self) -> u32;

    /// Total sentences rejected on checksum
    fn checksum_failures(&self) -> u32;
}

impl<T: SensorDecoder + ?Sized> SensorDecoder for &mut T {
    fn feed(&mut self, byte: u8) {
        (**self).feed(byte)
    }

    fn take_update(&mut self) -> Option<FieldUpdate> {
        (**self).take_update()
    }

    fn bytes_processed(&self) -> u32 {
        (**self).bytes_processed()
    }

    fn checksum_failures(&self) -> u32 {
        (**self).checksum_failures()
    }
}
