//! Feed reconciler
//!
//! Copies decoder output into the snapshot. Each update replaces one whole
//! field (value and validity together), so a field is never observed half
//! written, and re-applying an identical update changes nothing.

use lodestar_hal::{SensorSerial, SerialError};

use super::decoder::{FieldUpdate, SensorDecoder};
use crate::fix::FixSnapshot;

/// Bytes read from the serial port per `read_available` call
const READ_CHUNK: usize = 64;

/// Outcome of one drain pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DrainStats {
    /// Bytes fed to the decoder this pass
    pub bytes: usize,
    /// Field updates applied to the snapshot this pass
    pub updates: usize,
    /// Serial error that ended the pass early
    pub serial_error: Option<SerialError>,
}

/// Sensor feed reconciler
#[derive(Debug, Clone)]
pub struct FeedReconciler {
    /// Most bytes drained in a single tick
    byte_budget: usize,
    /// Serial errors seen since startup
    serial_errors: u32,
}

impl FeedReconciler {
    /// Create a reconciler that drains at most `byte_budget` bytes per tick
    pub fn new(byte_budget: usize) -> Self {
        Self {
            byte_budget,
            serial_errors: 0,
        }
    }

    /// Serial errors seen since startup
    pub fn serial_errors(&self) -> u32 {
        self.serial_errors
    }

    /// Copy one decoded field into the snapshot
    pub fn apply(snapshot: &mut FixSnapshot, update: FieldUpdate) {
        match update {
            FieldUpdate::Location(field) => snapshot.set_location(field),
            FieldUpdate::Altitude(field) => snapshot.set_altitude(field),
            FieldUpdate::Speed(field) => snapshot.set_speed(field),
            FieldUpdate::Course(field) => snapshot.set_course(field),
            FieldUpdate::Satellites(field) => snapshot.set_satellites(field),
            FieldUpdate::Hdop(field) => snapshot.set_hdop(field),
            FieldUpdate::Time(field) => snapshot.set_time(field),
            FieldUpdate::Quality(field) => snapshot.set_quality(field),
        }
    }

    /// Drain pending sensor bytes through the decoder into the snapshot
    ///
    /// Stops when the port has nothing more, the byte budget is spent, or the
    /// port reports an error. Never waits for data.
    pub fn drain<S, D>(
        &mut self,
        serial: &mut S,
        decoder: &mut D,
        snapshot: &mut FixSnapshot,
    ) -> DrainStats
    where
        S: SensorSerial + ?Sized,
        D: SensorDecoder + ?Sized,
    {
        let mut stats = DrainStats::default();
        let mut chunk = [0u8; READ_CHUNK];

        while stats.bytes < self.byte_budget {
            let want = (self.byte_budget - stats.bytes).min(READ_CHUNK);
            let read = match serial.read_available(&mut chunk[..want]) {
                Ok(0) => break,
                Ok(n) => n.min(want),
                Err(e) => {
                    self.serial_errors = self.serial_errors.saturating_add(1);
                    warn!("sensor serial error: {}", e);
                    stats.serial_error = Some(e);
                    break;
                }
            };

            for &byte in &chunk[..read] {
                decoder.feed(byte);
                while let Some(update) = decoder.take_update() {
                    Self::apply(snapshot, update);
                    stats.updates += 1;
                }
            }
            stats.bytes += read;
        }

        snapshot.sync_counters(decoder.bytes_processed(), decoder.checksum_failures());

        if stats.bytes > 0 {
            trace!("drained {} bytes, {} updates", stats.bytes, stats.updates);
        }
        stats
    }
}
