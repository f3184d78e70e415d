//! Sensor serial abstractions
//!
//! The positioning sensor streams ASCII sentences over a UART. The core
//! drains whatever has already been received once per tick and never waits
//! for more.

/// Errors from serial receive operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SerialError {
    /// Receive FIFO overflowed, bytes were lost
    Overrun,
    /// Framing or parity error on the line
    Framing,
    /// Port not initialised or powered down
    Unavailable,
}

/// Non-blocking sensor byte source
pub trait SensorSerial {
    /// Copy already-received bytes into `buf`
    ///
    /// Returns the number of bytes written, `Ok(0)` when nothing is pending.
    fn read_available(&mut self, buf: &mut [u8]) -> Result<usize, SerialError>;
}

impl<T: SensorSerial + ?Sized> SensorSerial for &mut T {
    fn read_available(&mut self, buf: &mut [u8]) -> Result<usize, SerialError> {
        (**self).read_available(buf)
    }
}
