//! Display surface trait
//!
//! Defines the interface to the pixel/font rendering collaborator.

use crate::draw::{DrawCommand, DrawList};

/// Display surface errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Communication error with display
    Communication,
    /// Invalid coordinates or dimensions
    InvalidCoordinates,
    /// Display not initialized
    NotInitialized,
}

/// Display surface trait
///
/// Implementations map color and font classes onto whatever the panel
/// supports and own all pixel buffers.
pub trait DisplaySurface {
    /// Clear the entire display
    fn clear(&mut self) -> Result<(), DisplayError>;

    /// Draw one text command
    fn draw(&mut self, command: &DrawCommand) -> Result<(), DisplayError>;

    /// Set backlight / panel intensity (0-255)
    fn set_brightness(&mut self, intensity: u8) -> Result<(), DisplayError>;

    /// Flush buffered content to the display
    ///
    /// For displays with internal buffers, this sends the buffer to the hardware.
    fn flush(&mut self) -> Result<(), DisplayError>;
}

/// Present one frame: clear, draw every command in order, flush
///
/// A command that fails to draw does not stop the rest of the frame; the
/// first error is returned after flushing.
pub fn present<D: DisplaySurface + ?Sized>(
    surface: &mut D,
    frame: &DrawList,
    intensity: u8,
) -> Result<(), DisplayError> {
    surface.set_brightness(intensity)?;
    surface.clear()?;

    let mut first_error = None;
    for command in frame.iter() {
        if let Err(e) = surface.draw(command) {
            first_error.get_or_insert(e);
        }
    }

    surface.flush()?;
    match first_error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
