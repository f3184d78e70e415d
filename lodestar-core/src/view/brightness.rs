//! Brightness levels

/// Panel intensities, dimmest first
pub const BRIGHTNESS_TABLE: [u8; 4] = [32, 96, 160, 255];

/// Level used when nothing valid is stored
const DEFAULT_INDEX: u8 = 2;

/// Index into [`BRIGHTNESS_TABLE`], cycled by a long press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BrightnessLevel(u8);

impl BrightnessLevel {
    /// Level for a stored index; rejects indices outside the table
    pub fn from_index(index: u8) -> Option<Self> {
        if usize::from(index) < BRIGHTNESS_TABLE.len() {
            Some(Self(index))
        } else {
            None
        }
    }

    pub fn index(self) -> u8 {
        self.0
    }

    /// Successor in the cycle, wrapping to the dimmest level
    pub fn next(self) -> Self {
        Self((self.0 + 1) % BRIGHTNESS_TABLE.len() as u8)
    }

    /// Panel intensity (0-255)
    pub fn intensity(self) -> u8 {
        BRIGHTNESS_TABLE[usize::from(self.0)]
    }
}

impl Default for BrightnessLevel {
    fn default() -> Self {
        Self(DEFAULT_INDEX)
    }
}
