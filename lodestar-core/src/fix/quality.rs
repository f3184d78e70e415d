//! Fix-quality classification

use serde::{Deserialize, Serialize};

/// Receiver fix-quality class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FixQuality {
    /// No position solution
    #[default]
    NoFix,
    /// Autonomous GNSS fix
    Standard,
    /// Differentially corrected fix
    Dgps,
    /// Real-time kinematic, float ambiguities
    FloatRtk,
    /// Real-time kinematic, fixed ambiguities
    Rtk,
}

impl FixQuality {
    /// GGA quality indicator code
    pub fn code(self) -> u8 {
        match self {
            FixQuality::NoFix => 0,
            FixQuality::Standard => 1,
            FixQuality::Dgps => 2,
            FixQuality::Rtk => 4,
            FixQuality::FloatRtk => 5,
        }
    }

    /// Map a GGA quality indicator back to a class
    ///
    /// Codes with no class here (PPS, dead reckoning, manual, simulation)
    /// return `None`.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(FixQuality::NoFix),
            1 => Some(FixQuality::Standard),
            2 => Some(FixQuality::Dgps),
            4 => Some(FixQuality::Rtk),
            5 => Some(FixQuality::FloatRtk),
            _ => None,
        }
    }

    /// Short label for the display
    pub fn label(self) -> &'static str {
        match self {
            FixQuality::NoFix => "No fix",
            FixQuality::Standard => "GPS",
            FixQuality::Dgps => "DGPS",
            FixQuality::FloatRtk => "RTK float",
            FixQuality::Rtk => "RTK",
        }
    }

    /// True for every class that carries a position solution
    pub fn has_fix(self) -> bool {
        !matches!(self, FixQuality::NoFix)
    }
}
