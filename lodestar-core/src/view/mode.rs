//! Display mode cycle

/// Display modes, cycled by a short press
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayMode {
    /// Position, fix quality, HDOP, UTC time
    #[default]
    Main,
    /// Constellation and stream diagnostics
    Satellites,
    /// Speed, heading, altitude
    SpeedAltitude,
}

impl DisplayMode {
    /// Number of modes in the cycle
    pub const COUNT: u8 = 3;

    /// Successor in the cycle
    pub fn next(self) -> Self {
        match self {
            DisplayMode::Main => DisplayMode::Satellites,
            DisplayMode::Satellites => DisplayMode::SpeedAltitude,
            DisplayMode::SpeedAltitude => DisplayMode::Main,
        }
    }

    /// Position in the cycle, starting at 0
    pub fn index(self) -> u8 {
        match self {
            DisplayMode::Main => 0,
            DisplayMode::Satellites => 1,
            DisplayMode::SpeedAltitude => 2,
        }
    }

    /// Title shown in the status line
    pub fn name(self) -> &'static str {
        match self {
            DisplayMode::Main => "POSITION",
            DisplayMode::Satellites => "SATELLITES",
            DisplayMode::SpeedAltitude => "MOTION",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_next_matches_index() {
        let mut mode = DisplayMode::Main;
        for i in 0..6u8 {
            assert_eq!(mode.index(), i % DisplayMode::COUNT);
            mode = mode.next();
        }
    }

    proptest! {
        #[test]
        fn prop_full_cycles_return_to_main(cycles in 0usize..50) {
            let mut mode = DisplayMode::Main;
            for _ in 0..cycles * usize::from(DisplayMode::COUNT) {
                mode = mode.next();
            }
            prop_assert_eq!(mode, DisplayMode::Main);
        }
    }
}
