//! View selector
//!
//! Sole owner of the display mode and brightness level. A short press
//! advances the mode, a long press advances the brightness; neither ever
//! touches the other.

use super::{BrightnessLevel, DisplayMode};
use crate::input::InputEvent;

/// State change caused by one input event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ViewChange {
    ModeChanged(DisplayMode),
    /// Caller persists the new level
    BrightnessChanged(BrightnessLevel),
}

/// View selector state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewSelector {
    mode: DisplayMode,
    brightness: BrightnessLevel,
}

impl ViewSelector {
    /// Start in the main view at a restored brightness
    pub fn new(brightness: BrightnessLevel) -> Self {
        Self {
            mode: DisplayMode::Main,
            brightness,
        }
    }

    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    pub fn brightness(&self) -> BrightnessLevel {
        self.brightness
    }

    /// Process an input event
    pub fn handle(&mut self, event: InputEvent) -> Option<ViewChange> {
        match event {
            InputEvent::ShortPress => {
                self.mode = self.mode.next();
                debug!("display mode -> {}", self.mode);
                Some(ViewChange::ModeChanged(self.mode))
            }
            InputEvent::LongPress => {
                self.brightness = self.brightness.next();
                debug!("brightness -> {}", self.brightness.intensity());
                Some(ViewChange::BrightnessChanged(self.brightness))
            }
        }
    }
}
