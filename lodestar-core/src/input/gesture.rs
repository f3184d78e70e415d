//! Press gesture classifier
//!
//! Classifies a debounced button level into short and long presses. Uses a
//! small state machine so a hold and a click are mutually exclusive:
//!
//! ```text
//! Released --press--> Pressed --held >= threshold--> Held (emit LongPress)
//!    ^                   |                             |
//!    +--release----------+ (emit ShortPress)           |
//!    +--release------------------------------------------+ (emit nothing)
//! ```

use super::InputEvent;

/// Classifier states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Released,
    /// Button down since the given timestamp (ms)
    Pressed(u32),
    /// Long press already reported; waiting for release
    Held,
}

/// Button gesture classifier
#[derive(Debug, Clone)]
pub struct GestureClassifier {
    long_press_ms: u32,
    state: State,
}

impl GestureClassifier {
    /// Create a classifier with the given long-press threshold
    pub fn new(long_press_ms: u32) -> Self {
        Self {
            long_press_ms,
            state: State::Released,
        }
    }

    /// Feed the current button level
    ///
    /// Returns at most one event per physical gesture. Should be called
    /// every tick, pressed or not, so holds are timed.
    pub fn update(&mut self, pressed: bool, now_ms: u32) -> Option<InputEvent> {
        match (self.state, pressed) {
            (State::Released, true) => {
                self.state = State::Pressed(now_ms);
                None
            }
            (State::Released, false) => None,
            (State::Pressed(since), true) => {
                if now_ms.wrapping_sub(since) >= self.long_press_ms {
                    self.state = State::Held;
                    return Some(InputEvent::LongPress);
                }
                None
            }
            (State::Pressed(_), false) => {
                self.state = State::Released;
                Some(InputEvent::ShortPress)
            }
            (State::Held, true) => None,
            (State::Held, false) => {
                self.state = State::Released;
                None
            }
        }
    }

    /// True while the button is down
    pub fn is_pressed(&self) -> bool {
        !matches!(self.state, State::Released)
    }
}
