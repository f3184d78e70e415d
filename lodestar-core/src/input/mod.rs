//! Button input
//!
//! The board samples one debounced button level per tick; the classifier
//! turns those samples into discrete gestures for the view selector.

pub mod gesture;

pub use gesture::GestureClassifier;

/// Discrete user input, one per physical gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputEvent {
    /// Press released before the long-press threshold: cycle display mode
    ShortPress,
    /// Press held past the threshold: cycle brightness
    LongPress,
}
