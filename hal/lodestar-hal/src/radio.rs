//! Short-range radio link abstraction
//!
//! The radio stack owns connection and advertising machinery. The core only
//! hears about connect/disconnect edges and pushes notify payloads while a
//! peer is attached.

/// Errors from radio operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RadioError {
    /// No peer is attached
    NotConnected,
    /// Stack queue full, payload not accepted
    Busy,
    /// Any other link-layer failure
    Link,
}

/// Radio link trait
///
/// Implementations must not block waiting for the peer. A payload that
/// cannot be queued should be rejected with [`RadioError::Busy`].
pub trait RadioLink {
    /// Push a payload to the connected peer
    fn notify(&mut self, data: &[u8]) -> Result<(), RadioError>;

    /// Make the device discoverable again
    fn start_advertising(&mut self) -> Result<(), RadioError>;
}

impl<T: RadioLink + ?Sized> RadioLink for &mut T {
    fn notify(&mut self, data: &[u8]) -> Result<(), RadioError> {
        (**self).notify(data)
    }

    fn start_advertising(&mut self) -> Result<(), RadioError> {
        (**self).start_advertising()
    }
}
