//! Radio relay
//!
//! Tracks the radio link lifecycle and relays position sentences to the
//! connected peer.

pub mod relay;

pub use relay::{LinkEvent, LinkState, RelayController, TxError, TxOutcome};
