//! Lodestar telemetry core
//!
//! Board-agnostic logic of the handheld GPS unit:
//! - Fix state: the reconciled, validity-tagged sensor snapshot
//! - Feed reconciliation and sensor liveness
//! - Persistence cadence for the last good position and brightness
//! - View selection and rendering to draw lists
//! - Radio relay of position sentences to a connected peer
//! - The main loop coordinator that runs all of it once per tick
//!
//! Peripherals (sensor UART, decoder, durable store, radio, display) are
//! reached only through the traits in `lodestar-hal`, `lodestar-display`
//! and [`feed::SensorDecoder`].

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

#[macro_use]
mod fmt;

pub mod config;
pub mod coordinator;
pub mod feed;
pub mod fix;
pub mod input;
pub mod persist;
pub mod radio;
pub mod view;

#[cfg(test)]
mod testing;

pub use coordinator::{Collaborators, Telemetry, TickInput, TickReport};
