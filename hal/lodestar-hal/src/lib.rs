//! Lodestar Hardware Abstraction Layer
//!
//! This crate defines the contracts the telemetry core expects from the
//! peripherals it does not own: the durable key/value store, the short-range
//! radio link, and the serial port the positioning sensor talks on.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  lodestar-core (telemetry state machine)│
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  lodestar-hal (this crate - traits)     │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┼───────────┐
//!         ▼           ▼           ▼
//!    NVS / flash   BLE stack   GPS UART
//! ```
//!
//! # Traits
//!
//! - [`storage::KeyValueStore`] - Persistent key/value records
//! - [`radio::RadioLink`] - Notify-style radio writes and advertising
//! - [`serial::SensorSerial`] - Non-blocking sensor byte source
//!
//! All calls are expected to return promptly. The core runs on a single
//! cooperative tick, so an implementation that blocks stalls every other
//! subsystem until it returns.

#![no_std]
#![deny(unsafe_code)]

pub mod radio;
pub mod serial;
pub mod storage;

// Re-export key traits at crate root for convenience
pub use radio::{RadioError, RadioLink};
pub use serial::{SensorSerial, SerialError};
pub use storage::{KeyValueStore, StorageError, StorageKey};
