//! Lodestar Relay Sentence Protocol
//!
//! This crate defines the ASCII sentences the handheld relays to a paired
//! peer over the radio link. Both sentences share one framing:
//!
//! ```text
//! ┌───┬────────┬──────────────────────┬───┬──────────┬──────┐
//! │ $ │ TALKER │ ,FIELD,FIELD,...     │ * │ HH (hex) │ CRLF │
//! └───┴────────┴──────────────────────┴───┴──────────┴──────┘
//! ```
//!
//! The checksum is the XOR of every byte strictly between `$` and `*`,
//! rendered as two uppercase hex digits.
//!
//! - [`position`] encodes the standard GGA position-fix sentence
//! - [`ident`] encodes the `PATOM` identification sentence sent on connect
//! - [`parser`] validates sentences byte by byte on the receiving side

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod ident;
pub mod parser;
pub mod position;
pub mod sentence;

pub use ident::{encode_identification, IDENT_TALKER, MAX_DEVICE_NAME_LEN};
pub use parser::{ParsedSentence, SentenceParser};
pub use position::{encode_position, PositionFix, UtcTime, POSITION_TALKER};
pub use sentence::{checksum, verify, Sentence, SentenceError, SentenceWriter, SENTENCE_CAPACITY};
