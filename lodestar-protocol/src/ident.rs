//! Identification sentence
//!
//! Sent once each time a peer connects so it can tell which unit is talking:
//!
//! ```text
//! $PATOM,<id as 4 hex digits>,<device name>*CS\r\n
//! ```

use crate::sentence::{Sentence, SentenceError, SentenceWriter, SENTENCE_CAPACITY};

/// Proprietary talker for the identification sentence
pub const IDENT_TALKER: &str = "PATOM";

/// Longest device name the identification sentence carries
pub const MAX_DEVICE_NAME_LEN: usize = 16;

/// `$PATOM` (6) + `,XXXX` (5) + `,` + name + trailer (5)
const MAX_IDENT_SENTENCE_LEN: usize = 6 + 5 + 1 + MAX_DEVICE_NAME_LEN + 5;

const _: () = assert!(MAX_IDENT_SENTENCE_LEN <= SENTENCE_CAPACITY);

/// Encode the identification sentence
///
/// Names longer than [`MAX_DEVICE_NAME_LEN`] are rejected with
/// [`SentenceError::BufferTooSmall`]; names containing framing characters
/// with [`SentenceError::InvalidField`].
pub fn encode_identification(device_id: u16, device_name: &str) -> Result<Sentence, SentenceError> {
    if device_name.len() > MAX_DEVICE_NAME_LEN {
        return Err(SentenceError::BufferTooSmall);
    }

    let mut writer = SentenceWriter::new(IDENT_TALKER)?;
    writer
        .field_fmt(format_args!("{:04X}", device_id))?
        .field(device_name)?;
    writer.finish()
}
