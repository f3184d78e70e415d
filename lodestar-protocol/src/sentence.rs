//! Sentence framing and checksum.
//!
//! Sentence format:
//! - `$` start delimiter
//! - talker/sentence identifier
//! - zero or more `,`-prefixed fields
//! - `*` followed by the checksum as two uppercase hex digits
//! - `\r\n` terminator

use core::fmt;

use heapless::Vec;

/// Capacity of a sentence buffer in bytes
///
/// Every encoder in this crate asserts at compile time that its worst-case
/// output fits.
pub const SENTENCE_CAPACITY: usize = 96;

/// Start delimiter
pub const SENTENCE_START: u8 = b'$';

/// Checksum delimiter
pub const CHECKSUM_DELIMITER: u8 = b'*';

/// Field separator
pub const FIELD_SEPARATOR: u8 = b',';

/// Length of the `*HH\r\n` trailer
pub const TRAILER_LEN: usize = 5;

const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

/// Errors that can occur during sentence encoding or validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SentenceError {
    /// Sentence does not fit the buffer
    BufferTooSmall,
    /// Field text contains a framing character (`$`, `*`, `,`) or non-ASCII
    InvalidField,
    /// Line does not begin with `$`
    MissingStart,
    /// No `*` checksum delimiter, or fewer than two digits after it
    MissingChecksum,
    /// Checksum digits are not hexadecimal
    InvalidHex,
    /// Checksum mismatch
    InvalidChecksum,
    /// Line exceeded the buffer before its checksum
    TooLong,
    /// Unexpected byte after the checksum digits
    Unterminated,
}

/// XOR checksum over the sentence body
///
/// `body` is the bytes strictly between `$` and `*`.
pub fn checksum(body: &[u8]) -> u8 {
    body.iter().fold(0u8, |acc, &byte| acc ^ byte)
}

/// Decode one ASCII hex digit (either case)
pub(crate) fn hex_value(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        _ => None,
    }
}

/// A complete, framed sentence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sentence {
    bytes: Vec<u8, SENTENCE_CAPACITY>,
}

impl Sentence {
    /// Raw bytes including `$` and the CRLF terminator
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Sentence as text
    pub fn as_str(&self) -> &str {
        // Only ASCII is ever written
        core::str::from_utf8(&self.bytes).unwrap_or("")
    }

    /// Total length in bytes
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Always false for a finished sentence
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Bytes strictly between `$` and `*`
    pub fn body(&self) -> &[u8] {
        let end = self.bytes.len().saturating_sub(TRAILER_LEN);
        self.bytes.get(1..end).unwrap_or(&[])
    }

    /// Checksum of the body, as written in the trailer
    pub fn checksum(&self) -> u8 {
        checksum(self.body())
    }
}

/// Incremental sentence builder
///
/// Tracks the running checksum as fields are appended.
pub struct SentenceWriter {
    bytes: Vec<u8, SENTENCE_CAPACITY>,
    checksum: u8,
}

impl SentenceWriter {
    /// Start a sentence with the given talker/sentence identifier
    pub fn new(talker: &str) -> Result<Self, SentenceError> {
        let mut writer = Self {
            bytes: Vec::new(),
            checksum: 0,
        };
        writer
            .bytes
            .push(SENTENCE_START)
            .map_err(|_| SentenceError::BufferTooSmall)?;
        writer.push_text(talker)?;
        Ok(writer)
    }

    fn push_body(&mut self, bytes: &[u8]) -> Result<(), SentenceError> {
        self.bytes
            .extend_from_slice(bytes)
            .map_err(|_| SentenceError::BufferTooSmall)?;
        self.checksum ^= checksum(bytes);
        Ok(())
    }

    fn push_text(&mut self, text: &str) -> Result<(), SentenceError> {
        let framing = |b: &u8| matches!(*b, SENTENCE_START | CHECKSUM_DELIMITER | FIELD_SEPARATOR);
        if !text.is_ascii() || text.as_bytes().iter().any(framing) {
            return Err(SentenceError::InvalidField);
        }
        self.push_body(text.as_bytes())
    }

    /// Append a literal text field
    pub fn field(&mut self, text: &str) -> Result<&mut Self, SentenceError> {
        self.push_body(&[FIELD_SEPARATOR])?;
        self.push_text(text)?;
        Ok(self)
    }

    /// Append an empty field
    pub fn empty_field(&mut self) -> Result<&mut Self, SentenceError> {
        self.push_body(&[FIELD_SEPARATOR])?;
        Ok(self)
    }

    /// Append a formatted field
    ///
    /// Callers only format numbers here, so no framing check is made.
    pub fn field_fmt(&mut self, args: fmt::Arguments<'_>) -> Result<&mut Self, SentenceError> {
        self.push_body(&[FIELD_SEPARATOR])?;
        fmt::Write::write_fmt(self, args).map_err(|_| SentenceError::BufferTooSmall)?;
        Ok(self)
    }

    /// Close the sentence with `*HH\r\n`
    pub fn finish(mut self) -> Result<Sentence, SentenceError> {
        let cs = self.checksum;
        let trailer = [
            CHECKSUM_DELIMITER,
            HEX_DIGITS[(cs >> 4) as usize],
            HEX_DIGITS[(cs & 0x0F) as usize],
            b'\r',
            b'\n',
        ];
        self.bytes
            .extend_from_slice(&trailer)
            .map_err(|_| SentenceError::BufferTooSmall)?;
        Ok(Sentence { bytes: self.bytes })
    }
}

impl fmt::Write for SentenceWriter {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.push_body(s.as_bytes()).map_err(|_| fmt::Error)
    }
}

/// Validate a single sentence line
///
/// Trailing `\r\n` is optional. Returns the body on success.
pub fn verify(line: &[u8]) -> Result<&[u8], SentenceError> {
    if line.first() != Some(&SENTENCE_START) {
        return Err(SentenceError::MissingStart);
    }

    let star = line
        .iter()
        .position(|&b| b == CHECKSUM_DELIMITER)
        .ok_or(SentenceError::MissingChecksum)?;
    let body = &line[1..star];

    let digits = line
        .get(star + 1..star + 3)
        .ok_or(SentenceError::MissingChecksum)?;
    let hi = hex_value(digits[0]).ok_or(SentenceError::InvalidHex)?;
    let lo = hex_value(digits[1]).ok_or(SentenceError::InvalidHex)?;

    if ((hi << 4) | lo) != checksum(body) {
        return Err(SentenceError::InvalidChecksum);
    }

    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checksum_empty_body() {
        assert_eq!(checksum(b""), 0);
    }

    #[test]
    fn test_checksum_known_value() {
        // 'A' ^ 'B' = 0x41 ^ 0x42 = 0x03
        assert_eq!(checksum(b"AB"), 0x03);
    }

    #[test]
    fn test_writer_framing() {
        let mut writer = SentenceWriter::new("PXYZ").unwrap();
        writer.field("1").unwrap().empty_field().unwrap();
        let sentence = writer.finish().unwrap();

        assert_eq!(sentence.body(), b"PXYZ,1,");
        assert!(sentence.as_str().starts_with("$PXYZ,1,*"));
        assert!(sentence.as_str().ends_with("\r\n"));
        assert_eq!(sentence.checksum(), checksum(b"PXYZ,1,"));
        assert!(verify(sentence.as_bytes()).is_ok());
    }

    #[test]
    fn test_writer_uppercase_hex() {
        // "PZ" = 0x50 ^ 0x5A = 0x0A
        let sentence = SentenceWriter::new("PZ").unwrap().finish().unwrap();
        assert_eq!(sentence.as_str(), "$PZ*0A\r\n");
    }

    #[test]
    fn test_writer_rejects_framing_chars() {
        let mut writer = SentenceWriter::new("PXYZ").unwrap();
        assert_eq!(writer.field("a*b").err(), Some(SentenceError::InvalidField));
        assert_eq!(writer.field("a,b").err(), Some(SentenceError::InvalidField));
        assert_eq!(writer.field("$").err(), Some(SentenceError::InvalidField));
    }

    #[test]
    fn test_writer_overflow() {
        let mut writer = SentenceWriter::new("PXYZ").unwrap();
        let long = "0123456789";
        let mut result = Ok(());
        for _ in 0..10 {
            if let Err(e) = writer.field(long) {
                result = Err(e);
                break;
            }
        }
        assert_eq!(result, Err(SentenceError::BufferTooSmall));
    }

    #[test]
    fn test_verify_errors() {
        assert_eq!(verify(b"GPGGA*00"), Err(SentenceError::MissingStart));
        assert_eq!(verify(b"$GPGGA,1"), Err(SentenceError::MissingChecksum));
        assert_eq!(verify(b"$GPGGA*0"), Err(SentenceError::MissingChecksum));
        assert_eq!(verify(b"$GPGGA*ZZ"), Err(SentenceError::InvalidHex));
        assert_eq!(verify(b"$AB*04"), Err(SentenceError::InvalidChecksum));
    }

    #[test]
    fn test_verify_lowercase_hex() {
        // "PZ" checksum is 0x0A
        assert_eq!(verify(b"$PZ*0a\r\n"), Ok(&b"PZ"[..]));
    }
}
