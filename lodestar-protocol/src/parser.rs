//! Byte-fed sentence validator for the receiving side of the relay.
//!
//! Resynchronises on every `$`, so a dropped byte costs at most one
//! sentence.

use heapless::Vec;

use crate::sentence::{
    checksum, hex_value, SentenceError, CHECKSUM_DELIMITER, SENTENCE_CAPACITY, SENTENCE_START,
};

/// A received sentence whose checksum matched
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedSentence {
    body: Vec<u8, SENTENCE_CAPACITY>,
}

impl ParsedSentence {
    /// Bytes strictly between `$` and `*`
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Talker/sentence identifier (first field)
    pub fn talker(&self) -> &str {
        self.fields().next().unwrap_or("")
    }

    /// Comma-separated fields, starting with the talker
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        core::str::from_utf8(&self.body).unwrap_or("").split(',')
    }
}

/// State machine for parsing incoming sentences
#[derive(Debug, Clone)]
pub struct SentenceParser {
    state: ParseState,
    body: Vec<u8, SENTENCE_CAPACITY>,
    received_checksum: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    /// Waiting for `$`
    WaitingForStart,
    /// Collecting body bytes until `*`
    ReadingBody,
    /// Expecting the high checksum digit
    ChecksumHigh,
    /// Expecting the low checksum digit
    ChecksumLow,
    /// Checksum read, waiting for `\n`
    WaitingForEnd,
}

impl Default for SentenceParser {
    fn default() -> Self {
        Self::new()
    }
}

impl SentenceParser {
    /// Create a new sentence parser
    pub fn new() -> Self {
        Self {
            state: ParseState::WaitingForStart,
            body: Vec::new(),
            received_checksum: 0,
        }
    }

    /// Reset the parser state
    pub fn reset(&mut self) {
        self.state = ParseState::WaitingForStart;
        self.body.clear();
        self.received_checksum = 0;
    }

    fn fail(&mut self, error: SentenceError) -> Result<Option<ParsedSentence>, SentenceError> {
        self.reset();
        Err(error)
    }

    /// Feed a single byte to the parser
    ///
    /// Returns `Ok(Some(sentence))` when a complete valid sentence is parsed,
    /// `Ok(None)` when more bytes are needed, or `Err` on a framing or
    /// checksum error.
    pub fn feed(&mut self, byte: u8) -> Result<Option<ParsedSentence>, SentenceError> {
        if byte == SENTENCE_START {
            // A start byte always begins a fresh sentence
            self.reset();
            self.state = ParseState::ReadingBody;
            return Ok(None);
        }

        match self.state {
            ParseState::WaitingForStart => Ok(None),
            ParseState::ReadingBody => {
                if byte == CHECKSUM_DELIMITER {
                    self.state = ParseState::ChecksumHigh;
                    return Ok(None);
                }
                if self.body.push(byte).is_err() {
                    return self.fail(SentenceError::TooLong);
                }
                Ok(None)
            }
            ParseState::ChecksumHigh => match hex_value(byte) {
                Some(digit) => {
                    self.received_checksum = digit << 4;
                    self.state = ParseState::ChecksumLow;
                    Ok(None)
                }
                None => self.fail(SentenceError::InvalidHex),
            },
            ParseState::ChecksumLow => match hex_value(byte) {
                Some(digit) => {
                    self.received_checksum |= digit;
                    self.state = ParseState::WaitingForEnd;
                    Ok(None)
                }
                None => self.fail(SentenceError::InvalidHex),
            },
            ParseState::WaitingForEnd => match byte {
                b'\r' => Ok(None),
                b'\n' => {
                    if self.received_checksum != checksum(&self.body) {
                        return self.fail(SentenceError::InvalidChecksum);
                    }
                    let sentence = ParsedSentence {
                        body: self.body.clone(),
                    };
                    self.reset();
                    Ok(Some(sentence))
                }
                _ => self.fail(SentenceError::Unterminated),
            },
        }
    }

    /// Feed multiple bytes to the parser
    ///
    /// Returns the first complete sentence found, if any.
    /// Remaining bytes after a complete sentence are not consumed.
    pub fn feed_bytes(&mut self, bytes: &[u8]) -> Result<Option<ParsedSentence>, SentenceError> {
        for &byte in bytes {
            if let Some(sentence) = self.feed(byte)? {
                return Ok(Some(sentence));
            }
        }
        Ok(None)
    }
}
