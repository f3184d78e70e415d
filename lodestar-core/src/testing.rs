//! In-memory collaborator fakes for unit tests

use std::collections::{BTreeMap, VecDeque};

use lodestar_display::{DisplayError, DisplaySurface, DrawCommand};
use lodestar_hal::{
    KeyValueStore, RadioError, RadioLink, SensorSerial, SerialError, StorageError, StorageKey,
};

use crate::feed::{FieldUpdate, SensorDecoder};

/// Key/value store backed by a map
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: BTreeMap<u8, Vec<u8>>,
    unavailable: bool,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a raw record
    pub fn insert(&mut self, key: StorageKey, data: &[u8]) {
        self.records.insert(key.as_u8(), data.to_vec());
    }

    /// Make every read and write fail with `Unavailable`
    pub fn set_unavailable(&mut self, unavailable: bool) {
        self.unavailable = unavailable;
    }

    /// Successful writes so far
    pub fn write_count(&self) -> usize {
        self.writes
    }
}

impl KeyValueStore for MemoryStore {
    fn read(&mut self, key: StorageKey, buffer: &mut [u8]) -> Result<usize, StorageError> {
        if self.unavailable {
            return Err(StorageError::Unavailable);
        }
        let data = self.records.get(&key.as_u8()).ok_or(StorageError::NotFound)?;
        if data.len() > buffer.len() {
            return Err(StorageError::BufferTooSmall);
        }
        buffer[..data.len()].copy_from_slice(data);
        Ok(data.len())
    }

    fn write(&mut self, key: StorageKey, data: &[u8]) -> Result<(), StorageError> {
        if self.unavailable {
            return Err(StorageError::Unavailable);
        }
        self.records.insert(key.as_u8(), data.to_vec());
        self.writes += 1;
        Ok(())
    }
}

/// Byte source that hands out a fixed script
#[derive(Debug, Default)]
pub struct ScriptedSerial {
    pending: VecDeque<u8>,
    fail_next: Option<SerialError>,
}

impl ScriptedSerial {
    pub fn new(bytes: &[u8]) -> Self {
        Self {
            pending: bytes.iter().copied().collect(),
            fail_next: None,
        }
    }

    /// Queue more bytes behind the script
    pub fn extend(&mut self, bytes: &[u8]) {
        self.pending.extend(bytes.iter().copied());
    }

    /// Fail the next read once
    pub fn fail_with(&mut self, error: SerialError) {
        self.fail_next = Some(error);
    }

    pub fn remaining(&self) -> usize {
        self.pending.len()
    }
}

impl SensorSerial for ScriptedSerial {
    fn read_available(&mut self, buf: &mut [u8]) -> Result<usize, SerialError> {
        if let Some(e) = self.fail_next.take() {
            return Err(e);
        }
        let mut n = 0;
        while n < buf.len() {
            match self.pending.pop_front() {
                Some(byte) => {
                    buf[n] = byte;
                    n += 1;
                }
                None => break,
            }
        }
        Ok(n)
    }
}

/// Decoder that releases canned updates once enough bytes were fed
#[derive(Debug, Default)]
pub struct ScriptedDecoder {
    /// (byte count, update), released in order
    script: VecDeque<(u32, FieldUpdate)>,
    ready: VecDeque<FieldUpdate>,
    bytes: u32,
    checksum_failures: u32,
}

impl ScriptedDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Release `update` once `bytes` bytes have been fed in total
    pub fn emit_after(&mut self, bytes: u32, update: FieldUpdate) {
        self.script.push_back((bytes, update));
    }

    pub fn set_checksum_failures(&mut self, count: u32) {
        self.checksum_failures = count;
    }
}

impl SensorDecoder for ScriptedDecoder {
    fn feed(&mut self, _byte: u8) {
        self.bytes += 1;
        while let Some(&(at, update)) = self.script.front() {
            if at > self.bytes {
                break;
            }
            self.script.pop_front();
            self.ready.push_back(update);
        }
    }

    fn take_update(&mut self) -> Option<FieldUpdate> {
        self.ready.pop_front()
    }

    fn bytes_processed(&self) -> u32 {
        self.bytes
    }

    fn checksum_failures(&self) -> u32 {
        self.checksum_failures
    }
}

/// Radio that records every notified payload
#[derive(Debug, Default)]
pub struct RecordingRadio {
    sent: Vec<Vec<u8>>,
    advertise_requests: usize,
    fail_next: Option<RadioError>,
}

impl RecordingRadio {
    pub fn new() -> Self {
        Self::default()
    }

    /// Payloads delivered so far, oldest first
    pub fn sent(&self) -> &[Vec<u8>] {
        &self.sent
    }

    pub fn advertise_requests(&self) -> usize {
        self.advertise_requests
    }

    /// Fail the next radio call once
    pub fn fail_next(&mut self, error: RadioError) {
        self.fail_next = Some(error);
    }
}

impl RadioLink for RecordingRadio {
    fn notify(&mut self, data: &[u8]) -> Result<(), RadioError> {
        if let Some(e) = self.fail_next.take() {
            return Err(e);
        }
        self.sent.push(data.to_vec());
        Ok(())
    }

    fn start_advertising(&mut self) -> Result<(), RadioError> {
        if let Some(e) = self.fail_next.take() {
            return Err(e);
        }
        self.advertise_requests += 1;
        Ok(())
    }
}

/// Display that keeps the last presented frame
#[derive(Debug, Default)]
pub struct RecordingDisplay {
    current: Vec<DrawCommand>,
    frames: usize,
    intensity: Option<u8>,
    failing: bool,
}

impl RecordingDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every call fail with `Communication`
    pub fn set_failing(&mut self, failing: bool) {
        self.failing = failing;
    }

    /// Frames flushed so far
    pub fn frames(&self) -> usize {
        self.frames
    }

    pub fn last_intensity(&self) -> Option<u8> {
        self.intensity
    }

    /// Commands drawn since the last clear
    pub fn commands(&self) -> &[DrawCommand] {
        &self.current
    }

    fn check(&self) -> Result<(), DisplayError> {
        if self.failing {
            Err(DisplayError::Communication)
        } else {
            Ok(())
        }
    }
}

impl DisplaySurface for RecordingDisplay {
    fn clear(&mut self) -> Result<(), DisplayError> {
        self.check()?;
        self.current.clear();
        Ok(())
    }

    fn draw(&mut self, command: &DrawCommand) -> Result<(), DisplayError> {
        self.check()?;
        self.current.push(command.clone());
        Ok(())
    }

    fn set_brightness(&mut self, intensity: u8) -> Result<(), DisplayError> {
        self.check()?;
        self.intensity = Some(intensity);
        Ok(())
    }

    fn flush(&mut self) -> Result<(), DisplayError> {
        self.check()?;
        self.frames += 1;
        Ok(())
    }
}
