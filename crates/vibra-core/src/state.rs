//! Fixed-layout raw parameter dumps for host save/restore.
//!
//! Each engine persists its parameters as a flat byte sequence: one leading
//! padding byte, then every field in a fixed order at its natural width.
//! Multi-byte fields are little-endian. There is no header, version, or
//! checksum; the layout itself is the format.
//!
//! ```text
//! [pad:u8][field 0][field 1]...[field n]
//! ```
//!
//! Decoding never panics: running out of bytes yields
//! [`StateError::Truncated`]. Bytes past the last field are ignored.

#[cfg(not(feature = "std"))]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std as alloc;

use alloc::vec::Vec;

/// Errors that can occur while decoding a state blob.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateError {
    /// The blob ended before a field could be read.
    Truncated {
        /// Bytes the field needed.
        needed: usize,
        /// Bytes left in the blob.
        remaining: usize,
    },
    /// A wave type field held an unknown discriminant.
    InvalidWaveType(i32),
    /// A mode field held an unknown discriminant.
    InvalidMode(u8),
}

impl core::fmt::Display for StateError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Truncated { needed, remaining } => {
                write!(f, "state truncated: needed {needed} bytes, {remaining} remaining")
            }
            Self::InvalidWaveType(v) => write!(f, "invalid wave type {v}"),
            Self::InvalidMode(v) => write!(f, "invalid mode {v}"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for StateError {}

/// Appends fields to a state blob.
///
/// # Example
///
/// ```rust
/// use vibra_core::{StateReader, StateWriter};
///
/// let mut writer = StateWriter::new();
/// writer.write_f64(0.25);
/// writer.write_bool(true);
/// let bytes = writer.finish();
/// assert_eq!(bytes.len(), 1 + 8 + 1);
///
/// let mut reader = StateReader::new(&bytes).unwrap();
/// assert_eq!(reader.read_f64().unwrap(), 0.25);
/// assert!(reader.read_bool().unwrap());
/// ```
#[derive(Debug, Clone)]
pub struct StateWriter {
    bytes: Vec<u8>,
}

impl Default for StateWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl StateWriter {
    /// Start a blob; the leading padding byte is written immediately.
    pub fn new() -> Self {
        let mut bytes = Vec::with_capacity(96);
        bytes.push(0);
        Self { bytes }
    }

    /// Append an `f64`.
    pub fn write_f64(&mut self, value: f64) {
        self.bytes.extend_from_slice(&value.to_le_bytes());
    }

    /// Append an `f32`.
    pub fn write_f32(&mut self, value: f32) {
        self.bytes.extend_from_slice(&value.to_le_bytes());
    }

    /// Append an `i32`.
    pub fn write_i32(&mut self, value: i32) {
        self.bytes.extend_from_slice(&value.to_le_bytes());
    }

    /// Append a single byte.
    pub fn write_u8(&mut self, value: u8) {
        self.bytes.push(value);
    }

    /// Append a bool as one byte (0 or 1).
    pub fn write_bool(&mut self, value: bool) {
        self.bytes.push(u8::from(value));
    }

    /// Finish and return the blob.
    pub fn finish(self) -> Vec<u8> {
        self.bytes
    }
}

/// Reads fields back out of a state blob in the order they were written.
#[derive(Debug, Clone)]
pub struct StateReader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> StateReader<'a> {
    /// Open a blob, skipping the leading padding byte.
    pub fn new(bytes: &'a [u8]) -> Result<Self, StateError> {
        let mut reader = Self { bytes, pos: 0 };
        reader.take::<1>()?;
        Ok(reader)
    }

    /// Bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    fn take<const N: usize>(&mut self) -> Result<[u8; N], StateError> {
        let remaining = self.remaining();
        let slice = self
            .bytes
            .get(self.pos..self.pos + N)
            .ok_or(StateError::Truncated {
                needed: N,
                remaining,
            })?;
        let mut out = [0u8; N];
        out.copy_from_slice(slice);
        self.pos += N;
        Ok(out)
    }

    /// Read an `f64`.
    pub fn read_f64(&mut self) -> Result<f64, StateError> {
        self.take::<8>().map(f64::from_le_bytes)
    }

    /// Read an `f32`.
    pub fn read_f32(&mut self) -> Result<f32, StateError> {
        self.take::<4>().map(f32::from_le_bytes)
    }

    /// Read an `i32`.
    pub fn read_i32(&mut self) -> Result<i32, StateError> {
        self.take::<4>().map(i32::from_le_bytes)
    }

    /// Read a single byte.
    pub fn read_u8(&mut self) -> Result<u8, StateError> {
        self.take::<1>().map(|[b]| b)
    }

    /// Read a bool; any non-zero byte is `true`.
    pub fn read_bool(&mut self) -> Result<bool, StateError> {
        self.read_u8().map(|b| b != 0)
    }
}
