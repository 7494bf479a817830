//! Lock-free floating point cells for parameters shared across threads.
//!
//! The UI thread writes, the audio thread reads once per block. Values are
//! stored bit-cast in a word-sized atomic so a read is never torn. No
//! ordering is promised between different cells: a block may observe one
//! field of a multi-field edit before the others.

use core::sync::atomic::{AtomicU32, AtomicU64, Ordering};

/// `f32` stored as its bit pattern in an [`AtomicU32`].
#[derive(Debug, Default)]
pub struct AtomicF32(AtomicU32);

impl AtomicF32 {
    /// Create a cell holding `value`.
    pub fn new(value: f32) -> Self {
        Self(AtomicU32::new(value.to_bits()))
    }

    /// Read the current value.
    #[inline]
    pub fn load(&self) -> f32 {
        f32::from_bits(self.0.load(Ordering::Relaxed))
    }

    /// Overwrite the current value.
    #[inline]
    pub fn store(&self, value: f32) {
        self.0.store(value.to_bits(), Ordering::Relaxed);
    }
}

/// `f64` stored as its bit pattern in an [`AtomicU64`].
#[derive(Debug, Default)]
pub struct AtomicF64(AtomicU64);

impl AtomicF64 {
    /// Create a cell holding `value`.
    pub fn new(value: f64) -> Self {
        Self(AtomicU64::new(value.to_bits()))
    }

    /// Read the current value.
    #[inline]
    pub fn load(&self) -> f64 {
        f64::from_bits(self.0.load(Ordering::Relaxed))
    }

    /// Overwrite the current value.
    #[inline]
    pub fn store(&self, value: f64) {
        self.0.store(value.to_bits(), Ordering::Relaxed);
    }
}
