//! Ring buffer behind the chorus/flanger.
//!
//! Each channel writes one sample per frame and reads back a single tap whose
//! position the LFO moves every frame, so taps are fractional and linearly
//! interpolated between the two neighbouring samples.

#[cfg(not(feature = "std"))]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std as alloc;

use alloc::vec;
use alloc::vec::Vec;

/// Fixed-capacity delay line with fractional reads.
///
/// Storage is sized once; `read` and `write` never allocate.
///
/// ```rust
/// use vibra_core::InterpolatedDelay;
///
/// let mut line = InterpolatedDelay::from_ms(48000.0, 50.0);
/// line.write(1.0);
/// line.write(0.0);
/// assert_eq!(line.read(1.0), 1.0);
/// assert_eq!(line.read(0.5), 0.5);
/// ```
#[derive(Debug, Clone)]
pub struct InterpolatedDelay {
    samples: Vec<f32>,
    /// Slot the next `write` fills.
    next: usize,
}

impl InterpolatedDelay {
    /// A line holding `capacity` samples (at least one).
    pub fn new(capacity: usize) -> Self {
        Self {
            samples: vec![0.0; capacity.max(1)],
            next: 0,
        }
    }

    /// A line long enough for `max_ms` at `sample_rate`, plus the
    /// interpolation neighbour.
    pub fn from_ms(sample_rate: f32, max_ms: f32) -> Self {
        Self::new((sample_rate * max_ms / 1000.0) as usize + 2)
    }

    /// Sample written `back` writes ago; 0 is the newest.
    #[inline]
    fn tap(&self, back: usize) -> f32 {
        let len = self.samples.len();
        let newest = (self.next + len - 1) % len;
        self.samples[(newest + len - back % len) % len]
    }

    /// Read `delay` samples behind the newest write.
    ///
    /// Delays are clamped to `[0, capacity - 1]`.
    #[inline]
    pub fn read(&self, delay: f32) -> f32 {
        let delay = delay.clamp(0.0, (self.samples.len() - 1) as f32);
        let whole = delay as usize;
        let frac = delay - whole as f32;

        let near = self.tap(whole);
        let far = self.tap(whole + 1);
        near + (far - near) * frac
    }

    /// Push one sample, overwriting the oldest.
    #[inline]
    pub fn write(&mut self, sample: f32) {
        self.samples[self.next] = sample;
        self.next = (self.next + 1) % self.samples.len();
    }

    /// Silence the line.
    pub fn clear(&mut self) {
        self.samples.fill(0.0);
        self.next = 0;
    }

    /// Number of samples held.
    pub fn capacity(&self) -> usize {
        self.samples.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_impulse_comes_back_after_whole_delay() {
        let mut line = InterpolatedDelay::new(16);
        line.write(1.0);
        for _ in 0..4 {
            line.write(0.0);
        }
        assert_eq!(line.read(4.0), 1.0);
        assert_eq!(line.read(3.0), 0.0);
        assert_eq!(line.read(5.0), 0.0);
    }

    #[test]
    fn test_fractional_tap_interpolates() {
        let mut line = InterpolatedDelay::new(8);
        line.write(1.0);
        line.write(0.0);
        assert!((line.read(0.25) - 0.25).abs() < 1e-6);
        assert!((line.read(0.75) - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_wraps_past_capacity() {
        let mut line = InterpolatedDelay::new(4);
        for sample in 1..=6 {
            line.write(sample as f32);
        }
        assert_eq!(line.read(0.0), 6.0);
        assert_eq!(line.read(3.0), 3.0);
        // Longer than the line: clamped to the oldest slot.
        assert_eq!(line.read(10.0), 3.0);
    }

    #[test]
    fn test_clear_silences() {
        let mut line = InterpolatedDelay::new(8);
        for _ in 0..8 {
            line.write(1.0);
        }
        line.clear();
        assert_eq!(line.read(3.0), 0.0);
    }

    #[test]
    fn test_chorus_line_fits_longest_sweep() {
        // 25 ms base delay swept to twice its length at 48 kHz.
        let line = InterpolatedDelay::from_ms(48000.0, 50.0);
        assert!(line.capacity() > 2400);
    }

    #[test]
    fn test_zero_capacity_is_raised() {
        let mut line = InterpolatedDelay::new(0);
        line.write(0.5);
        assert_eq!(line.capacity(), 1);
        assert_eq!(line.read(0.0), 0.5);
    }
}
