//! Low Frequency Oscillator for modulation effects.
//!
//! Provides the unipolar sine modulator used by the tremolo and the
//! chorus/flanger delay sweep.

use core::f32::consts::PI;
use libm::sinf;

/// Free-running sine LFO with a phase accumulator in cycles.
///
/// Output is unipolar: `0.5 * (1 + sin(2π · phase))`. The phase advances by
/// `frequency / sample_rate` per call to [`Lfo::next_unipolar`] and wraps
/// by subtracting 1 once it reaches 1.
///
/// # Example
///
/// ```rust
/// use vibra_core::Lfo;
///
/// let mut lfo = Lfo::new(48000.0, 2.0);
/// let first = lfo.next_unipolar();
/// assert_eq!(first, 0.5); // sin(0)
/// ```
#[derive(Debug, Clone)]
pub struct Lfo {
    /// Current phase position [0.0, 1.0)
    phase: f32,
    /// Frequency in Hz
    frequency: f32,
    /// Sample rate in Hz
    sample_rate: f32,
}

impl Default for Lfo {
    fn default() -> Self {
        Self::new(48000.0, 1.0)
    }
}

impl Lfo {
    /// Create new LFO with given sample rate and frequency.
    pub fn new(sample_rate: f32, freq_hz: f32) -> Self {
        Self {
            phase: 0.0,
            frequency: freq_hz,
            sample_rate,
        }
    }

    /// Set frequency in Hz.
    pub fn set_frequency(&mut self, freq_hz: f32) {
        self.frequency = freq_hz;
    }

    /// Get current frequency in Hz.
    pub fn frequency(&self) -> f32 {
        self.frequency
    }

    /// Set the sample rate. Phase is kept.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
    }

    /// Reset phase to 0.
    pub fn reset(&mut self) {
        self.phase = 0.0;
    }

    /// Set phase directly (0.0 - 1.0).
    pub fn set_phase(&mut self, phase: f32) {
        self.phase = phase.clamp(0.0, 1.0);
        if self.phase >= 1.0 {
            self.phase -= 1.0;
        }
    }

    /// Get current phase (0.0 - 1.0).
    pub fn phase(&self) -> f32 {
        self.phase
    }

    /// Value at the current phase without advancing.
    #[inline]
    pub fn unipolar(&self) -> f32 {
        (1.0 + sinf(2.0 * PI * self.phase)) * 0.5
    }

    /// Return the value at the current phase, then advance by one sample.
    #[inline]
    pub fn next_unipolar(&mut self) -> f32 {
        let value = self.unipolar();
        self.phase += self.frequency / self.sample_rate;
        if self.phase >= 1.0 {
            self.phase -= 1.0;
        }
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lfo_range() {
        let mut lfo = Lfo::new(44100.0, 7.0);
        for _ in 0..44100 {
            let v = lfo.next_unipolar();
            assert!((0.0..=1.0).contains(&v), "LFO out of range: {}", v);
        }
    }

    #[test]
    fn test_lfo_peak_at_quarter_phase() {
        let mut lfo = Lfo::new(48000.0, 1.0);
        lfo.set_phase(0.25);
        assert!((lfo.unipolar() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_lfo_wraps() {
        let mut lfo = Lfo::new(100.0, 10.0);
        for _ in 0..25 {
            lfo.next_unipolar();
            assert!(lfo.phase() < 1.0);
        }
        assert!((lfo.phase() - 0.5).abs() < 1e-4);
    }

    #[test]
    fn test_lfo_reset() {
        let mut lfo = Lfo::new(48000.0, 5.0);
        for _ in 0..1000 {
            lfo.next_unipolar();
        }
        lfo.reset();
        assert_eq!(lfo.phase(), 0.0);
    }
}
