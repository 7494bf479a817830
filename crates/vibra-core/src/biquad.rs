//! Swept band-pass section for the auto-wah.
//!
//! The auto-wah re-tunes once per block, so coefficients are computed into a
//! small [`Coefficients`] value and handed to every channel's [`Biquad`]
//! without touching the filter history.

use core::f32::consts::TAU;
use libm::{cosf, sinf};

/// Second-order coefficients with `a0` already divided out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coefficients {
    /// Feedforward, current input.
    pub b0: f32,
    /// Feedforward, one sample back.
    pub b1: f32,
    /// Feedforward, two samples back.
    pub b2: f32,
    /// Feedback, one sample back.
    pub a1: f32,
    /// Feedback, two samples back.
    pub a2: f32,
}

impl Coefficients {
    /// `y = x`.
    pub const IDENTITY: Self = Self {
        b0: 1.0,
        b1: 0.0,
        b2: 0.0,
        a1: 0.0,
        a2: 0.0,
    };

    /// Normalize raw `(b0, b1, b2)` / `(a0, a1, a2)` terms.
    pub fn normalized(b: [f32; 3], a: [f32; 3]) -> Self {
        let scale = 1.0 / a[0];
        Self {
            b0: b[0] * scale,
            b1: b[1] * scale,
            b2: b[2] * scale,
            a1: a[1] * scale,
            a2: a[2] * scale,
        }
    }
}

impl Default for Coefficients {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Band-pass centred on `center` Hz whose gain at the centre is exactly 1.
///
/// `q` sets the bandwidth (`center / q`). The caller keeps `center` below
/// Nyquist.
pub fn bandpass_coefficients(center: f32, q: f32, sample_rate: f32) -> Coefficients {
    let w = TAU * center / sample_rate;
    let alpha = sinf(w) / (2.0 * q);
    let cos_w = cosf(w);

    Coefficients::normalized(
        [alpha, 0.0, -alpha],
        [1.0 + alpha, -2.0 * cos_w, 1.0 - alpha],
    )
}

/// Direct-form-I biquad.
///
/// ```rust
/// use vibra_core::{Biquad, bandpass_coefficients};
///
/// let mut filter = Biquad::new();
/// filter.set_coefficients(bandpass_coefficients(700.0, 1.0, 48000.0));
/// let mut block = [1.0f32, 0.0, 0.0, 0.0];
/// filter.process_in_place(&mut block);
/// assert!(block[0] > 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct Biquad {
    coefficients: Coefficients,
    /// `x[n-1]`, `x[n-2]`
    inputs: [f32; 2],
    /// `y[n-1]`, `y[n-2]`
    outputs: [f32; 2],
}

impl Biquad {
    /// A pass-through section with empty history.
    pub const fn new() -> Self {
        Self {
            coefficients: Coefficients::IDENTITY,
            inputs: [0.0; 2],
            outputs: [0.0; 2],
        }
    }

    /// Swap in new coefficients. History is kept so a sweep stays smooth.
    pub fn set_coefficients(&mut self, coefficients: Coefficients) {
        self.coefficients = coefficients;
    }

    /// Coefficients currently in use.
    pub fn coefficients(&self) -> Coefficients {
        self.coefficients
    }

    /// Filter one sample.
    #[inline]
    pub fn process(&mut self, x: f32) -> f32 {
        let Coefficients { b0, b1, b2, a1, a2 } = self.coefficients;
        let [x1, x2] = self.inputs;
        let [y1, y2] = self.outputs;

        let y = b0 * x + b1 * x1 + b2 * x2 - a1 * y1 - a2 * y2;

        self.inputs = [x, x1];
        self.outputs = [y, y1];
        y
    }

    /// Filter a block in place.
    #[inline]
    pub fn process_in_place(&mut self, samples: &mut [f32]) {
        for sample in samples {
            *sample = self.process(*sample);
        }
    }

    /// Zero the history. Coefficients are untouched.
    pub fn clear(&mut self) {
        self.inputs = [0.0; 2];
        self.outputs = [0.0; 2];
    }
}

impl Default for Biquad {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn steady_peak(filter: &mut Biquad, freq: f32, sample_rate: f32) -> f32 {
        let len = (sample_rate / 5.0) as usize;
        (0..len)
            .map(|n| filter.process(sinf(TAU * freq * n as f32 / sample_rate)))
            .skip(len / 2)
            .fold(0.0f32, |peak, y| peak.max(y.abs()))
    }

    #[test]
    fn test_new_is_identity() {
        let mut filter = Biquad::new();
        let mut block = [0.25f32, -0.5, 1.0];
        filter.process_in_place(&mut block);
        assert_eq!(block, [0.25, -0.5, 1.0]);
    }

    #[test]
    fn test_wah_center_gain_is_unity() {
        // The auto-wah's resting cutoff at its default settings.
        let mut filter = Biquad::new();
        filter.set_coefficients(bandpass_coefficients(980.0, 1.0, 48000.0));
        let peak = steady_peak(&mut filter, 980.0, 48000.0);
        assert!((peak - 1.0).abs() < 0.02, "peak {peak}");
    }

    #[test]
    fn test_off_center_is_attenuated() {
        let mut filter = Biquad::new();
        filter.set_coefficients(bandpass_coefficients(700.0, 1.0, 48000.0));
        assert!(steady_peak(&mut filter, 7000.0, 48000.0) < 0.2);
    }

    #[test]
    fn test_dc_is_rejected() {
        let mut filter = Biquad::new();
        filter.set_coefficients(bandpass_coefficients(700.0, 1.0, 48000.0));
        let last = (0..5000).map(|_| filter.process(1.0)).last().unwrap_or(1.0);
        assert!(last.abs() < 1e-3, "dc leaked: {last}");
    }

    #[test]
    fn test_retune_keeps_history() {
        let mut filter = Biquad::new();
        filter.set_coefficients(bandpass_coefficients(700.0, 1.0, 48000.0));
        filter.process(1.0);
        filter.set_coefficients(bandpass_coefficients(1260.0, 1.0, 48000.0));
        // Zero input still rings from the previous sample.
        assert_ne!(filter.process(0.0), 0.0);

        filter.clear();
        assert_eq!(filter.process(0.0), 0.0);
    }

    #[test]
    fn test_bandpass_shape() {
        let c = bandpass_coefficients(1000.0, 1.0, 44100.0);
        assert_eq!(c.b1, 0.0);
        assert_eq!(c.b2, -c.b0);
        assert!(c.a2 < 1.0);
    }
}
