//! LFO-swept band-pass filter applied after the voice mix.
//!
//! The center frequency follows a unipolar sine:
//!
//! ```text
//! lfo    = 0.5 · (1 + sin(2π · rate · t))
//! cutoff = frequency + depth · lfo · frequency
//! ```
//!
//! The filter is re-tuned once per block, from the host transport time when
//! one is available and otherwise from a free-running phase that advances by
//! `rate / sample_rate` per block. Channel 0 always passes through
//! unfiltered; channels 1.. each get their own band-pass section with Q = 1.

use vibra_core::{Biquad, bandpass_coefficients, unipolar_sine};

/// Highest channel count the auto-wah filters. Extra channels pass through.
pub const MAX_CHANNELS: usize = 8;

const Q: f32 = 1.0;

/// Auto-wah parameters for one block.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AutoWahSettings {
    /// Base center frequency in Hz.
    pub frequency: f64,
    /// Sweep depth as a fraction of `frequency`.
    pub depth: f64,
    /// LFO rate in Hz.
    pub rate: f64,
    /// Whether the filter runs at all.
    pub enabled: bool,
}

impl Default for AutoWahSettings {
    fn default() -> Self {
        Self {
            frequency: 700.0,
            depth: 0.8,
            rate: 2.0,
            enabled: false,
        }
    }
}

impl AutoWahSettings {
    /// Center frequency for an LFO value in \[0, 1\].
    #[inline]
    pub fn cutoff(&self, lfo: f64) -> f64 {
        self.frequency + self.depth * lfo * self.frequency
    }

    /// Center frequency at transport time `seconds`.
    pub fn cutoff_at(&self, seconds: f64) -> f64 {
        self.cutoff(unipolar_sine(self.rate * seconds))
    }
}

/// Swept band-pass filter state.
#[derive(Debug, Clone)]
pub struct AutoWah {
    filters: [Biquad; MAX_CHANNELS],
    lfo_phase: f64,
    sample_rate: f64,
    cutoff: f64,
}

impl Default for AutoWah {
    fn default() -> Self {
        Self::new()
    }
}

impl AutoWah {
    /// Create an untuned auto-wah. Call [`prepare`](Self::prepare) first.
    pub fn new() -> Self {
        Self {
            filters: [const { Biquad::new() }; MAX_CHANNELS],
            lfo_phase: 0.0,
            sample_rate: 0.0,
            cutoff: 0.0,
        }
    }

    /// Reset filter history and the free-running phase.
    ///
    /// Filter state exists for the first [`MAX_CHANNELS`] channels only.
    /// Channel 0 stays dry and channels from index `MAX_CHANNELS` on pass
    /// through untouched.
    pub fn prepare(&mut self, sample_rate: f64) {
        self.sample_rate = sample_rate;
        self.lfo_phase = 0.0;
        for filter in &mut self.filters {
            filter.clear();
        }
    }

    /// Free-running LFO phase in cycles, \[0, 1).
    pub fn lfo_phase(&self) -> f64 {
        self.lfo_phase
    }

    /// Center frequency of the last tuning, in Hz.
    pub fn cutoff(&self) -> f64 {
        self.cutoff
    }

    /// Tune from host transport time in seconds.
    pub fn update_with_time(&mut self, settings: &AutoWahSettings, seconds: f64) {
        self.tune(settings.cutoff_at(seconds));
    }

    /// Tune from the free-running phase, then advance it by one block's worth.
    pub fn update_with_phase(&mut self, settings: &AutoWahSettings) {
        self.tune(settings.cutoff(unipolar_sine(self.lfo_phase)));

        if self.sample_rate > 0.0 {
            self.lfo_phase += settings.rate / self.sample_rate;
            self.lfo_phase -= libm::floor(self.lfo_phase);
        }
    }

    /// Filter channels 1.. in place; channel 0 is left untouched.
    pub fn process(&mut self, channels: &mut [&mut [f32]], frames: usize) {
        for (channel, filter) in channels.iter_mut().zip(self.filters.iter_mut()).skip(1) {
            filter.process_in_place(&mut channel[..frames]);
        }
    }

    fn tune(&mut self, cutoff: f64) {
        self.cutoff = cutoff;
        if self.sample_rate <= 0.0 {
            return;
        }
        let center = cutoff.clamp(1.0, self.sample_rate * 0.49);
        let coefficients = bandpass_coefficients(center as f32, Q, self.sample_rate as f32);
        for filter in &mut self.filters {
            filter.set_coefficients(coefficients);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cutoff_range() {
        let settings = AutoWahSettings::default();
        assert_eq!(settings.cutoff(0.0), 700.0);
        assert!((settings.cutoff(1.0) - 1260.0).abs() < 1e-9);
    }

    #[test]
    fn test_cutoff_at_quarter_cycle_peaks() {
        let settings = AutoWahSettings::default();
        // rate 2 Hz: t = 0.125 s is a quarter cycle.
        assert!((settings.cutoff_at(0.125) - 1260.0).abs() < 1e-9);
        assert_eq!(settings.cutoff_at(0.0), 700.0 + 0.8 * 0.5 * 700.0);
    }

    #[test]
    fn test_phase_advances_once_per_update() {
        let mut wah = AutoWah::new();
        wah.prepare(100.0);
        let settings = AutoWahSettings {
            rate: 30.0,
            ..AutoWahSettings::default()
        };
        wah.update_with_phase(&settings);
        assert!((wah.lfo_phase() - 0.3).abs() < 1e-12);
        for _ in 0..3 {
            wah.update_with_phase(&settings);
        }
        assert!((wah.lfo_phase() - 0.2).abs() < 1e-9);
    }

    #[test]
    fn test_time_update_does_not_move_phase() {
        let mut wah = AutoWah::new();
        wah.prepare(48000.0);
        wah.update_with_time(&AutoWahSettings::default(), 3.7);
        assert_eq!(wah.lfo_phase(), 0.0);
    }

    #[test]
    fn test_channel_zero_untouched() {
        let mut wah = AutoWah::new();
        wah.prepare(48000.0);
        wah.update_with_time(&AutoWahSettings::default(), 0.0);

        let mut left = [1.0f32; 64];
        let mut right = [1.0f32; 64];
        wah.process(&mut [&mut left[..], &mut right[..]], 64);

        assert_eq!(left, [1.0; 64]);
        assert_ne!(right, [1.0; 64]);
    }

    #[test]
    fn test_channels_past_cap_pass_through() {
        let mut wah = AutoWah::new();
        wah.prepare(48000.0);
        wah.update_with_time(&AutoWahSettings::default(), 0.0);

        let mut bufs = [[1.0f32; 32]; MAX_CHANNELS + 1];
        let mut channels = bufs.each_mut().map(|b| &mut b[..]);
        wah.process(&mut channels, 32);

        assert_ne!(bufs[MAX_CHANNELS - 1], [1.0; 32]);
        assert_eq!(bufs[MAX_CHANNELS], [1.0; 32]);
    }

    #[test]
    fn test_cutoff_clamped_below_nyquist() {
        let mut wah = AutoWah::new();
        wah.prepare(8000.0);
        let settings = AutoWahSettings {
            frequency: 10000.0,
            ..AutoWahSettings::default()
        };
        wah.update_with_time(&settings, 0.0);
        assert!(wah.cutoff() > 10000.0);

        let mut left = [0.0f32; 32];
        let mut right = [0.5f32; 32];
        wah.process(&mut [&mut left[..], &mut right[..]], 32);
        assert!(right.iter().all(|s| s.is_finite()));
    }
}
