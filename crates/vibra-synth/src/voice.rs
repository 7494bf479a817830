//! Voices and the fixed-size voice pool.
//!
//! A [`Voice`] pairs a phase accumulator with an [`Envelope`]. The
//! [`VoicePool`] owns a fixed array of voices and routes note events to them
//! with a deliberately simple policy:
//!
//! 1. A voice already sounding the same frequency is retriggered.
//! 2. Otherwise the lowest-index voice in the Off stage takes the note.
//! 3. Otherwise the note is dropped. Sounding voices are never stolen.

use core::f64::consts::TAU;

use crate::envelope::{Adsr, Envelope, EnvelopePhase};
use crate::oscillator::{WaveType, phase_increment};

/// Parameters shared by every voice, refreshed once per block.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VoiceParams {
    /// Output gain, 0-1.
    pub gain: f64,
    /// Square-wave duty cycle, 0-1.
    pub pulse_width: f64,
    /// Oscillator waveform.
    pub wave_type: WaveType,
    /// Envelope settings.
    pub envelope: Adsr,
}

impl Default for VoiceParams {
    fn default() -> Self {
        Self {
            gain: 0.2512,
            pulse_width: 0.5,
            wave_type: WaveType::Sine,
            envelope: Adsr::default(),
        }
    }
}

/// One monophonic synthesis unit.
#[derive(Debug, Clone)]
pub struct Voice {
    angle: f64,
    angle_delta: f64,
    frequency: f64,
    velocity: f64,
    sample_rate: f64,
    volume: f64,
    envelope: Envelope,
    params: VoiceParams,
}

impl Default for Voice {
    fn default() -> Self {
        Self::new()
    }
}

impl Voice {
    /// Create a silent voice tuned to 440 Hz with no sample rate yet.
    pub fn new() -> Self {
        Self {
            angle: 0.0,
            angle_delta: 0.0,
            frequency: 440.0,
            velocity: 0.0,
            sample_rate: 0.0,
            volume: 0.0,
            envelope: Envelope::new(0.0),
            params: VoiceParams::default(),
        }
    }

    /// Set the sample rate. Resets the phase angle.
    pub fn set_sample_rate(&mut self, sample_rate: f64) {
        self.sample_rate = sample_rate;
        self.envelope.set_sample_rate(sample_rate);
        self.update_angle_delta();
    }

    /// Set the oscillator frequency in Hz. Resets the phase angle.
    pub fn set_frequency(&mut self, frequency: f64) {
        self.frequency = frequency;
        self.update_angle_delta();
    }

    /// Set the note velocity (0-127).
    pub fn set_velocity(&mut self, velocity: f64) {
        self.velocity = velocity;
        self.update_volume();
    }

    /// Start the note: phase angle to 0, envelope to Attack.
    pub fn note_on(&mut self) {
        self.angle = 0.0;
        self.envelope.note_on();
    }

    /// Release the note.
    pub fn note_off(&mut self) {
        self.envelope.note_off();
    }

    /// Silence the voice immediately.
    pub fn reset(&mut self) {
        self.angle = 0.0;
        self.envelope.reset();
        self.volume = 0.0;
    }

    /// Copy the block's shared parameters and re-evaluate the envelope.
    pub fn set_global_parameters(&mut self, params: &VoiceParams) {
        self.params = *params;
        self.update_volume();
    }

    /// Whether the voice is in any envelope stage other than Off.
    pub fn is_playing(&self) -> bool {
        self.envelope.is_active()
    }

    /// Oscillator frequency in Hz.
    pub fn frequency(&self) -> f64 {
        self.frequency
    }

    /// Note velocity (0-127).
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    /// Current envelope stage.
    pub fn phase(&self) -> EnvelopePhase {
        self.envelope.phase()
    }

    /// Current phase angle in radians.
    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// Current output volume: `gain · multiplier · velocity / 127`.
    pub fn volume(&self) -> f64 {
        self.volume
    }

    /// Render and add this voice into `out`.
    ///
    /// Each sample is computed from the current angle, then the angle and the
    /// envelope advance, and the sample is scaled by the updated volume.
    /// Rendering stops once the release completes.
    pub fn render_into(&mut self, out: &mut [f32]) {
        for sample in out.iter_mut() {
            if !self.envelope.is_active() {
                break;
            }
            let value = self
                .params
                .wave_type
                .render(self.angle, self.params.pulse_width);
            self.angle += self.angle_delta;
            if self.envelope.advance(&self.params.envelope) {
                self.angle = 0.0;
            }
            self.volume = self.compute_volume();
            if self.angle >= TAU {
                self.angle -= TAU;
            }
            *sample += (value * self.volume) as f32;
        }
    }

    fn update_angle_delta(&mut self) {
        self.angle = 0.0;
        self.angle_delta = phase_increment(self.frequency, self.sample_rate);
    }

    fn update_volume(&mut self) {
        if self.envelope.refresh(&self.params.envelope) {
            self.angle = 0.0;
        }
        self.volume = self.compute_volume();
    }

    #[inline]
    fn compute_volume(&self) -> f64 {
        self.params.gain * self.envelope.multiplier() * self.velocity / 127.0
    }
}

/// What a note-on did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Allocation {
    /// A free voice at this index started the note.
    Started(usize),
    /// The voice at this index was already sounding the pitch and restarted.
    Retriggered(usize),
    /// Every voice was busy with another pitch.
    Dropped,
}

/// Fixed-capacity pool of `N` voices.
///
/// # Example
///
/// ```rust
/// use vibra_synth::{Allocation, VoicePool};
///
/// let mut pool: VoicePool<2> = VoicePool::new();
/// pool.set_sample_rate(48000.0);
/// assert_eq!(pool.note_on(440.0, 100.0), Allocation::Started(0));
/// assert_eq!(pool.note_on(440.0, 90.0), Allocation::Retriggered(0));
/// assert_eq!(pool.note_on(550.0, 100.0), Allocation::Started(1));
/// assert_eq!(pool.note_on(660.0, 100.0), Allocation::Dropped);
/// ```
#[derive(Debug, Clone)]
pub struct VoicePool<const N: usize> {
    voices: [Voice; N],
}

impl<const N: usize> Default for VoicePool<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> VoicePool<N> {
    /// Create a pool of silent voices.
    pub fn new() -> Self {
        Self {
            voices: core::array::from_fn(|_| Voice::new()),
        }
    }

    /// Number of voices.
    pub fn capacity(&self) -> usize {
        N
    }

    /// Propagate the sample rate to every voice.
    pub fn set_sample_rate(&mut self, sample_rate: f64) {
        for voice in &mut self.voices {
            voice.set_sample_rate(sample_rate);
        }
    }

    /// Silence every voice.
    pub fn reset(&mut self) {
        for voice in &mut self.voices {
            voice.reset();
        }
    }

    /// Start a note at `frequency` Hz.
    pub fn note_on(&mut self, frequency: f64, velocity: f64) -> Allocation {
        if let Some(index) = self.find_playing(frequency) {
            let voice = &mut self.voices[index];
            voice.note_off();
            voice.set_frequency(frequency);
            voice.set_velocity(velocity);
            voice.note_on();
            return Allocation::Retriggered(index);
        }

        match self.voices.iter().position(|v| !v.is_playing()) {
            Some(index) => {
                let voice = &mut self.voices[index];
                voice.set_frequency(frequency);
                voice.set_velocity(velocity);
                voice.note_on();
                Allocation::Started(index)
            }
            None => Allocation::Dropped,
        }
    }

    /// Release the first sounding voice at `frequency` Hz.
    ///
    /// Returns the released voice index, `None` when nothing matched.
    pub fn note_off(&mut self, frequency: f64) -> Option<usize> {
        let index = self.find_playing(frequency)?;
        self.voices[index].note_off();
        Some(index)
    }

    /// Refresh every voice, sounding or not, with the block's parameters.
    pub fn set_global_parameters(&mut self, params: &VoiceParams) {
        for voice in &mut self.voices {
            voice.set_global_parameters(params);
        }
    }

    /// Sum every sounding voice into `out`.
    pub fn render_into(&mut self, out: &mut [f32]) {
        for voice in self.voices.iter_mut().filter(|v| v.is_playing()) {
            voice.render_into(out);
        }
    }

    /// Number of voices not in the Off stage.
    pub fn active_voice_count(&self) -> usize {
        self.voices.iter().filter(|v| v.is_playing()).count()
    }

    /// All voices in index order.
    pub fn voices(&self) -> &[Voice; N] {
        &self.voices
    }

    fn find_playing(&self, frequency: f64) -> Option<usize> {
        self.voices
            .iter()
            .position(|v| v.is_playing() && v.frequency() == frequency)
    }
}
