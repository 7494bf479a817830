//! Linear ADSR envelope driven by a sample counter.
//!
//! Each stage measures progress as `samples_elapsed / (seconds · sample_rate)`,
//! so the envelope is deterministic for a given sample stream. A zero-length
//! stage completes on its first evaluation.
//!
//! ```text
//! Off ──note_on──▶ Attack ──▶ Decay ──▶ Sustain
//!  ▲                  │         │          │
//!  │                  └─note_off┴──────────┘
//!  │                            ▼
//!  └──────────────────────── Release
//! ```
//!
//! | Stage | Multiplier | Leaves when |
//! |-------|------------|-------------|
//! | Attack | `p` | `p ≥ 1` (clamped to 1) |
//! | Decay | `(1 - p)(1 - s) + s` | `≤ s` (clamped to `s`) |
//! | Sustain | `s` | `note_off` |
//! | Release | `(1 - p) · s` | `≤ 0` (clamped to 0) |
//!
//! Release always starts from the sustain level, whatever stage the note
//! was released from.

/// Envelope stage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EnvelopePhase {
    /// Silent; the owning voice may be reallocated.
    #[default]
    Off,
    /// Ramping up to full level.
    Attack,
    /// Falling from full level to the sustain level.
    Decay,
    /// Holding the sustain level until note-off.
    Sustain,
    /// Falling from the sustain level to silence.
    Release,
}

/// Stage durations (seconds) and sustain level (0-1).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Adsr {
    /// Attack time in seconds.
    pub attack: f64,
    /// Decay time in seconds.
    pub decay: f64,
    /// Sustain level, 0-1.
    pub sustain: f64,
    /// Release time in seconds.
    pub release: f64,
}

impl Default for Adsr {
    fn default() -> Self {
        Self {
            attack: 0.02,
            decay: 0.04,
            sustain: 0.7,
            release: 0.03,
        }
    }
}

/// Sample-counted ADSR state machine.
///
/// The envelope does not own its settings; every evaluation takes the
/// current [`Adsr`] so that parameter changes apply to notes already
/// sounding.
///
/// # Example
///
/// ```rust
/// use vibra_synth::{Adsr, Envelope, EnvelopePhase};
///
/// let adsr = Adsr { attack: 0.001, decay: 0.001, sustain: 0.5, release: 0.001 };
/// let mut env = Envelope::new(48000.0);
/// env.note_on();
/// for _ in 0..200 {
///     env.advance(&adsr);
/// }
/// assert_eq!(env.phase(), EnvelopePhase::Sustain);
/// assert_eq!(env.multiplier(), 0.5);
/// ```
#[derive(Debug, Clone)]
pub struct Envelope {
    phase: EnvelopePhase,
    samples_elapsed: u64,
    multiplier: f64,
    sample_rate: f64,
}

impl Default for Envelope {
    fn default() -> Self {
        Self::new(48000.0)
    }
}

impl Envelope {
    /// Create an idle envelope.
    pub fn new(sample_rate: f64) -> Self {
        Self {
            phase: EnvelopePhase::Off,
            samples_elapsed: 0,
            multiplier: 0.0,
            sample_rate,
        }
    }

    /// Set the sample rate used to convert stage times to sample counts.
    pub fn set_sample_rate(&mut self, sample_rate: f64) {
        self.sample_rate = sample_rate;
    }

    /// Enter Attack from any stage and restart the stage clock.
    pub fn note_on(&mut self) {
        self.phase = EnvelopePhase::Attack;
        self.samples_elapsed = 0;
    }

    /// Enter Release from any stage and restart the stage clock.
    pub fn note_off(&mut self) {
        self.phase = EnvelopePhase::Release;
        self.samples_elapsed = 0;
    }

    /// Force the envelope to Off with a zero multiplier.
    pub fn reset(&mut self) {
        self.phase = EnvelopePhase::Off;
        self.samples_elapsed = 0;
        self.multiplier = 0.0;
    }

    /// Current stage.
    pub fn phase(&self) -> EnvelopePhase {
        self.phase
    }

    /// Current amplitude multiplier, 0-1.
    pub fn multiplier(&self) -> f64 {
        self.multiplier
    }

    /// Whether the envelope is in any stage other than Off.
    pub fn is_active(&self) -> bool {
        self.phase != EnvelopePhase::Off
    }

    /// Advance the stage clock by one sample, then re-evaluate.
    ///
    /// Returns `true` when this step finished the release.
    #[inline]
    pub fn advance(&mut self, adsr: &Adsr) -> bool {
        self.samples_elapsed += 1;
        self.refresh(adsr)
    }

    /// Re-evaluate the multiplier at the current stage clock without
    /// advancing it. At most one stage transition happens per call.
    ///
    /// Returns `true` when this evaluation finished the release.
    pub fn refresh(&mut self, adsr: &Adsr) -> bool {
        match self.phase {
            EnvelopePhase::Off => {}
            EnvelopePhase::Attack => {
                self.multiplier = self.progress(adsr.attack);
                if self.multiplier >= 1.0 {
                    self.multiplier = 1.0;
                    self.phase = EnvelopePhase::Decay;
                    self.samples_elapsed = 0;
                }
            }
            EnvelopePhase::Decay => {
                let p = self.progress(adsr.decay);
                self.multiplier = (1.0 - p) * (1.0 - adsr.sustain) + adsr.sustain;
                if self.multiplier <= adsr.sustain {
                    self.multiplier = adsr.sustain;
                    self.phase = EnvelopePhase::Sustain;
                }
            }
            EnvelopePhase::Sustain => {
                self.multiplier = adsr.sustain;
            }
            EnvelopePhase::Release => {
                let p = self.progress(adsr.release);
                self.multiplier = (1.0 - p) * adsr.sustain;
                if self.multiplier <= 0.0 {
                    self.multiplier = 0.0;
                    self.phase = EnvelopePhase::Off;
                    return true;
                }
            }
        }
        false
    }

    /// Fraction of a stage of `seconds` length elapsed so far.
    fn progress(&self, seconds: f64) -> f64 {
        let length = seconds * self.sample_rate;
        if length > 0.0 {
            self.samples_elapsed as f64 / length
        } else {
            1.0
        }
    }
}
