//! Shared parameter store for the synthesizer.
//!
//! [`SynthParams`] is written by the UI thread (or preset loader, or CLI) and
//! read once per block by the audio thread through [`SynthParams::snapshot`].
//! Each field is its own atomic cell, so a snapshot may mix old and new
//! values of a multi-field edit; the next block sees the rest.
//!
//! Values are stored as written. Range checks belong to whoever writes.

#[cfg(not(feature = "std"))]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std as alloc;

use alloc::vec::Vec;
use core::sync::atomic::{AtomicBool, AtomicI32, Ordering};

use vibra_core::{
    AtomicF64, ParamDescriptor, ParamUnit, ParameterInfo, StateError, StateReader, StateWriter,
};

use crate::auto_wah::AutoWahSettings;
use crate::envelope::Adsr;
use crate::oscillator::WaveType;
use crate::voice::VoiceParams;

/// Size of a serialized synth state blob in bytes.
pub const STATE_LEN: usize = 1 + 8 * 2 + 4 + 8 * 7 + 1;

const DESCRIPTORS: [ParamDescriptor; 11] = [
    ParamDescriptor::new("Gain", "gain", ParamUnit::Ratio, 0.0, 1.0, 0.2512).with_step(0.0001),
    ParamDescriptor::new("Pulse Width", "pulse_width", ParamUnit::Ratio, 0.01, 0.99, 0.5)
        .with_step(0.01),
    ParamDescriptor::new("Wave Type", "wave_type", ParamUnit::Choice, 1.0, 4.0, 1.0).with_step(1.0),
    ParamDescriptor::new("Attack", "attack", ParamUnit::Seconds, 0.001, 5.0, 0.02).with_step(0.001),
    ParamDescriptor::new("Decay", "decay", ParamUnit::Seconds, 0.001, 5.0, 0.04).with_step(0.001),
    ParamDescriptor::new("Sustain", "sustain", ParamUnit::Ratio, 0.0, 1.0, 0.7).with_step(0.01),
    ParamDescriptor::new("Release", "release", ParamUnit::Seconds, 0.001, 5.0, 0.03)
        .with_step(0.001),
    ParamDescriptor::new(
        "Auto-Wah Frequency",
        "auto_wah_frequency",
        ParamUnit::Hertz,
        300.0,
        1000.0,
        700.0,
    )
    .with_step(1.0),
    ParamDescriptor::new("Auto-Wah Depth", "auto_wah_depth", ParamUnit::Ratio, 0.5, 1.0, 0.8)
        .with_step(0.01),
    ParamDescriptor::new("Auto-Wah Rate", "auto_wah_rate", ParamUnit::Hertz, 1.0, 5.0, 2.0)
        .with_step(0.1),
    ParamDescriptor::new("Auto-Wah", "auto_wah_enabled", ParamUnit::Toggle, 0.0, 1.0, 0.0)
        .with_step(1.0),
];

/// Everything the engine reads at block start, as plain values.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SynthSnapshot {
    /// Parameters shared by all voices.
    pub voice: VoiceParams,
    /// Auto-wah parameters.
    pub auto_wah: AutoWahSettings,
}

impl SynthSnapshot {
    /// Serialize to the fixed state layout.
    ///
    /// ```text
    /// pad u8 | gain f64 | pulse_width f64 | wave_type i32 | attack f64
    /// decay f64 | sustain f64 | release f64 | wah_frequency f64
    /// wah_depth f64 | wah_rate f64 | wah_enabled u8
    /// ```
    pub fn to_state(&self) -> Vec<u8> {
        let v = &self.voice;
        let w = &self.auto_wah;
        let mut writer = StateWriter::new();
        writer.write_f64(v.gain);
        writer.write_f64(v.pulse_width);
        writer.write_i32(v.wave_type.to_i32());
        writer.write_f64(v.envelope.attack);
        writer.write_f64(v.envelope.decay);
        writer.write_f64(v.envelope.sustain);
        writer.write_f64(v.envelope.release);
        writer.write_f64(w.frequency);
        writer.write_f64(w.depth);
        writer.write_f64(w.rate);
        writer.write_bool(w.enabled);
        writer.finish()
    }

    /// Decode the fixed state layout. Trailing bytes are ignored.
    pub fn from_state(bytes: &[u8]) -> Result<Self, StateError> {
        let mut reader = StateReader::new(bytes)?;
        let gain = reader.read_f64()?;
        let pulse_width = reader.read_f64()?;
        let raw_wave = reader.read_i32()?;
        let wave_type = WaveType::from_i32(raw_wave).ok_or(StateError::InvalidWaveType(raw_wave))?;
        let envelope = Adsr {
            attack: reader.read_f64()?,
            decay: reader.read_f64()?,
            sustain: reader.read_f64()?,
            release: reader.read_f64()?,
        };
        let auto_wah = AutoWahSettings {
            frequency: reader.read_f64()?,
            depth: reader.read_f64()?,
            rate: reader.read_f64()?,
            enabled: reader.read_bool()?,
        };
        Ok(Self {
            voice: VoiceParams {
                gain,
                pulse_width,
                wave_type,
                envelope,
            },
            auto_wah,
        })
    }
}

/// Lock-free synth parameter store.
///
/// # Example
///
/// ```rust
/// use vibra_core::ParameterInfo;
/// use vibra_synth::SynthParams;
///
/// let params = SynthParams::new();
/// params.set_param(SynthParams::SUSTAIN, 0.5);
/// assert_eq!(params.snapshot().voice.envelope.sustain, 0.5);
/// assert_eq!(params.param_index("auto_wah_rate"), Some(SynthParams::AUTO_WAH_RATE));
/// ```
#[derive(Debug)]
pub struct SynthParams {
    gain: AtomicF64,
    pulse_width: AtomicF64,
    wave_type: AtomicI32,
    attack: AtomicF64,
    decay: AtomicF64,
    sustain: AtomicF64,
    release: AtomicF64,
    auto_wah_frequency: AtomicF64,
    auto_wah_depth: AtomicF64,
    auto_wah_rate: AtomicF64,
    auto_wah_enabled: AtomicBool,
}

impl Default for SynthParams {
    fn default() -> Self {
        Self::new()
    }
}

impl SynthParams {
    /// Index of the output gain.
    pub const GAIN: usize = 0;
    /// Index of the square-wave pulse width.
    pub const PULSE_WIDTH: usize = 1;
    /// Index of the waveform selector (1-4).
    pub const WAVE_TYPE: usize = 2;
    /// Index of the attack time.
    pub const ATTACK: usize = 3;
    /// Index of the decay time.
    pub const DECAY: usize = 4;
    /// Index of the sustain level.
    pub const SUSTAIN: usize = 5;
    /// Index of the release time.
    pub const RELEASE: usize = 6;
    /// Index of the auto-wah base frequency.
    pub const AUTO_WAH_FREQUENCY: usize = 7;
    /// Index of the auto-wah depth.
    pub const AUTO_WAH_DEPTH: usize = 8;
    /// Index of the auto-wah LFO rate.
    pub const AUTO_WAH_RATE: usize = 9;
    /// Index of the auto-wah on/off toggle.
    pub const AUTO_WAH_ENABLED: usize = 10;

    /// Create a store holding the default values.
    pub fn new() -> Self {
        let params = Self {
            gain: AtomicF64::default(),
            pulse_width: AtomicF64::default(),
            wave_type: AtomicI32::new(WaveType::Sine.to_i32()),
            attack: AtomicF64::default(),
            decay: AtomicF64::default(),
            sustain: AtomicF64::default(),
            release: AtomicF64::default(),
            auto_wah_frequency: AtomicF64::default(),
            auto_wah_depth: AtomicF64::default(),
            auto_wah_rate: AtomicF64::default(),
            auto_wah_enabled: AtomicBool::new(false),
        };
        params.apply(&SynthSnapshot::default());
        params
    }

    /// Read every parameter.
    pub fn snapshot(&self) -> SynthSnapshot {
        SynthSnapshot {
            voice: VoiceParams {
                gain: self.gain.load(),
                pulse_width: self.pulse_width.load(),
                wave_type: self.wave_type(),
                envelope: Adsr {
                    attack: self.attack.load(),
                    decay: self.decay.load(),
                    sustain: self.sustain.load(),
                    release: self.release.load(),
                },
            },
            auto_wah: AutoWahSettings {
                frequency: self.auto_wah_frequency.load(),
                depth: self.auto_wah_depth.load(),
                rate: self.auto_wah_rate.load(),
                enabled: self.auto_wah_enabled.load(Ordering::Relaxed),
            },
        }
    }

    /// Write every parameter.
    pub fn apply(&self, snapshot: &SynthSnapshot) {
        let v = &snapshot.voice;
        let w = &snapshot.auto_wah;
        self.gain.store(v.gain);
        self.pulse_width.store(v.pulse_width);
        self.set_wave_type(v.wave_type);
        self.attack.store(v.envelope.attack);
        self.decay.store(v.envelope.decay);
        self.sustain.store(v.envelope.sustain);
        self.release.store(v.envelope.release);
        self.auto_wah_frequency.store(w.frequency);
        self.auto_wah_depth.store(w.depth);
        self.auto_wah_rate.store(w.rate);
        self.set_auto_wah_enabled(w.enabled);
    }

    /// Current waveform.
    pub fn wave_type(&self) -> WaveType {
        WaveType::from_i32(self.wave_type.load(Ordering::Relaxed)).unwrap_or_default()
    }

    /// Select the waveform.
    pub fn set_wave_type(&self, wave_type: WaveType) {
        self.wave_type.store(wave_type.to_i32(), Ordering::Relaxed);
    }

    /// Whether the auto-wah is on.
    pub fn auto_wah_enabled(&self) -> bool {
        self.auto_wah_enabled.load(Ordering::Relaxed)
    }

    /// Turn the auto-wah on or off.
    pub fn set_auto_wah_enabled(&self, enabled: bool) {
        self.auto_wah_enabled.store(enabled, Ordering::Relaxed);
    }

    fn cell(&self, index: usize) -> Option<&AtomicF64> {
        match index {
            Self::GAIN => Some(&self.gain),
            Self::PULSE_WIDTH => Some(&self.pulse_width),
            Self::ATTACK => Some(&self.attack),
            Self::DECAY => Some(&self.decay),
            Self::SUSTAIN => Some(&self.sustain),
            Self::RELEASE => Some(&self.release),
            Self::AUTO_WAH_FREQUENCY => Some(&self.auto_wah_frequency),
            Self::AUTO_WAH_DEPTH => Some(&self.auto_wah_depth),
            Self::AUTO_WAH_RATE => Some(&self.auto_wah_rate),
            _ => None,
        }
    }
}

impl ParameterInfo for SynthParams {
    fn param_count(&self) -> usize {
        DESCRIPTORS.len()
    }

    fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
        DESCRIPTORS.get(index).copied()
    }

    fn get_param(&self, index: usize) -> f64 {
        match index {
            Self::WAVE_TYPE => f64::from(self.wave_type().to_i32()),
            Self::AUTO_WAH_ENABLED => {
                if self.auto_wah_enabled() {
                    1.0
                } else {
                    0.0
                }
            }
            _ => self.cell(index).map_or(0.0, AtomicF64::load),
        }
    }

    /// The waveform selector ignores values that do not round to 1-4; the
    /// toggle treats anything at or above 0.5 as on.
    fn set_param(&self, index: usize, value: f64) {
        match index {
            Self::WAVE_TYPE => {
                if let Some(wave) = WaveType::from_i32(libm::round(value) as i32) {
                    self.set_wave_type(wave);
                }
            }
            Self::AUTO_WAH_ENABLED => self.set_auto_wah_enabled(value >= 0.5),
            _ => {
                if let Some(cell) = self.cell(index) {
                    cell.store(value);
                }
            }
        }
    }
}
