//! Chorus/flanger: one modulated delay line per channel.
//!
//! A single sine LFO sweeps the delay time of every channel:
//!
//! ```text
//! delay_ms = delay · (1 + depth · lfo)         lfo ∈ [0, 1]
//! wet      = line.read(delay_ms)
//! line    <- input + feedback · wet            feedback ≤ 0.95
//! output   = 0.5 · (input + wet)
//! ```
//!
//! The two modes share the same four controls. Flanger mode narrows the
//! delay range to a few milliseconds and raises the rate floor; switching
//! modes rescales the controls so each keeps its relative position (see
//! [`ChorusFlangerParams::switch_mode`]).
//!
//! | Control | Chorus | Flanger | Default |
//! |---------|--------|---------|---------|
//! | Rate | 0.1-20 Hz | 0.2-20 Hz | 5 Hz |
//! | Depth | 0-1 | 0-1 | 0.6 |
//! | Delay | 1-25 ms | 0.5-5 ms | 15 ms |
//! | Feedback | 0-1 | 0-1 | 0.05 |

#[cfg(not(feature = "std"))]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std as alloc;

use alloc::sync::Arc;
use alloc::vec::Vec;
use core::sync::atomic::{AtomicU8, Ordering};

use vibra_core::{
    AtomicF32, Effect, InterpolatedDelay, Lfo, ParamDescriptor, ParamUnit, ParameterInfo,
    StateError, StateReader, StateWriter, block_len, map_range,
};

/// Size of a serialized chorus/flanger state blob in bytes.
pub const CHORUS_FLANGER_STATE_LEN: usize = 1 + 1 + 4 * 4;

/// Highest channel count processed. Extra channels pass through.
pub const MAX_CHANNELS: usize = 8;

/// Feedback is capped here inside the DSP regardless of the control value.
const MAX_FEEDBACK: f32 = 0.95;

/// Longest delay the lines must hold: 25 ms base swept to twice its length.
const MAX_DELAY_MS: f32 = 50.0;

const STEP: f64 = 0.01;

/// Which flavour of modulated delay the controls describe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum ModulationMode {
    /// Longer, slower delay sweep.
    #[default]
    Chorus = 0,
    /// Short delay sweep with a higher rate floor.
    Flanger = 1,
}

impl ModulationMode {
    /// Decode a persisted mode byte.
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(ModulationMode::Chorus),
            1 => Some(ModulationMode::Flanger),
            _ => None,
        }
    }

    /// Lowercase name used in presets and on the command line.
    pub fn name(self) -> &'static str {
        match self {
            ModulationMode::Chorus => "chorus",
            ModulationMode::Flanger => "flanger",
        }
    }

    /// Parse a name (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        [ModulationMode::Chorus, ModulationMode::Flanger]
            .into_iter()
            .find(|m| m.name().eq_ignore_ascii_case(name.trim()))
    }

    /// Rate control range in Hz.
    pub fn rate_range(self) -> (f64, f64) {
        match self {
            ModulationMode::Chorus => (0.1, 20.0),
            ModulationMode::Flanger => (0.2, 20.0),
        }
    }

    /// Delay control range in milliseconds.
    pub fn delay_range(self) -> (f64, f64) {
        match self {
            ModulationMode::Chorus => (1.0, 25.0),
            ModulationMode::Flanger => (0.5, 5.0),
        }
    }

    /// Display skew of the depth control (1.0 is linear).
    pub fn depth_skew(self) -> f64 {
        match self {
            ModulationMode::Chorus => 1.0,
            ModulationMode::Flanger => 1.2,
        }
    }
}

/// Chorus/flanger parameters for one block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChorusFlangerSnapshot {
    /// Active mode.
    pub mode: ModulationMode,
    /// LFO rate in Hz.
    pub rate: f32,
    /// Sweep depth as a fraction of the base delay.
    pub depth: f32,
    /// Base delay in milliseconds.
    pub delay: f32,
    /// Feedback amount, 0-1.
    pub feedback: f32,
}

impl Default for ChorusFlangerSnapshot {
    fn default() -> Self {
        Self {
            mode: ModulationMode::Chorus,
            rate: 5.0,
            depth: 0.6,
            delay: 15.0,
            feedback: 0.05,
        }
    }
}

impl ChorusFlangerSnapshot {
    /// Serialize as `pad u8 | mode u8 | rate f32 | depth f32 | delay f32 | feedback f32`.
    pub fn to_state(&self) -> Vec<u8> {
        let mut writer = StateWriter::new();
        writer.write_u8(self.mode as u8);
        writer.write_f32(self.rate);
        writer.write_f32(self.depth);
        writer.write_f32(self.delay);
        writer.write_f32(self.feedback);
        writer.finish()
    }

    /// Decode the fixed state layout. Trailing bytes are ignored.
    pub fn from_state(bytes: &[u8]) -> Result<Self, StateError> {
        let mut reader = StateReader::new(bytes)?;
        let raw_mode = reader.read_u8()?;
        let mode = ModulationMode::from_u8(raw_mode).ok_or(StateError::InvalidMode(raw_mode))?;
        Ok(Self {
            mode,
            rate: reader.read_f32()?,
            depth: reader.read_f32()?,
            delay: reader.read_f32()?,
            feedback: reader.read_f32()?,
        })
    }
}

/// Lock-free chorus/flanger parameter store.
///
/// Descriptors for rate and delay follow the current mode.
///
/// # Example
///
/// ```rust
/// use vibra_core::ParameterInfo;
/// use vibra_effects::{ChorusFlangerParams, ModulationMode};
///
/// let params = ChorusFlangerParams::new();
/// params.switch_mode(ModulationMode::Flanger);
///
/// let snap = params.snapshot();
/// assert!((snap.feedback - 0.15).abs() < 1e-6);
/// assert_eq!(params.param_info(ChorusFlangerParams::DELAY).unwrap().max, 5.0);
/// ```
#[derive(Debug)]
pub struct ChorusFlangerParams {
    mode: AtomicU8,
    rate: AtomicF32,
    depth: AtomicF32,
    delay: AtomicF32,
    feedback: AtomicF32,
}

impl Default for ChorusFlangerParams {
    fn default() -> Self {
        Self::new()
    }
}

impl ChorusFlangerParams {
    /// Index of the LFO rate.
    pub const RATE: usize = 0;
    /// Index of the sweep depth.
    pub const DEPTH: usize = 1;
    /// Index of the base delay.
    pub const DELAY: usize = 2;
    /// Index of the feedback amount.
    pub const FEEDBACK: usize = 3;

    /// Create a store holding the default (chorus) values.
    pub fn new() -> Self {
        let d = ChorusFlangerSnapshot::default();
        Self {
            mode: AtomicU8::new(d.mode as u8),
            rate: AtomicF32::new(d.rate),
            depth: AtomicF32::new(d.depth),
            delay: AtomicF32::new(d.delay),
            feedback: AtomicF32::new(d.feedback),
        }
    }

    /// Current mode.
    pub fn mode(&self) -> ModulationMode {
        ModulationMode::from_u8(self.mode.load(Ordering::Relaxed)).unwrap_or_default()
    }

    /// Store `mode` without touching the other controls.
    pub fn set_mode(&self, mode: ModulationMode) {
        self.mode.store(mode as u8, Ordering::Relaxed);
    }

    /// Read every parameter.
    pub fn snapshot(&self) -> ChorusFlangerSnapshot {
        ChorusFlangerSnapshot {
            mode: self.mode(),
            rate: self.rate.load(),
            depth: self.depth.load(),
            delay: self.delay.load(),
            feedback: self.feedback.load(),
        }
    }

    /// Write every parameter as-is, mode included, without remapping.
    pub fn apply(&self, snapshot: &ChorusFlangerSnapshot) {
        self.set_mode(snapshot.mode);
        self.rate.store(snapshot.rate);
        self.depth.store(snapshot.depth);
        self.delay.store(snapshot.delay);
        self.feedback.store(snapshot.feedback);
    }

    /// Switch modes, rescaling the controls to the new ranges.
    ///
    /// Rate and delay are mapped linearly from the old range onto the new
    /// one. Feedback is tripled going to flanger and divided by three going
    /// back. Each result is clamped to its new range and snapped to the
    /// 0.01 control step. Depth is unchanged.
    ///
    /// Returns `false` (and changes nothing) if `mode` is already active.
    pub fn switch_mode(&self, mode: ModulationMode) -> bool {
        let old = self.snapshot();
        if old.mode == mode {
            return false;
        }

        let (from_rate, from_delay) = (old.mode.rate_range(), old.mode.delay_range());
        let (to_rate, to_delay) = (mode.rate_range(), mode.delay_range());

        let rate = map_range(
            old.rate,
            from_rate.0 as f32,
            from_rate.1 as f32,
            to_rate.0 as f32,
            to_rate.1 as f32,
        );
        let delay = map_range(
            old.delay,
            from_delay.0 as f32,
            from_delay.1 as f32,
            to_delay.0 as f32,
            to_delay.1 as f32,
        );
        let feedback = match mode {
            ModulationMode::Flanger => old.feedback * 3.0,
            ModulationMode::Chorus => old.feedback / 3.0,
        };

        self.set_mode(mode);
        let constrain = |index: usize, value: f32| {
            self.param_info(index)
                .map_or(value, |d| d.constrain(f64::from(value)) as f32)
        };
        self.rate.store(constrain(Self::RATE, rate));
        self.delay.store(constrain(Self::DELAY, delay));
        self.feedback.store(constrain(Self::FEEDBACK, feedback));
        true
    }
}

impl ParameterInfo for ChorusFlangerParams {
    fn param_count(&self) -> usize {
        4
    }

    fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
        let mode = self.mode();
        let desc = match index {
            Self::RATE => {
                let (min, max) = mode.rate_range();
                ParamDescriptor::new("Rate", "rate", ParamUnit::Hertz, min, max, 5.0)
            }
            Self::DEPTH => ParamDescriptor::new("Depth", "depth", ParamUnit::Ratio, 0.0, 1.0, 0.6),
            Self::DELAY => {
                let (min, max) = mode.delay_range();
                ParamDescriptor::new("Delay", "delay", ParamUnit::Milliseconds, min, max, 15.0)
            }
            Self::FEEDBACK => {
                ParamDescriptor::new("Feedback", "feedback", ParamUnit::Ratio, 0.0, 1.0, 0.05)
            }
            _ => return None,
        };
        Some(desc.with_step(STEP))
    }

    fn get_param(&self, index: usize) -> f64 {
        match index {
            Self::RATE => f64::from(self.rate.load()),
            Self::DEPTH => f64::from(self.depth.load()),
            Self::DELAY => f64::from(self.delay.load()),
            Self::FEEDBACK => f64::from(self.feedback.load()),
            _ => 0.0,
        }
    }

    fn set_param(&self, index: usize, value: f64) {
        let value = value as f32;
        match index {
            Self::RATE => self.rate.store(value),
            Self::DEPTH => self.depth.store(value),
            Self::DELAY => self.delay.store(value),
            Self::FEEDBACK => self.feedback.store(value),
            _ => {}
        }
    }
}

/// Chorus/flanger engine.
///
/// Delay memory is allocated in [`prepare`](Effect::prepare); until then
/// blocks pass through untouched.
///
/// # Example
///
/// ```rust
/// use vibra_core::Effect;
/// use vibra_effects::ChorusFlanger;
///
/// let mut chorus = ChorusFlanger::new();
/// chorus.prepare(48000.0, 256);
///
/// let mut left = vec![0.0f32; 256];
/// let mut right = vec![0.0f32; 256];
/// left[0] = 1.0;
/// chorus.process_block(&mut [&mut left[..], &mut right[..]]);
/// assert_eq!(left[0], 0.5);
/// ```
#[derive(Debug)]
pub struct ChorusFlanger {
    params: Arc<ChorusFlangerParams>,
    lines: Vec<InterpolatedDelay>,
    lfo: Lfo,
    sample_rate: f32,
}

impl Default for ChorusFlanger {
    fn default() -> Self {
        Self::new()
    }
}

impl ChorusFlanger {
    /// Create an engine with a fresh default parameter store.
    pub fn new() -> Self {
        Self::with_params(Arc::new(ChorusFlangerParams::new()))
    }

    /// Create an engine reading from an existing parameter store.
    pub fn with_params(params: Arc<ChorusFlangerParams>) -> Self {
        Self {
            params,
            lines: Vec::new(),
            lfo: Lfo::default(),
            sample_rate: 0.0,
        }
    }

    /// Shared parameter store.
    pub fn params(&self) -> &Arc<ChorusFlangerParams> {
        &self.params
    }

    /// Serialize the current parameters.
    pub fn save_state(&self) -> Vec<u8> {
        self.params.snapshot().to_state()
    }

    /// Restore parameters from a raw state blob. Nothing is written unless
    /// the whole blob decodes.
    pub fn restore_state(&self, bytes: &[u8]) -> Result<(), StateError> {
        match ChorusFlangerSnapshot::from_state(bytes) {
            Ok(snapshot) => {
                self.params.apply(&snapshot);
                Ok(())
            }
            Err(err) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(%err, len = bytes.len(), "chorus/flanger state rejected");
                Err(err)
            }
        }
    }
}

impl Effect for ChorusFlanger {
    /// Allocate [`MAX_CHANNELS`] delay lines. Channels from index
    /// `MAX_CHANNELS` on have no line and pass through unprocessed.
    fn prepare(&mut self, sample_rate: f64, _max_block_size: usize) {
        self.sample_rate = sample_rate as f32;
        self.lines = (0..MAX_CHANNELS)
            .map(|_| InterpolatedDelay::from_ms(self.sample_rate, MAX_DELAY_MS))
            .collect();
        self.lfo.set_sample_rate(self.sample_rate);
        self.lfo.reset();

        #[cfg(feature = "tracing")]
        tracing::debug!(sample_rate, channels = MAX_CHANNELS, "chorus/flanger prepared");
    }

    fn process_block(&mut self, channels: &mut [&mut [f32]]) {
        if self.lines.is_empty() {
            return;
        }
        let snap = self.params.snapshot();
        self.lfo.set_frequency(snap.rate);
        let feedback = snap.feedback.clamp(0.0, MAX_FEEDBACK);
        let samples_per_ms = self.sample_rate / 1000.0;

        for frame in 0..block_len(channels) {
            let sweep = snap.depth * self.lfo.next_unipolar();
            let delay_samples = snap.delay * (1.0 + sweep) * samples_per_ms;
            for (channel, line) in channels.iter_mut().zip(self.lines.iter_mut()) {
                let input = channel[frame];
                // Tap 0 is the previous write, one sample old.
                let wet = line.read((delay_samples - 1.0).max(0.0));
                line.write(input + feedback * wet);
                channel[frame] = 0.5 * (input + wet);
            }
        }
    }

    fn reset(&mut self) {
        for line in &mut self.lines {
            line.clear();
        }
        self.lfo.reset();
    }
}
