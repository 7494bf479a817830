//! Sine tremolo.
//!
//! Amplitude modulation by a unipolar sine LFO:
//!
//! ```text
//! modulator = 0.5 · (1 + sin(2π · phase))
//! output    = input · (1 - depth · modulator)
//! ```
//!
//! The phase advances by `rate / sample_rate` per processed sample and is not
//! rewound between channels: a block is walked channel by channel, so channel
//! 1 picks up the sweep where channel 0 left off and the phase moves
//! `channels · frames` steps per block.

#[cfg(not(feature = "std"))]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std as alloc;

use alloc::sync::Arc;
use alloc::vec::Vec;

use vibra_core::{
    AtomicF32, Effect, Lfo, ParamDescriptor, ParamUnit, ParameterInfo, StateError, StateReader,
    StateWriter, block_len,
};

/// Size of a serialized tremolo state blob in bytes.
pub const TREMOLO_STATE_LEN: usize = 1 + 4 + 4;

const DESCRIPTORS: [ParamDescriptor; 2] = [
    ParamDescriptor::new("Depth", "depth", ParamUnit::Ratio, 0.0, 1.0, 0.5),
    ParamDescriptor::new("Rate", "rate", ParamUnit::Hertz, 0.1, 10.0, 2.0),
];

/// Tremolo parameters for one block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TremoloSnapshot {
    /// Modulation depth, 0-1.
    pub depth: f32,
    /// LFO rate in Hz.
    pub rate: f32,
}

impl Default for TremoloSnapshot {
    fn default() -> Self {
        Self {
            depth: 0.5,
            rate: 2.0,
        }
    }
}

impl TremoloSnapshot {
    /// Serialize as `pad u8 | depth f32 | rate f32`.
    pub fn to_state(&self) -> Vec<u8> {
        let mut writer = StateWriter::new();
        writer.write_f32(self.depth);
        writer.write_f32(self.rate);
        writer.finish()
    }

    /// Decode the fixed state layout. Trailing bytes are ignored.
    pub fn from_state(bytes: &[u8]) -> Result<Self, StateError> {
        let mut reader = StateReader::new(bytes)?;
        Ok(Self {
            depth: reader.read_f32()?,
            rate: reader.read_f32()?,
        })
    }
}

/// Lock-free tremolo parameter store.
#[derive(Debug)]
pub struct TremoloParams {
    depth: AtomicF32,
    rate: AtomicF32,
}

impl Default for TremoloParams {
    fn default() -> Self {
        Self::new()
    }
}

impl TremoloParams {
    /// Index of the depth parameter.
    pub const DEPTH: usize = 0;
    /// Index of the rate parameter.
    pub const RATE: usize = 1;

    /// Create a store holding the default values.
    pub fn new() -> Self {
        let defaults = TremoloSnapshot::default();
        Self {
            depth: AtomicF32::new(defaults.depth),
            rate: AtomicF32::new(defaults.rate),
        }
    }

    /// Read both parameters.
    pub fn snapshot(&self) -> TremoloSnapshot {
        TremoloSnapshot {
            depth: self.depth.load(),
            rate: self.rate.load(),
        }
    }

    /// Write both parameters.
    pub fn apply(&self, snapshot: &TremoloSnapshot) {
        self.depth.store(snapshot.depth);
        self.rate.store(snapshot.rate);
    }

    /// Set modulation depth (not clamped).
    pub fn set_depth(&self, depth: f32) {
        self.depth.store(depth);
    }

    /// Set LFO rate in Hz (not clamped).
    pub fn set_rate(&self, rate: f32) {
        self.rate.store(rate);
    }
}

impl ParameterInfo for TremoloParams {
    fn param_count(&self) -> usize {
        DESCRIPTORS.len()
    }

    fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
        DESCRIPTORS.get(index).copied()
    }

    fn get_param(&self, index: usize) -> f64 {
        match index {
            Self::DEPTH => f64::from(self.depth.load()),
            Self::RATE => f64::from(self.rate.load()),
            _ => 0.0,
        }
    }

    fn set_param(&self, index: usize, value: f64) {
        match index {
            Self::DEPTH => self.depth.store(value as f32),
            Self::RATE => self.rate.store(value as f32),
            _ => {}
        }
    }
}

/// Tremolo engine.
///
/// # Example
///
/// ```rust
/// use vibra_core::Effect;
/// use vibra_effects::Tremolo;
///
/// let mut tremolo = Tremolo::new();
/// tremolo.params().set_depth(0.0);
/// tremolo.prepare(44100.0, 64);
///
/// let mut left = [0.5f32; 64];
/// tremolo.process_block(&mut [&mut left[..]]);
/// assert_eq!(left, [0.5; 64]);
/// ```
#[derive(Debug)]
pub struct Tremolo {
    params: Arc<TremoloParams>,
    lfo: Lfo,
}

impl Default for Tremolo {
    fn default() -> Self {
        Self::new()
    }
}

impl Tremolo {
    /// Create a tremolo with a fresh default parameter store.
    pub fn new() -> Self {
        Self::with_params(Arc::new(TremoloParams::new()))
    }

    /// Create a tremolo reading from an existing parameter store.
    pub fn with_params(params: Arc<TremoloParams>) -> Self {
        let rate = params.snapshot().rate;
        Self {
            params,
            lfo: Lfo::new(48000.0, rate),
        }
    }

    /// Shared parameter store.
    pub fn params(&self) -> &Arc<TremoloParams> {
        &self.params
    }

    /// Current LFO phase in cycles, \[0, 1).
    pub fn phase(&self) -> f32 {
        self.lfo.phase()
    }

    /// Move the LFO to `phase` cycles.
    pub fn set_phase(&mut self, phase: f32) {
        self.lfo.set_phase(phase);
    }

    /// Serialize the current parameters.
    pub fn save_state(&self) -> Vec<u8> {
        self.params.snapshot().to_state()
    }

    /// Restore parameters from a raw state blob. Nothing is written unless
    /// the whole blob decodes.
    pub fn restore_state(&self, bytes: &[u8]) -> Result<(), StateError> {
        match TremoloSnapshot::from_state(bytes) {
            Ok(snapshot) => {
                self.params.apply(&snapshot);
                Ok(())
            }
            Err(err) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(%err, len = bytes.len(), "tremolo state rejected");
                Err(err)
            }
        }
    }
}

impl Effect for Tremolo {
    fn prepare(&mut self, sample_rate: f64, _max_block_size: usize) {
        self.lfo.set_sample_rate(sample_rate as f32);
        self.lfo.reset();

        #[cfg(feature = "tracing")]
        tracing::debug!(sample_rate, "tremolo prepared");
    }

    fn process_block(&mut self, channels: &mut [&mut [f32]]) {
        let TremoloSnapshot { depth, rate } = self.params.snapshot();
        self.lfo.set_frequency(rate);

        let frames = block_len(channels);
        for channel in channels.iter_mut() {
            for sample in &mut channel[..frames] {
                *sample *= 1.0 - depth * self.lfo.next_unipolar();
            }
        }
    }

    fn reset(&mut self) {
        self.lfo.reset();
    }
}
