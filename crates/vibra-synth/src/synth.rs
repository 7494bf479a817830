//! The polyphonic subtractive synthesizer engine.
//!
//! Per block, in order:
//!
//! 1. Clear the output.
//! 2. Dispatch the block's note events to the voice pool.
//! 3. Snapshot the parameters and refresh every voice with them.
//! 4. Render sounding voices into channel 0, then copy it to the others.
//! 5. If the auto-wah is on, re-tune it and filter channels 1...

#[cfg(not(feature = "std"))]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std as alloc;

use alloc::sync::Arc;
use alloc::vec::Vec;

use vibra_core::{StateError, block_len};

use crate::auto_wah::AutoWah;
use crate::midi::NoteEvent;
use crate::params::{SynthParams, SynthSnapshot};
use crate::voice::{Allocation, VoicePool};

/// Number of voices in the pool.
pub const VOICE_COUNT: usize = 16;

/// Sixteen-voice synthesizer with a swept band-pass output filter.
///
/// Parameters live in a shared [`SynthParams`] store; clone the handle from
/// [`params`](Self::params) to drive it from another thread.
///
/// # Example
///
/// ```rust
/// use vibra_synth::{NoteEvent, SubtractiveSynth};
///
/// let mut synth = SubtractiveSynth::new();
/// synth.prepare(48000.0, 256);
///
/// let mut left = vec![0.0f32; 256];
/// let mut right = vec![0.0f32; 256];
/// let events = [NoteEvent::On { note: 69, velocity: 100 }];
/// synth.process_block(&mut [&mut left[..], &mut right[..]], &events, None);
///
/// assert_eq!(synth.active_voice_count(), 1);
/// assert_eq!(left, right);
/// ```
#[derive(Debug)]
pub struct SubtractiveSynth {
    params: Arc<SynthParams>,
    voices: VoicePool<VOICE_COUNT>,
    auto_wah: AutoWah,
    sample_rate: f64,
    max_block_size: usize,
}

impl Default for SubtractiveSynth {
    fn default() -> Self {
        Self::new()
    }
}

impl SubtractiveSynth {
    /// Create an engine with a fresh default parameter store.
    pub fn new() -> Self {
        Self::with_params(Arc::new(SynthParams::new()))
    }

    /// Create an engine reading from an existing parameter store.
    pub fn with_params(params: Arc<SynthParams>) -> Self {
        Self {
            params,
            voices: VoicePool::new(),
            auto_wah: AutoWah::new(),
            sample_rate: 0.0,
            max_block_size: 0,
        }
    }

    /// Shared parameter store.
    pub fn params(&self) -> &Arc<SynthParams> {
        &self.params
    }

    /// Sample rate from the last [`prepare`](Self::prepare).
    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    /// Largest block size announced by the last [`prepare`](Self::prepare).
    pub fn max_block_size(&self) -> usize {
        self.max_block_size
    }

    /// (Re)initialize for a stream configuration.
    ///
    /// Silences every voice, clears the auto-wah filter history, rewinds its
    /// free-running LFO, and tunes it for `t = 0` when enabled.
    pub fn prepare(&mut self, sample_rate: f64, max_block_size: usize) {
        self.sample_rate = sample_rate;
        self.max_block_size = max_block_size;

        let snapshot = self.params.snapshot();
        self.voices.set_sample_rate(sample_rate);
        self.voices.reset();
        self.voices.set_global_parameters(&snapshot.voice);

        self.auto_wah.prepare(sample_rate);
        if snapshot.auto_wah.enabled {
            self.auto_wah.update_with_time(&snapshot.auto_wah, 0.0);
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            sample_rate,
            max_block_size,
            voices = VOICE_COUNT,
            "synth prepared"
        );
    }

    /// Start a note at `frequency` Hz with MIDI `velocity` (0-127).
    pub fn note_on(&mut self, frequency: f64, velocity: f64) -> Allocation {
        self.voices.note_on(frequency, velocity)
    }

    /// Release the note at `frequency` Hz. Returns the released voice index.
    pub fn note_off(&mut self, frequency: f64) -> Option<usize> {
        self.voices.note_off(frequency)
    }

    /// Route one decoded note event.
    pub fn handle_event(&mut self, event: NoteEvent) {
        match event {
            NoteEvent::On { velocity, .. } => {
                self.note_on(event.frequency(), f64::from(velocity));
            }
            NoteEvent::Off { .. } => {
                self.note_off(event.frequency());
            }
        }
    }

    /// Render one block, replacing the contents of `channels`.
    ///
    /// `events` are applied in order before any sample is rendered.
    /// `transport_time` is the host's playhead position in seconds, used to
    /// phase the auto-wah LFO; pass `None` when the host has no transport and
    /// the free-running LFO is used instead.
    pub fn process_block(
        &mut self,
        channels: &mut [&mut [f32]],
        events: &[NoteEvent],
        transport_time: Option<f64>,
    ) {
        let frames = block_len(channels);
        for channel in channels.iter_mut() {
            channel.fill(0.0);
        }

        for &event in events {
            self.handle_event(event);
        }

        let snapshot = self.params.snapshot();
        self.voices.set_global_parameters(&snapshot.voice);

        let Some((first, rest)) = channels.split_first_mut() else {
            return;
        };
        let first = &mut first[..frames];
        self.voices.render_into(first);
        for channel in rest.iter_mut() {
            channel[..frames].copy_from_slice(first);
        }

        if snapshot.auto_wah.enabled {
            match transport_time {
                Some(seconds) => self.auto_wah.update_with_time(&snapshot.auto_wah, seconds),
                None => self.auto_wah.update_with_phase(&snapshot.auto_wah),
            }
            self.auto_wah.process(channels, frames);
        }
    }

    /// Number of voices currently sounding.
    pub fn active_voice_count(&self) -> usize {
        self.voices.active_voice_count()
    }

    /// The voice pool, for inspection.
    pub fn voices(&self) -> &VoicePool<VOICE_COUNT> {
        &self.voices
    }

    /// The auto-wah filter, for inspection.
    pub fn auto_wah(&self) -> &AutoWah {
        &self.auto_wah
    }

    /// Serialize the current parameters to the raw state layout.
    pub fn save_state(&self) -> Vec<u8> {
        self.params.snapshot().to_state()
    }

    /// Restore parameters from a raw state blob.
    ///
    /// Nothing is written unless the whole blob decodes.
    pub fn restore_state(&self, bytes: &[u8]) -> Result<(), StateError> {
        match SynthSnapshot::from_state(bytes) {
            Ok(snapshot) => {
                self.params.apply(&snapshot);
                Ok(())
            }
            Err(err) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(%err, len = bytes.len(), "synth state rejected");
                Err(err)
            }
        }
    }
}
