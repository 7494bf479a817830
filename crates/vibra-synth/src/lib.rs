//! Vibra Synth - polyphonic subtractive synthesizer
//!
//! A sixteen-voice synthesizer with naive (non-band-limited) waveforms, a
//! linear ADSR envelope per voice, and an optional LFO-swept band-pass
//! "auto-wah" on the mixed output.
//!
//! # Core Components
//!
//! ## Oscillator
//!
//! - [`WaveType`] - Sine, Sawtooth, Square (variable pulse width), Triangle
//!
//! ```rust
//! use vibra_synth::WaveType;
//!
//! let s = WaveType::Square.render(1.0, 0.5);
//! assert_eq!(s, 1.0);
//! ```
//!
//! ## Envelope
//!
//! - [`Envelope`] - Sample-counted ADSR state machine
//! - [`EnvelopePhase`] - Off, Attack, Decay, Sustain, Release
//! - [`Adsr`] - Stage times and sustain level
//!
//! ## Voices
//!
//! - [`Voice`] - Phase accumulator plus envelope
//! - [`VoicePool`] - Fixed-size pool: same-pitch retrigger, first free, else drop
//! - [`NoteEvent`] / [`midi_to_freq`] - Note-on/off decoding
//!
//! ## Auto-Wah
//!
//! - [`AutoWah`] - Band-pass filter re-tuned once per block from an LFO
//!
//! ## Engine
//!
//! - [`SubtractiveSynth`] - `prepare` / `process_block` / note dispatch / state
//! - [`SynthParams`] - Lock-free parameter store shared with the UI thread
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible (with `alloc`). Disable the default
//! `std` feature:
//!
//! ```toml
//! [dependencies]
//! vibra-synth = { version = "0.1", default-features = false }
//! ```
//!
//! # Example
//!
//! ```rust
//! use vibra_core::ParameterInfo;
//! use vibra_synth::{NoteEvent, SubtractiveSynth, SynthParams};
//!
//! let mut synth = SubtractiveSynth::new();
//! synth.params().set_param(SynthParams::AUTO_WAH_ENABLED, 1.0);
//! synth.prepare(44100.0, 512);
//!
//! let mut left = vec![0.0f32; 512];
//! let mut right = vec![0.0f32; 512];
//! let chord = [
//!     NoteEvent::On { note: 60, velocity: 100 },
//!     NoteEvent::On { note: 64, velocity: 100 },
//!     NoteEvent::On { note: 67, velocity: 100 },
//! ];
//! synth.process_block(&mut [&mut left[..], &mut right[..]], &chord, None);
//! assert_eq!(synth.active_voice_count(), 3);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

pub mod auto_wah;
pub mod envelope;
pub mod midi;
pub mod oscillator;
pub mod params;
pub mod synth;
pub mod voice;

pub use auto_wah::{AutoWah, AutoWahSettings, MAX_CHANNELS};
pub use envelope::{Adsr, Envelope, EnvelopePhase};
pub use midi::{NoteEvent, midi_to_freq};
pub use oscillator::{WaveType, phase_increment};
pub use params::{STATE_LEN, SynthParams, SynthSnapshot};
pub use synth::{SubtractiveSynth, VOICE_COUNT};
pub use voice::{Allocation, Voice, VoiceParams, VoicePool};
