//! Vibra Effects - modulation effects
//!
//! Two block-processing effects sharing the [`Effect`](vibra_core::Effect)
//! lifecycle of the synth engine:
//!
//! - [`Tremolo`] - Sine amplitude modulation, depth and rate
//! - [`ChorusFlanger`] - LFO-swept delay line per channel with feedback,
//!   switchable between chorus and flanger ranges
//!
//! Each effect reads its controls from a lock-free store ([`TremoloParams`],
//! [`ChorusFlangerParams`]) once per block and can save or restore them as a
//! small fixed-layout byte blob.
//!
//! # Example
//!
//! ```rust
//! use vibra_core::Effect;
//! use vibra_effects::{ChorusFlanger, ModulationMode, Tremolo};
//!
//! let mut tremolo = Tremolo::new();
//! let mut flanger = ChorusFlanger::new();
//! flanger.params().switch_mode(ModulationMode::Flanger);
//!
//! tremolo.prepare(48000.0, 128);
//! flanger.prepare(48000.0, 128);
//!
//! let mut left = vec![0.25f32; 128];
//! let mut right = vec![0.25f32; 128];
//! tremolo.process_block(&mut [&mut left[..], &mut right[..]]);
//! flanger.process_block(&mut [&mut left[..], &mut right[..]]);
//! assert!(left.iter().all(|s| s.is_finite()));
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

pub mod chorus_flanger;
pub mod tremolo;

pub use chorus_flanger::{
    CHORUS_FLANGER_STATE_LEN, ChorusFlanger, ChorusFlangerParams, ChorusFlangerSnapshot,
    MAX_CHANNELS, ModulationMode,
};
pub use tremolo::{TREMOLO_STATE_LEN, Tremolo, TremoloParams, TremoloSnapshot};
