//! Vibra Core - DSP primitives shared by the vibra engines
//!
//! This crate provides the building blocks used by the synthesizer, tremolo,
//! and chorus/flanger engines, designed for real-time audio processing with
//! zero allocation in the audio path.
//!
//! # Core Abstractions
//!
//! ## Effect System
//!
//! - [`Effect`] - Object-safe trait for multichannel block effects
//!
//! ## Filters and Delay Lines
//!
//! - [`Biquad`] - Second-order section re-tuned per block by the auto-wah
//! - [`bandpass_coefficients`] - Unity-gain-at-centre band-pass [`Coefficients`]
//! - [`InterpolatedDelay`] - Fractional-tap ring buffer for the chorus/flanger
//!
//! ## Modulation
//!
//! - [`Lfo`] - Free-running unipolar sine LFO
//!
//! ## Parameters and State
//!
//! - [`ParameterInfo`] / [`ParamDescriptor`] - Index-based parameter introspection
//! - [`AtomicF32`] / [`AtomicF64`] - Lock-free parameter cells shared between
//!   the UI thread (writer) and the audio thread (reader)
//! - [`StateWriter`] / [`StateReader`] - Fixed-layout raw parameter dumps
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible (with `alloc`). Disable the default
//! `std` feature in your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! vibra-core = { version = "0.1", default-features = false }
//! ```
//!
//! # Design Principles
//!
//! - **Real-time safe**: No allocations, locks, or logging in processing paths
//! - **Block-granular parameters**: engines snapshot their parameters once per block
//! - **Object-safe traits**: `Box<dyn Effect>` for offline processing chains

#![cfg_attr(not(feature = "std"), no_std)]

pub mod atomic;
pub mod biquad;
pub mod delay;
pub mod effect;
pub mod lfo;
pub mod math;
pub mod param_info;
pub mod state;

// Re-export main types at crate root
pub use atomic::{AtomicF32, AtomicF64};
pub use biquad::{Biquad, Coefficients, bandpass_coefficients};
pub use delay::InterpolatedDelay;
pub use effect::{Effect, block_len};
pub use lfo::Lfo;
pub use math::{map_range, unipolar_sine};
pub use param_info::{ParamDescriptor, ParamUnit, ParameterInfo};
pub use state::{StateError, StateReader, StateWriter};
