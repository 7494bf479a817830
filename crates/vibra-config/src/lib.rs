//! Preset management for the vibra synth and effects.
//!
//! Presets are TOML files with an optional table per engine. Keys are the
//! parameter keys reported by each store's [`ParameterInfo`] descriptors.
//!
//! # Features
//!
//! - **Preset files**: load, save, and validate TOML presets
//! - **Application**: write a preset into the lock-free parameter stores,
//!   clamped to each parameter's declared range
//! - **Capture**: snapshot live stores back into a preset
//! - **Factory presets**: a small built-in set, addressable by name
//!
//! # Example
//!
//! ```rust
//! use vibra_config::Preset;
//! use vibra_synth::{SynthParams, WaveType};
//!
//! let preset = Preset::from_toml(r#"
//! name = "Reedy"
//!
//! [synth]
//! wave_type = "square"
//! pulse_width = 0.3
//! "#).unwrap();
//!
//! let params = SynthParams::new();
//! preset.apply_synth(&params).unwrap();
//! assert_eq!(params.wave_type(), WaveType::Square);
//! ```
//!
//! [`ParameterInfo`]: vibra_core::ParameterInfo

mod error;
mod preset;
mod section;

/// Factory presets bundled with the library.
pub mod factory_presets;

pub use error::ConfigError;
pub use factory_presets::{
    FACTORY_PRESET_NAMES, factory_presets, get_factory_preset, is_factory_preset,
};
pub use preset::Preset;
pub use section::{ParamValue, Section};
