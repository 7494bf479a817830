//! Preset file format and operations.

use serde::{Deserialize, Serialize};
use std::path::Path;

use vibra_core::ParameterInfo;
use vibra_effects::{ChorusFlangerParams, ModulationMode, TremoloParams};
use vibra_synth::{SynthParams, WaveType};

use crate::error::ConfigError;
use crate::factory_presets::get_factory_preset;
use crate::section::{ParamValue, RangePolicy, Section, capture, resolve};

/// Key of the chorus/flanger mode inside `[chorus_flanger]`.
const MODE_KEY: &str = "mode";

/// Settings for any combination of the three engines.
///
/// Each engine has its own optional table. Applying a table first resets
/// that engine's store to its defaults, so keys left out of the file take
/// their default value; engines without a table are left alone.
///
/// # TOML Format
///
/// ```toml
/// name = "Wah Lead"
/// description = "Bright saw with the auto-wah engaged"
///
/// [synth]
/// wave_type = "sawtooth"
/// attack = 0.005
/// auto_wah_enabled = true
/// auto_wah_rate = 3.0
///
/// [tremolo]
/// depth = 0.3
///
/// [chorus_flanger]
/// mode = "flanger"
/// feedback = 0.6
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Preset {
    /// Name of the preset.
    pub name: String,

    /// Optional description of the preset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Synth parameters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub synth: Option<Section>,

    /// Tremolo parameters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tremolo: Option<Section>,

    /// Chorus/flanger parameters, plus an optional `mode`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chorus_flanger: Option<Section>,
}

impl Default for Preset {
    fn default() -> Self {
        Self::new("Untitled")
    }
}

impl Preset {
    /// Create a new preset with no engine tables.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            synth: None,
            tremolo: None,
            chorus_flanger: None,
        }
    }

    /// Create a preset with a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Record every current synth parameter.
    pub fn with_synth(mut self, params: &SynthParams) -> Self {
        self.synth = Some(capture(params, wave_type_value));
        self
    }

    /// Record every current tremolo parameter.
    pub fn with_tremolo(mut self, params: &TremoloParams) -> Self {
        self.tremolo = Some(capture(params, |_, v| ParamValue::Number(v)));
        self
    }

    /// Record the current chorus/flanger mode and parameters.
    pub fn with_chorus_flanger(mut self, params: &ChorusFlangerParams) -> Self {
        let mut section = capture(params, |_, v| ParamValue::Number(v));
        section.insert(MODE_KEY.to_string(), params.mode().name().into());
        self.chorus_flanger = Some(section);
        self
    }

    /// Load a preset from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        let preset: Preset = toml::from_str(&content)?;
        tracing::debug!(path = %path.display(), name = %preset.name, "preset loaded");
        Ok(preset)
    }

    /// Load a file if `name_or_path` exists on disk, otherwise look up a
    /// factory preset of that name.
    pub fn open(name_or_path: &str) -> Result<Self, ConfigError> {
        let path = Path::new(name_or_path);
        if path.is_file() {
            return Self::load(path);
        }
        get_factory_preset(name_or_path)
            .ok_or_else(|| ConfigError::PresetNotFound(name_or_path.to_string()))
    }

    /// Load a preset from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Save the preset to a TOML file, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }

        let content = self.to_toml()?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
        tracing::debug!(path = %path.display(), name = %self.name, "preset saved");
        Ok(())
    }

    /// Convert the preset to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check every table strictly: unknown keys, wrong value kinds, and
    /// values outside the declared ranges are all errors.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(section) = &self.synth {
            resolve("synth", section, &SynthParams::new(), RangePolicy::Reject, wave_type_choice)?;
        }
        if let Some(section) = &self.tremolo {
            resolve("tremolo", section, &TremoloParams::new(), RangePolicy::Reject, no_choice)?;
        }
        if let Some(section) = &self.chorus_flanger {
            let (mode, rest) = split_mode(section)?;
            let scratch = ChorusFlangerParams::new();
            scratch.set_mode(mode);
            resolve("chorus_flanger", &rest, &scratch, RangePolicy::Reject, no_choice)?;
        }
        Ok(())
    }

    /// Write the `[synth]` table into `params`, clamping to declared ranges.
    ///
    /// Does nothing without a `[synth]` table. On error nothing is written.
    pub fn apply_synth(&self, params: &SynthParams) -> Result<(), ConfigError> {
        let Some(section) = &self.synth else {
            return Ok(());
        };
        let writes = resolve("synth", section, params, RangePolicy::Clamp, wave_type_choice)?;
        params.reset_to_defaults();
        write_all(params, &writes);
        Ok(())
    }

    /// Write the `[tremolo]` table into `params`, clamping to declared ranges.
    pub fn apply_tremolo(&self, params: &TremoloParams) -> Result<(), ConfigError> {
        let Some(section) = &self.tremolo else {
            return Ok(());
        };
        let writes = resolve("tremolo", section, params, RangePolicy::Clamp, no_choice)?;
        params.reset_to_defaults();
        write_all(params, &writes);
        Ok(())
    }

    /// Write the `[chorus_flanger]` table into `params`.
    ///
    /// Defaults are laid down in chorus mode and carried into flanger mode by
    /// the usual mode switch, then the listed keys are written against the
    /// ranges of the preset's mode.
    pub fn apply_chorus_flanger(&self, params: &ChorusFlangerParams) -> Result<(), ConfigError> {
        let Some(section) = &self.chorus_flanger else {
            return Ok(());
        };
        let (mode, rest) = split_mode(section)?;
        let scratch = ChorusFlangerParams::new();
        scratch.set_mode(mode);
        let writes = resolve("chorus_flanger", &rest, &scratch, RangePolicy::Clamp, no_choice)?;

        params.set_mode(ModulationMode::Chorus);
        params.reset_to_defaults();
        params.switch_mode(mode);
        write_all(params, &writes);
        Ok(())
    }

    /// Names of the engines this preset has tables for.
    pub fn engines(&self) -> Vec<&'static str> {
        [
            ("synth", self.synth.is_some()),
            ("tremolo", self.tremolo.is_some()),
            ("chorus_flanger", self.chorus_flanger.is_some()),
        ]
        .into_iter()
        .filter_map(|(name, present)| present.then_some(name))
        .collect()
    }
}

fn write_all(store: &dyn ParameterInfo, writes: &[(usize, f64)]) {
    for &(index, value) in writes {
        store.set_param(index, value);
    }
}

fn wave_type_value(_key: &str, value: f64) -> ParamValue {
    WaveType::from_i32(value.round() as i32)
        .map_or(ParamValue::Number(value), |w| w.name().into())
}

fn wave_type_choice(_key: &str, text: &str) -> Result<f64, ConfigError> {
    WaveType::from_name(text)
        .map(|w| f64::from(w.to_i32()))
        .ok_or_else(|| ConfigError::UnknownWaveType(text.to_string()))
}

fn no_choice(key: &str, _text: &str) -> Result<f64, ConfigError> {
    Err(ConfigError::InvalidParameter {
        section: String::new(),
        param: key.to_string(),
        reason: "expected a number".to_string(),
    })
}

/// Separate the mode entry from the numeric controls. A missing mode means
/// chorus.
fn split_mode(section: &Section) -> Result<(ModulationMode, Section), ConfigError> {
    let mut rest = section.clone();
    let mode = match rest.remove(MODE_KEY) {
        None => ModulationMode::Chorus,
        Some(ParamValue::Text(name)) => {
            ModulationMode::from_name(&name).ok_or(ConfigError::UnknownMode(name))?
        }
        Some(ParamValue::Number(n)) if n == 0.0 || n == 1.0 => {
            ModulationMode::from_u8(n as u8).ok_or_else(|| ConfigError::UnknownMode(n.to_string()))?
        }
        Some(other) => return Err(ConfigError::UnknownMode(other.to_string())),
    };
    Ok((mode, rest))
}
