//! Error types for preset operations.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading, saving, or applying presets.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read a file
    #[error("failed to read file '{path}': {source}")]
    ReadFile {
        /// Path of the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a file
    #[error("failed to write file '{path}': {source}")]
    WriteFile {
        /// Path of the file that could not be written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to create a parent directory
    #[error("failed to create directory '{path}': {source}")]
    CreateDir {
        /// Path of the directory that could not be created.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse TOML
    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Failed to serialize TOML
    #[error("failed to serialize TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// No factory preset with this name
    #[error("preset not found: {0}")]
    PresetNotFound(String),

    /// Key that names no parameter of the section's engine
    #[error("unknown parameter '{param}' in [{section}]")]
    UnknownParameter {
        /// Preset section (`synth`, `tremolo`, `chorus_flanger`).
        section: String,
        /// Offending key.
        param: String,
    },

    /// Value outside the parameter's declared range
    #[error("parameter '{param}' in [{section}] is {value}, expected {min}..={max}")]
    OutOfRange {
        /// Preset section.
        section: String,
        /// Parameter key.
        param: String,
        /// Value found in the preset.
        value: f64,
        /// Declared minimum.
        min: f64,
        /// Declared maximum.
        max: f64,
    },

    /// Wave type name or number that is not one of the four shapes
    #[error("unknown wave type: {0}")]
    UnknownWaveType(String),

    /// Chorus/flanger mode that is neither `chorus` nor `flanger`
    #[error("unknown modulation mode: {0}")]
    UnknownMode(String),

    /// Value of the wrong kind for its parameter
    #[error("invalid parameter '{param}' in [{section}]: {reason}")]
    InvalidParameter {
        /// Preset section.
        section: String,
        /// Parameter key.
        param: String,
        /// Description of why the value is invalid.
        reason: String,
    },
}

impl ConfigError {
    /// Create a read file error.
    pub fn read_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::ReadFile {
            path: path.into(),
            source,
        }
    }

    /// Create a write file error.
    pub fn write_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::WriteFile {
            path: path.into(),
            source,
        }
    }

    /// Create a create directory error.
    pub fn create_dir(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::CreateDir {
            path: path.into(),
            source,
        }
    }
}
