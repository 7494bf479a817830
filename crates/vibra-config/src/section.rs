//! Preset sections: key/value tables resolved against a parameter store.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use vibra_core::{ParamUnit, ParameterInfo};

use crate::error::ConfigError;

/// One parameter table of a preset, keyed by parameter key.
pub type Section = BTreeMap<String, ParamValue>;

/// A value as written in a preset file.
///
/// Numbers cover continuous controls, booleans cover toggles, and text covers
/// named choices (`wave_type = "square"`, `mode = "flanger"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// `true` / `false`
    Bool(bool),
    /// Integer or float
    Number(f64),
    /// Named choice
    Text(String),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Bool(b) => write!(f, "{b}"),
            ParamValue::Number(n) => write!(f, "{n}"),
            ParamValue::Text(s) => write!(f, "\"{s}\""),
        }
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        ParamValue::Number(value)
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Bool(value)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Text(value.to_string())
    }
}

impl ParamValue {
    /// Parse a command-line `key=value` right-hand side.
    ///
    /// Numbers and `true`/`false` are recognized; anything else is text.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        match raw {
            "true" | "on" => ParamValue::Bool(true),
            "false" | "off" => ParamValue::Bool(false),
            _ => raw
                .parse::<f64>()
                .map_or_else(|_| ParamValue::Text(raw.to_string()), ParamValue::Number),
        }
    }
}

/// How out-of-range numbers are treated during resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RangePolicy {
    /// Clamp to the declared range and snap to the step.
    Clamp,
    /// Report [`ConfigError::OutOfRange`].
    Reject,
}

/// Turn a section into `(index, value)` writes for `store`.
///
/// `choice` maps text values of [`ParamUnit::Choice`] parameters to their
/// numeric encoding. Nothing is written here, so a failing section leaves
/// the caller's store untouched.
pub(crate) fn resolve(
    section_name: &str,
    section: &Section,
    store: &dyn ParameterInfo,
    policy: RangePolicy,
    choice: impl Fn(&str, &str) -> Result<f64, ConfigError>,
) -> Result<Vec<(usize, f64)>, ConfigError> {
    let invalid = |param: &str, reason: &str| ConfigError::InvalidParameter {
        section: section_name.to_string(),
        param: param.to_string(),
        reason: reason.to_string(),
    };

    let mut writes = Vec::with_capacity(section.len());
    for (key, value) in section {
        let index = store
            .param_index(key)
            .ok_or_else(|| ConfigError::UnknownParameter {
                section: section_name.to_string(),
                param: key.clone(),
            })?;
        let Some(desc) = store.param_info(index) else {
            continue;
        };

        let number = match (value, desc.unit) {
            (ParamValue::Bool(b), ParamUnit::Toggle) => {
                if *b {
                    1.0
                } else {
                    0.0
                }
            }
            (ParamValue::Bool(_), _) => return Err(invalid(key, "expected a number")),
            (ParamValue::Text(text), ParamUnit::Choice) => choice(key, text)?,
            (ParamValue::Text(_), _) => return Err(invalid(key, "expected a number")),
            (ParamValue::Number(n), _) => *n,
        };

        if !number.is_finite() {
            return Err(invalid(key, "value is not finite"));
        }
        if desc.unit == ParamUnit::Choice && (!desc.contains(number) || number.fract() != 0.0) {
            return Err(invalid(key, "not one of the available choices"));
        }

        let number = match policy {
            RangePolicy::Clamp => desc.constrain(number),
            RangePolicy::Reject if desc.contains(number) => number,
            RangePolicy::Reject => {
                return Err(ConfigError::OutOfRange {
                    section: section_name.to_string(),
                    param: key.clone(),
                    value: number,
                    min: desc.min,
                    max: desc.max,
                });
            }
        };
        writes.push((index, number));
    }
    Ok(writes)
}

/// Read every parameter of `store` into a section.
///
/// Toggles become booleans and choices go through `choice`.
pub(crate) fn capture(
    store: &dyn ParameterInfo,
    choice: impl Fn(&str, f64) -> ParamValue,
) -> Section {
    (0..store.param_count())
        .filter_map(|index| store.param_info(index).map(|desc| (index, desc)))
        .map(|(index, desc)| {
            let value = store.get_param(index);
            let value = match desc.unit {
                ParamUnit::Toggle => ParamValue::Bool(value >= 0.5),
                ParamUnit::Choice => choice(desc.key, value),
                _ => ParamValue::Number(tidy(value)),
            };
            (desc.key.to_string(), value)
        })
        .collect()
}

/// Print f32-backed values with their short f32 spelling (0.6, not
/// 0.6000000238418579).
fn tidy(value: f64) -> f64 {
    let narrow = value as f32;
    if f64::from(narrow) == value {
        narrow.to_string().parse().unwrap_or(value)
    } else {
        value
    }
}
