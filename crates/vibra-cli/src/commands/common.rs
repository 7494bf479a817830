//! Shared CLI helpers used across multiple commands.

use anyhow::Result;
use clap::ValueEnum;
use vibra_config::{ParamValue, Preset};

/// Engine a command operates on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EngineKind {
    /// Polyphonic synth
    Synth,
    /// Tremolo
    Tremolo,
    /// Chorus/flanger in chorus mode
    Chorus,
    /// Chorus/flanger in flanger mode
    Flanger,
}

impl EngineKind {
    /// Every engine, in listing order.
    pub const ALL: [EngineKind; 4] = [
        EngineKind::Synth,
        EngineKind::Tremolo,
        EngineKind::Chorus,
        EngineKind::Flanger,
    ];

    /// Lowercase name as typed on the command line.
    pub fn name(self) -> &'static str {
        match self {
            EngineKind::Synth => "synth",
            EngineKind::Tremolo => "tremolo",
            EngineKind::Chorus => "chorus",
            EngineKind::Flanger => "flanger",
        }
    }
}

/// Parse a `key=value` string for clap's `value_parser`.
pub fn parse_key_val(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.trim().to_string()))
        }
        _ => Err(format!(
            "Invalid parameter format: '{}' (expected key=value)",
            s
        )),
    }
}

/// Start from a named or file preset (or an empty one) and layer `--param`
/// overrides into the table of `engine`.
///
/// For the chorus/flanger the engine name picks the mode unless the
/// overrides set `mode` themselves.
pub fn build_preset(
    preset: Option<&str>,
    overrides: &[(String, String)],
    engine: EngineKind,
) -> Result<Preset> {
    let mut preset = match preset {
        Some(name) => {
            let preset = Preset::open(name)?;
            tracing::info!(name = %preset.name, "using preset");
            preset
        }
        None => Preset::new("Command line"),
    };

    let section = match engine {
        EngineKind::Synth => &mut preset.synth,
        EngineKind::Tremolo => &mut preset.tremolo,
        EngineKind::Chorus | EngineKind::Flanger => &mut preset.chorus_flanger,
    };
    let needs_table = !overrides.is_empty() || matches!(engine, EngineKind::Chorus | EngineKind::Flanger);
    if needs_table {
        let table = section.get_or_insert_with(Default::default);
        if matches!(engine, EngineKind::Chorus | EngineKind::Flanger) {
            table.insert("mode".to_string(), engine.name().into());
        }
        for (key, value) in overrides {
            table.insert(key.clone(), ParamValue::parse(value));
        }
    }
    Ok(preset)
}
