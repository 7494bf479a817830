//! Factory presets bundled with the library.
//!
//! Always available without files on disk; [`Preset::open`] falls back to
//! these names.

use crate::Preset;

/// Names of the factory presets, in listing order.
pub static FACTORY_PRESET_NAMES: &[&str] = &[
    "init",
    "wah_lead",
    "soft_pad",
    "hollow_square",
    "slow_tremolo",
    "jet_flanger",
];

static FACTORY_PRESETS_TOML: &[(&str, &str)] = &[
    ("init", INIT_PRESET),
    ("wah_lead", WAH_LEAD_PRESET),
    ("soft_pad", SOFT_PAD_PRESET),
    ("hollow_square", HOLLOW_SQUARE_PRESET),
    ("slow_tremolo", SLOW_TREMOLO_PRESET),
    ("jet_flanger", JET_FLANGER_PRESET),
];

/// Every engine at its defaults.
const INIT_PRESET: &str = r#"
name = "Init"
description = "Default settings for every engine"

[synth]

[tremolo]

[chorus_flanger]
mode = "chorus"
"#;

const WAH_LEAD_PRESET: &str = r#"
name = "Wah Lead"
description = "Snappy sawtooth through a fast auto-wah"

[synth]
wave_type = "sawtooth"
gain = 0.3
attack = 0.005
decay = 0.08
sustain = 0.8
release = 0.05
auto_wah_enabled = true
auto_wah_frequency = 900.0
auto_wah_depth = 0.9
auto_wah_rate = 4.0
"#;

const SOFT_PAD_PRESET: &str = r#"
name = "Soft Pad"
description = "Slow triangle swells with a wide chorus"

[synth]
wave_type = "triangle"
attack = 0.8
decay = 0.5
sustain = 0.6
release = 1.2

[chorus_flanger]
mode = "chorus"
rate = 0.8
depth = 0.7
delay = 20.0
feedback = 0.1
"#;

const HOLLOW_SQUARE_PRESET: &str = r#"
name = "Hollow Square"
description = "Narrow pulse with a gentle tremolo"

[synth]
wave_type = "square"
pulse_width = 0.2
sustain = 0.9

[tremolo]
depth = 0.4
rate = 5.0
"#;

const SLOW_TREMOLO_PRESET: &str = r#"
name = "Slow Tremolo"
description = "Deep, slow amplitude sweep"

[tremolo]
depth = 0.9
rate = 0.5
"#;

const JET_FLANGER_PRESET: &str = r#"
name = "Jet Flanger"
description = "Short resonant sweep"

[chorus_flanger]
mode = "flanger"
rate = 0.3
depth = 1.0
delay = 2.0
feedback = 0.7
"#;

/// Parse every factory preset.
pub fn factory_presets() -> Vec<Preset> {
    FACTORY_PRESETS_TOML
        .iter()
        .filter_map(|(_, toml)| Preset::from_toml(toml).ok())
        .collect()
}

/// Look up a factory preset by name (case-insensitive).
pub fn get_factory_preset(name: &str) -> Option<Preset> {
    FACTORY_PRESETS_TOML
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .and_then(|(_, toml)| Preset::from_toml(toml).ok())
}

/// Whether `name` is a factory preset.
pub fn is_factory_preset(name: &str) -> bool {
    FACTORY_PRESET_NAMES.iter().any(|n| n.eq_ignore_ascii_case(name))
}
