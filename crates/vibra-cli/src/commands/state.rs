//! Raw parameter state dump and load command.

use anyhow::{Context, Result};
use clap::Subcommand;
use std::path::{Path, PathBuf};
use vibra_config::Preset;
use vibra_effects::{ChorusFlanger, Tremolo};
use vibra_synth::SubtractiveSynth;

use super::common::{EngineKind, build_preset, parse_key_val};
use super::params::print_table;

#[derive(Subcommand)]
pub enum StateCommand {
    /// Write an engine's parameters as a raw state blob
    Dump {
        /// Engine whose state is written
        #[arg(value_enum)]
        engine: EngineKind,

        /// Output file
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// Preset name or TOML file to start from
        #[arg(short, long)]
        preset: Option<String>,

        /// Parameter overrides (e.g., "gain=0.5")
        #[arg(long, value_parser = parse_key_val, number_of_values = 1)]
        param: Vec<(String, String)>,
    },
    /// Read a raw state blob and print the parameters it holds
    Load {
        /// Engine the blob belongs to (chorus and flanger share a layout)
        #[arg(value_enum)]
        engine: EngineKind,

        /// State file
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Also save the restored parameters as a TOML preset
        #[arg(long, value_name = "FILE")]
        save_preset: Option<PathBuf>,
    },
}

pub fn run(command: StateCommand) -> Result<()> {
    match command {
        StateCommand::Dump {
            engine,
            output,
            preset,
            param,
        } => dump(engine, &output, preset.as_deref(), &param),
        StateCommand::Load {
            engine,
            input,
            save_preset,
        } => load(engine, &input, save_preset.as_deref()),
    }
}

fn dump(
    engine: EngineKind,
    output: &Path,
    preset: Option<&str>,
    overrides: &[(String, String)],
) -> Result<()> {
    let preset = build_preset(preset, overrides, engine)?;
    let bytes = match engine {
        EngineKind::Synth => {
            let synth = SubtractiveSynth::new();
            preset.apply_synth(synth.params())?;
            synth.save_state()
        }
        EngineKind::Tremolo => {
            let tremolo = Tremolo::new();
            preset.apply_tremolo(tremolo.params())?;
            tremolo.save_state()
        }
        EngineKind::Chorus | EngineKind::Flanger => {
            let chorus = ChorusFlanger::new();
            preset.apply_chorus_flanger(chorus.params())?;
            chorus.save_state()
        }
    };

    std::fs::write(output, &bytes)
        .with_context(|| format!("failed to write {}", output.display()))?;
    println!(
        "Wrote {} state ({} bytes) to {}",
        engine.name(),
        bytes.len(),
        output.display()
    );
    Ok(())
}

fn load(engine: EngineKind, input: &Path, save_preset: Option<&Path>) -> Result<()> {
    let bytes =
        std::fs::read(input).with_context(|| format!("failed to read {}", input.display()))?;
    let context = || format!("{} is not a valid {} state", input.display(), engine.name());
    let name = input
        .file_stem()
        .map_or_else(|| "Restored".to_string(), |s| s.to_string_lossy().into_owned());

    let preset = match engine {
        EngineKind::Synth => {
            let synth = SubtractiveSynth::new();
            synth.restore_state(&bytes).with_context(context)?;
            print_table(&**synth.params());
            Preset::new(name).with_synth(synth.params())
        }
        EngineKind::Tremolo => {
            let tremolo = Tremolo::new();
            tremolo.restore_state(&bytes).with_context(context)?;
            print_table(&**tremolo.params());
            Preset::new(name).with_tremolo(tremolo.params())
        }
        EngineKind::Chorus | EngineKind::Flanger => {
            let chorus = ChorusFlanger::new();
            chorus.restore_state(&bytes).with_context(context)?;
            println!("  mode: {}", chorus.params().mode().name());
            print_table(&**chorus.params());
            Preset::new(name).with_chorus_flanger(chorus.params())
        }
    };

    if let Some(path) = save_preset {
        preset.save(path)?;
        println!("Saved preset to {}", path.display());
    }
    Ok(())
}
