//! Preset listing, display, and validation command.

use anyhow::{Context, Result};
use clap::Subcommand;
use std::path::PathBuf;
use vibra_config::{FACTORY_PRESET_NAMES, Preset, get_factory_preset};

#[derive(Subcommand)]
pub enum PresetsCommand {
    /// List factory presets
    List,
    /// Print a preset as TOML
    Show {
        /// Preset name or TOML file
        #[arg(value_name = "PRESET")]
        name: String,
    },
    /// Check a preset file strictly (unknown keys and out-of-range values fail)
    Validate {
        /// TOML file
        #[arg(value_name = "FILE")]
        path: PathBuf,
    },
}

pub fn run(command: PresetsCommand) -> Result<()> {
    match command {
        PresetsCommand::List => {
            println!("Factory Presets");
            println!("===============");
            println!();
            for name in FACTORY_PRESET_NAMES {
                let Some(preset) = get_factory_preset(name) else {
                    continue;
                };
                println!(
                    "  {:15} - {} [{}]",
                    name,
                    preset.description.as_deref().unwrap_or(""),
                    preset.engines().join(", ")
                );
            }
        }
        PresetsCommand::Show { name } => {
            let preset = Preset::open(&name)?;
            print!("{}", preset.to_toml()?);
        }
        PresetsCommand::Validate { path } => {
            let preset = Preset::load(&path)?;
            preset
                .validate()
                .with_context(|| format!("{} is not valid", path.display()))?;
            println!("{}: ok ({})", path.display(), preset.engines().join(", "));
        }
    }
    Ok(())
}
