//! Vibra CLI - offline rendering and processing for the vibra synth and effects.

mod commands;
mod notes;
mod wav;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "vibra")]
#[command(author, version, about = "Vibra synth and effects CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render synth notes to a WAV file
    Render(commands::render::RenderArgs),

    /// Process a WAV file through the tremolo or chorus/flanger
    Process(commands::process::ProcessArgs),

    /// List engine parameters, ranges, and defaults
    Params(commands::params::ParamsArgs),

    /// List, show, and validate presets
    #[command(subcommand)]
    Presets(commands::presets::PresetsCommand),

    /// Dump or load raw parameter state
    #[command(subcommand)]
    State(commands::state::StateCommand),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Render(args) => commands::render::run(args),
        Commands::Process(args) => commands::process::run(args),
        Commands::Params(args) => commands::params::run(args),
        Commands::Presets(command) => commands::presets::run(command),
        Commands::State(command) => commands::state::run(command),
    }
}
