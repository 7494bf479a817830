//! File-based effect processing command.

use anyhow::{Context, Result, bail};
use clap::Args;
use std::path::PathBuf;
use vibra_core::Effect;
use vibra_effects::{ChorusFlanger, Tremolo};

use super::common::{EngineKind, build_preset, parse_key_val};
use crate::wav::{linear_to_db, peak, read_wav, rms, write_wav};

#[derive(Args)]
pub struct ProcessArgs {
    /// Input WAV file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output WAV file
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Effect to apply
    #[arg(short, long, value_enum)]
    effect: EngineKind,

    /// Preset name or TOML file; the effect's table is used
    #[arg(short, long)]
    preset: Option<String>,

    /// Effect parameters (e.g., "depth=0.8")
    #[arg(long, value_parser = parse_key_val, number_of_values = 1)]
    param: Vec<(String, String)>,

    /// Processing block size
    #[arg(long, default_value = "512")]
    block_size: usize,

    /// Output bit depth (16, 24, or 32); defaults to the input's
    #[arg(long)]
    bit_depth: Option<u16>,
}

/// Build a prepared effect from the command-line selection.
fn build_effect(args: &ProcessArgs, sample_rate: f64) -> Result<Box<dyn Effect>> {
    let preset = build_preset(args.preset.as_deref(), &args.param, args.effect)?;
    let mut effect: Box<dyn Effect> = match args.effect {
        EngineKind::Tremolo => {
            let tremolo = Tremolo::new();
            preset
                .apply_tremolo(tremolo.params())
                .context("failed to apply tremolo parameters")?;
            Box::new(tremolo)
        }
        EngineKind::Chorus | EngineKind::Flanger => {
            let chorus = ChorusFlanger::new();
            preset
                .apply_chorus_flanger(chorus.params())
                .context("failed to apply chorus/flanger parameters")?;
            Box::new(chorus)
        }
        EngineKind::Synth => bail!("the synth is an instrument; use `vibra render`"),
    };
    effect.prepare(sample_rate, args.block_size);
    Ok(effect)
}

pub fn run(args: ProcessArgs) -> Result<()> {
    if args.block_size == 0 {
        bail!("block size must be non-zero");
    }

    println!("Reading {}...", args.input.display());
    let (mut channels, spec) = read_wav(&args.input)?;
    let frames = channels.first().map_or(0, Vec::len);
    println!(
        "  {} frames, {} channel(s), {} Hz, {:.2}s",
        frames,
        spec.channels,
        spec.sample_rate,
        frames as f64 / f64::from(spec.sample_rate)
    );

    let mut effect = build_effect(&args, f64::from(spec.sample_rate))?;
    let input_peak = peak(&channels);
    let input_rms = rms(&channels);

    tracing::info!(effect = args.effect.name(), frames, "processing");
    let mut start = 0;
    while start < frames {
        let end = (start + args.block_size).min(frames);
        let mut slices: Vec<&mut [f32]> = channels.iter_mut().map(|c| &mut c[start..end]).collect();
        effect.process_block(&mut slices);
        start = end;
    }

    println!("\nStats:");
    println!(
        "  Input:  RMS {:.1} dB, Peak {:.1} dB",
        linear_to_db(input_rms),
        linear_to_db(input_peak)
    );
    println!(
        "  Output: RMS {:.1} dB, Peak {:.1} dB",
        linear_to_db(rms(&channels)),
        linear_to_db(peak(&channels))
    );

    let bit_depth = args.bit_depth.unwrap_or(spec.bits_per_sample);
    println!("\nWriting {}...", args.output.display());
    write_wav(&args.output, &channels, spec.sample_rate, bit_depth)?;
    println!("Done!");
    Ok(())
}
