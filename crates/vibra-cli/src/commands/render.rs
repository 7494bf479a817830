//! Offline synth rendering command.

use anyhow::{Context, Result, bail};
use clap::Args;
use std::path::PathBuf;
use vibra_core::ParameterInfo;
use vibra_synth::{SubtractiveSynth, SynthParams};

use super::common::{EngineKind, build_preset, parse_key_val};
use crate::notes::{NoteSpec, events_in_block, parse_note};
use crate::wav::{linear_to_db, peak, rms, write_wav};

#[derive(Args)]
pub struct RenderArgs {
    /// Output WAV file
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Notes to play: NOTE[:VELOCITY][@START[+LENGTH]], e.g. "C4", "64:90@0.5+0.25"
    #[arg(short, long, value_parser = parse_note, num_args = 1.., required = true)]
    notes: Vec<NoteSpec>,

    /// Hold time in seconds for notes without an explicit length
    #[arg(short, long, default_value = "1.0")]
    length: f64,

    /// Extra time rendered after the last note-off, in seconds
    #[arg(long, default_value = "0.25")]
    tail: f64,

    /// Preset name or TOML file; its [synth] table is used
    #[arg(short, long)]
    preset: Option<String>,

    /// Synth parameters (e.g., "wave_type=saw", "attack=0.1")
    #[arg(long, value_parser = parse_key_val, number_of_values = 1)]
    param: Vec<(String, String)>,

    /// Sample rate in Hz
    #[arg(long, default_value = "48000")]
    sample_rate: u32,

    /// Number of output channels
    #[arg(long, default_value = "2")]
    channels: u16,

    /// Processing block size
    #[arg(long, default_value = "512")]
    block_size: usize,

    /// Output bit depth (16, 24, or 32)
    #[arg(long, default_value = "32")]
    bit_depth: u16,

    /// Feed the block start time to the auto-wah instead of letting its LFO
    /// run free
    #[arg(long)]
    transport: bool,
}

pub fn run(args: RenderArgs) -> Result<()> {
    if args.block_size == 0 || args.channels == 0 || args.sample_rate == 0 {
        bail!("sample rate, channel count, and block size must be non-zero");
    }
    if !(args.length.is_finite() && args.length >= 0.0 && args.tail.is_finite() && args.tail >= 0.0) {
        bail!("--length and --tail must be non-negative");
    }

    let preset = build_preset(args.preset.as_deref(), &args.param, EngineKind::Synth)?;
    let mut synth = SubtractiveSynth::new();
    preset
        .apply_synth(synth.params())
        .context("failed to apply synth parameters")?;

    let sample_rate = f64::from(args.sample_rate);
    synth.prepare(sample_rate, args.block_size);

    let last_off = args
        .notes
        .iter()
        .map(|n| n.frames(sample_rate, args.length).1)
        .max()
        .unwrap_or(0);
    let release = synth.params().get_param(SynthParams::RELEASE);
    let total_frames = last_off + ((release + args.tail) * sample_rate).round() as usize;

    tracing::info!(
        notes = args.notes.len(),
        frames = total_frames,
        sample_rate = args.sample_rate,
        "rendering"
    );

    let channel_count = usize::from(args.channels);
    let mut output = vec![Vec::with_capacity(total_frames); channel_count];
    let mut block = vec![vec![0.0f32; args.block_size]; channel_count];
    let mut peak_voices = 0;

    let mut start = 0;
    while start < total_frames {
        let len = args.block_size.min(total_frames - start);
        let events = events_in_block(&args.notes, sample_rate, args.length, start, len);
        let transport = args.transport.then(|| start as f64 / sample_rate);

        let mut slices: Vec<&mut [f32]> = block.iter_mut().map(|b| &mut b[..len]).collect();
        synth.process_block(&mut slices, &events, transport);
        peak_voices = peak_voices.max(synth.active_voice_count());

        for (out, rendered) in output.iter_mut().zip(&block) {
            out.extend_from_slice(&rendered[..len]);
        }
        start += len;
    }

    println!(
        "Rendered {:.2}s, {} channel(s), up to {} voice(s)",
        total_frames as f64 / sample_rate,
        channel_count,
        peak_voices
    );
    println!(
        "  Peak {:.1} dB, RMS {:.1} dB",
        linear_to_db(peak(&output)),
        linear_to_db(rms(&output))
    );

    write_wav(&args.output, &output, args.sample_rate, args.bit_depth)?;
    println!("Wrote {}", args.output.display());
    Ok(())
}
