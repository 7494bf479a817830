//! Multi-channel WAV reading and writing on top of `hound`.
//!
//! Audio is kept planar (one `Vec<f32>` per channel) since that is what the
//! engines process.

use anyhow::{Context, Result, bail};
use hound::{SampleFormat, WavReader, WavWriter};
use std::path::Path;

/// Format of a WAV file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavSpec {
    /// Number of channels.
    pub channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Bits per sample; 32 means IEEE float.
    pub bits_per_sample: u16,
}

impl From<WavSpec> for hound::WavSpec {
    fn from(spec: WavSpec) -> Self {
        hound::WavSpec {
            channels: spec.channels,
            sample_rate: spec.sample_rate,
            bits_per_sample: spec.bits_per_sample,
            sample_format: if spec.bits_per_sample == 32 {
                SampleFormat::Float
            } else {
                SampleFormat::Int
            },
        }
    }
}

/// Read a WAV file into one buffer per channel.
pub fn read_wav(path: &Path) -> Result<(Vec<Vec<f32>>, WavSpec)> {
    let reader =
        WavReader::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let hound_spec = reader.spec();
    let spec = WavSpec {
        channels: hound_spec.channels,
        sample_rate: hound_spec.sample_rate,
        bits_per_sample: hound_spec.bits_per_sample,
    };
    if spec.channels == 0 {
        bail!("{} has no channels", path.display());
    }

    let interleaved: Vec<f32> = match hound_spec.sample_format {
        SampleFormat::Float => reader
            .into_samples::<f32>()
            .collect::<Result<_, _>>()
            .with_context(|| format!("failed to decode {}", path.display()))?,
        SampleFormat::Int => {
            let max_val = (1i64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f32 / max_val))
                .collect::<Result<_, _>>()
                .with_context(|| format!("failed to decode {}", path.display()))?
        }
    };

    let channels = usize::from(spec.channels);
    let frames = interleaved.len() / channels;
    let mut planar = vec![Vec::with_capacity(frames); channels];
    for frame in interleaved.chunks_exact(channels) {
        for (buffer, &sample) in planar.iter_mut().zip(frame) {
            buffer.push(sample);
        }
    }
    Ok((planar, spec))
}

/// Write planar buffers as an interleaved WAV file.
///
/// All buffers must have the same length. Integer formats are clipped to
/// full scale.
pub fn write_wav(path: &Path, channels: &[Vec<f32>], sample_rate: u32, bits_per_sample: u16) -> Result<()> {
    if !matches!(bits_per_sample, 16 | 24 | 32) {
        bail!("unsupported bit depth {bits_per_sample} (expected 16, 24, or 32)");
    }
    let frames = channels.first().map_or(0, Vec::len);
    if channels.iter().any(|c| c.len() != frames) {
        bail!("channel buffers differ in length");
    }

    let spec = WavSpec {
        channels: u16::try_from(channels.len()).context("too many channels")?,
        sample_rate,
        bits_per_sample,
    };
    let mut writer = WavWriter::create(path, spec.into())
        .with_context(|| format!("failed to create {}", path.display()))?;

    if bits_per_sample == 32 {
        for frame in 0..frames {
            for channel in channels {
                writer.write_sample(channel[frame])?;
            }
        }
    } else {
        let max_val = (1i64 << (bits_per_sample - 1)) as f32;
        for frame in 0..frames {
            for channel in channels {
                let sample = (channel[frame] * max_val).clamp(-max_val, max_val - 1.0) as i32;
                writer.write_sample(sample)?;
            }
        }
    }

    writer
        .finalize()
        .with_context(|| format!("failed to finish {}", path.display()))?;
    Ok(())
}

/// Peak absolute value across all channels.
pub fn peak(channels: &[Vec<f32>]) -> f32 {
    channels
        .iter()
        .flatten()
        .map(|s| s.abs())
        .fold(0.0, f32::max)
}

/// RMS across all channels.
pub fn rms(channels: &[Vec<f32>]) -> f32 {
    let count: usize = channels.iter().map(Vec::len).sum();
    if count == 0 {
        return 0.0;
    }
    let sum: f32 = channels.iter().flatten().map(|s| s * s).sum();
    (sum / count as f32).sqrt()
}

/// Linear amplitude to dBFS, floored at -120.
pub fn linear_to_db(linear: f32) -> f32 {
    if linear <= 0.0 {
        -120.0
    } else {
        20.0 * linear.log10()
    }
}
