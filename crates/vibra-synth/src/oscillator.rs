//! Naive waveform generation from a phase angle.
//!
//! Waveforms are computed directly from the phase angle in radians with no
//! band-limiting, so high notes alias. The phase accumulator lives in
//! [`Voice`](crate::Voice); this module only maps an angle to a sample.
//!
//! | Wave | θ ∈ [0, 2π) |
//! |------|-------------|
//! | Sine | `sin θ` |
//! | Sawtooth | `θ/π`, minus 2 once it reaches 1 |
//! | Square | `+1` while `θ < 2π·pw`, else `-1` |
//! | Triangle | `2θ/π` folded at 1 and 3 |

use core::f64::consts::{PI, TAU};
use libm::sin;

/// Oscillator waveform.
///
/// Discriminants match the persisted state and the parameter surface
/// (Sine = 1 through Triangle = 4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(i32)]
pub enum WaveType {
    /// Pure sine.
    #[default]
    Sine = 1,
    /// Rising ramp from -1 to 1.
    Sawtooth = 2,
    /// Pulse wave with variable duty cycle.
    Square = 3,
    /// Symmetric triangle peaking at ±1.
    Triangle = 4,
}

impl WaveType {
    /// All waveforms in discriminant order.
    pub const ALL: [WaveType; 4] = [
        WaveType::Sine,
        WaveType::Sawtooth,
        WaveType::Square,
        WaveType::Triangle,
    ];

    /// Decode a discriminant. Unknown values return `None`.
    pub fn from_i32(value: i32) -> Option<Self> {
        match value {
            1 => Some(WaveType::Sine),
            2 => Some(WaveType::Sawtooth),
            3 => Some(WaveType::Square),
            4 => Some(WaveType::Triangle),
            _ => None,
        }
    }

    /// The discriminant.
    pub fn to_i32(self) -> i32 {
        self as i32
    }

    /// Lowercase name used in presets and on the command line.
    pub fn name(self) -> &'static str {
        match self {
            WaveType::Sine => "sine",
            WaveType::Sawtooth => "sawtooth",
            WaveType::Square => "square",
            WaveType::Triangle => "triangle",
        }
    }

    /// Parse a name (case-insensitive). Accepts `saw` and `tri` shorthands.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|w| w.name().eq_ignore_ascii_case(name))
            .or_else(|| {
                if name.eq_ignore_ascii_case("saw") {
                    Some(WaveType::Sawtooth)
                } else if name.eq_ignore_ascii_case("tri") {
                    Some(WaveType::Triangle)
                } else {
                    None
                }
            })
    }

    /// Sample value at `angle` radians, in \[-1, 1\].
    ///
    /// `angle` is expected in `[0, 2π)`. `pulse_width` only affects
    /// [`WaveType::Square`].
    #[inline]
    pub fn render(self, angle: f64, pulse_width: f64) -> f64 {
        match self {
            WaveType::Sine => sin(angle),
            WaveType::Sawtooth => {
                let s = angle / PI;
                if s < 1.0 { s } else { s - 2.0 }
            }
            WaveType::Square => {
                if angle < TAU * pulse_width {
                    1.0
                } else {
                    -1.0
                }
            }
            WaveType::Triangle => {
                let s = 2.0 * angle / PI;
                if s <= 1.0 {
                    s
                } else if s < 3.0 {
                    2.0 - s
                } else {
                    s - 4.0
                }
            }
        }
    }
}

/// Per-sample phase advance in radians for `frequency` at `sample_rate`.
///
/// Returns 0 for a non-positive sample rate (engine not yet prepared).
#[inline]
pub fn phase_increment(frequency: f64, sample_rate: f64) -> f64 {
    if sample_rate > 0.0 {
        TAU * frequency / sample_rate
    } else {
        0.0
    }
}
