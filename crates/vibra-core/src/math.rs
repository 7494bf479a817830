//! Small math helpers shared by the engines.

use core::f64::consts::PI;
use libm::sin;

/// Unipolar sine: `0.5 * (1 + sin(2π · phase))`, in \[0, 1\].
///
/// `phase` is in cycles, so 0.25 lands on the peak and 0.75 on the trough.
#[inline]
pub fn unipolar_sine(phase: f64) -> f64 {
    0.5 * (1.0 + sin(2.0 * PI * phase))
}

/// Linearly remaps `value` from `[source_min, source_max]` to
/// `[target_min, target_max]`.
///
/// No clamping is applied; values outside the source range extrapolate.
#[inline]
pub fn map_range(value: f32, source_min: f32, source_max: f32, target_min: f32, target_max: f32) -> f32 {
    target_min + (target_max - target_min) * ((value - source_min) / (source_max - source_min))
}
