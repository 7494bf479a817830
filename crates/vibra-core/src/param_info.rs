//! Parameter introspection for the engines' shared parameter stores.
//!
//! Each engine owns a parameter store (atomic cells) that the UI, the preset
//! loader, and the CLI write into and that the audio thread reads once per
//! block. [`ParameterInfo`] exposes that store by index so collaborators can
//! enumerate, display, and set parameters without knowing the concrete type.
//!
//! # Design
//!
//! - Access goes through `&self`: stores are backed by atomics, so writers
//!   never need exclusive access.
//! - Values cross the trait as `f64`, which holds every `f32` and `f64`
//!   parameter exactly.
//! - The store itself never clamps. [`ParamDescriptor::constrain`] is
//!   offered to the collaborators that are responsible for clamping.
//!
//! # Example
//!
//! ```rust
//! use vibra_core::{AtomicF32, ParamDescriptor, ParamUnit, ParameterInfo};
//!
//! struct GainParams {
//!     gain: AtomicF32,
//! }
//!
//! impl ParameterInfo for GainParams {
//!     fn param_count(&self) -> usize { 1 }
//!
//!     fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
//!         match index {
//!             0 => Some(ParamDescriptor::new("Gain", "gain", ParamUnit::Ratio, 0.0, 1.0, 0.5)),
//!             _ => None,
//!         }
//!     }
//!
//!     fn get_param(&self, index: usize) -> f64 {
//!         match index {
//!             0 => f64::from(self.gain.load()),
//!             _ => 0.0,
//!         }
//!     }
//!
//!     fn set_param(&self, index: usize, value: f64) {
//!         if index == 0 {
//!             self.gain.store(value as f32);
//!         }
//!     }
//! }
//!
//! let params = GainParams { gain: AtomicF32::new(0.5) };
//! assert_eq!(params.param_index("gain"), Some(0));
//! ```

/// Display unit of a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParamUnit {
    /// Unitless value.
    #[default]
    None,
    /// Linear ratio, usually 0-1.
    Ratio,
    /// Frequency in Hz.
    Hertz,
    /// Time in milliseconds.
    Milliseconds,
    /// Time in seconds.
    Seconds,
    /// Discrete choice (enum index).
    Choice,
    /// On/off toggle.
    Toggle,
}

impl ParamUnit {
    /// Short suffix for display.
    pub fn suffix(self) -> &'static str {
        match self {
            ParamUnit::None | ParamUnit::Ratio | ParamUnit::Choice | ParamUnit::Toggle => "",
            ParamUnit::Hertz => " Hz",
            ParamUnit::Milliseconds => " ms",
            ParamUnit::Seconds => " s",
        }
    }
}

/// Static metadata for one parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamDescriptor {
    /// Human-readable name ("Auto-Wah Rate").
    pub name: &'static str,
    /// Stable key used by presets and the CLI ("auto_wah_rate").
    pub key: &'static str,
    /// Display unit.
    pub unit: ParamUnit,
    /// Lowest value the surface should write.
    pub min: f64,
    /// Highest value the surface should write.
    pub max: f64,
    /// Value of a freshly constructed store.
    pub default: f64,
    /// Control resolution; 0 means continuous.
    pub step: f64,
}

impl ParamDescriptor {
    /// Continuous parameter with no step.
    pub const fn new(
        name: &'static str,
        key: &'static str,
        unit: ParamUnit,
        min: f64,
        max: f64,
        default: f64,
    ) -> Self {
        Self {
            name,
            key,
            unit,
            min,
            max,
            default,
            step: 0.0,
        }
    }

    /// Set the control resolution.
    pub const fn with_step(mut self, step: f64) -> Self {
        self.step = step;
        self
    }

    /// Clamp `value` into `[min, max]` and snap it to `step`.
    ///
    /// Snapping is relative to `min`, like a host slider with an interval.
    pub fn constrain(&self, value: f64) -> f64 {
        let clamped = value.clamp(self.min, self.max);
        if self.step > 0.0 {
            let steps = libm::round((clamped - self.min) / self.step);
            (self.min + steps * self.step).min(self.max)
        } else {
            clamped
        }
    }

    /// Whether `value` lies inside `[min, max]`.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Index-based access to a parameter store.
///
/// Indices are stable for the lifetime of the store.
pub trait ParameterInfo {
    /// Number of parameters.
    fn param_count(&self) -> usize;

    /// Descriptor for the parameter at `index`, `None` when out of range.
    fn param_info(&self, index: usize) -> Option<ParamDescriptor>;

    /// Current value at `index`. Out of range returns 0.
    fn get_param(&self, index: usize) -> f64;

    /// Write `value` at `index` without clamping. Out of range is ignored.
    fn set_param(&self, index: usize, value: f64);

    /// Look up a parameter index by its stable key.
    fn param_index(&self, key: &str) -> Option<usize> {
        (0..self.param_count()).find(|&i| self.param_info(i).is_some_and(|d| d.key == key))
    }

    /// Reset every parameter to its descriptor default.
    fn reset_to_defaults(&self) {
        for i in 0..self.param_count() {
            if let Some(desc) = self.param_info(i) {
                self.set_param(i, desc.default);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constrain_clamps_and_snaps() {
        let desc = ParamDescriptor::new("Rate", "rate", ParamUnit::Hertz, 0.1, 20.0, 5.0)
            .with_step(0.01);
        assert_eq!(desc.constrain(50.0), 20.0);
        assert_eq!(desc.constrain(-1.0), 0.1);
        assert!((desc.constrain(5.004) - 5.0).abs() < 1e-9);
        assert!((desc.constrain(5.006) - 5.01).abs() < 1e-9);
    }

    #[test]
    fn test_constrain_continuous() {
        let desc = ParamDescriptor::new("Depth", "depth", ParamUnit::Ratio, 0.0, 1.0, 0.5);
        assert_eq!(desc.constrain(0.123456), 0.123456);
    }

    #[test]
    fn test_unit_suffix() {
        assert_eq!(ParamUnit::Hertz.suffix(), " Hz");
        assert_eq!(ParamUnit::Ratio.suffix(), "");
    }
}
