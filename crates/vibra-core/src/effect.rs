//! Core Effect trait for the standalone effect engines.
//!
//! The [`Effect`] trait is the contract between a host (or the offline
//! renderer) and an effect engine such as the tremolo or the chorus/flanger.
//!
//! ## Design Decisions
//!
//! - **Multichannel blocks**: Audio arrives as one mutable slice per channel.
//!   The chorus computes its modulator once per frame for every channel; the
//!   tremolo walks the block channel by channel with one running phase.
//!
//! - **Object-safe**: `Box<dyn Effect>` is used by the CLI to pick an engine
//!   at runtime.
//!
//! - **No allocations**: `process_block` is called on the real-time thread.
//!   Anything that needs memory is sized in `prepare`.

/// Core trait for block-processing audio effects.
///
/// # Example
///
/// ```rust
/// use vibra_core::Effect;
///
/// struct Gain {
///     gain: f32,
/// }
///
/// impl Effect for Gain {
///     fn prepare(&mut self, _sample_rate: f64, _max_block_size: usize) {}
///
///     fn process_block(&mut self, channels: &mut [&mut [f32]]) {
///         for channel in channels.iter_mut() {
///             for sample in channel.iter_mut() {
///                 *sample *= self.gain;
///             }
///         }
///     }
///
///     fn reset(&mut self) {}
/// }
///
/// let mut gain = Gain { gain: 0.5 };
/// let mut left = [1.0, 1.0];
/// let mut right = [2.0, 2.0];
/// gain.process_block(&mut [&mut left[..], &mut right[..]]);
/// assert_eq!(right, [1.0, 1.0]);
/// ```
pub trait Effect {
    /// (Re)initialize for a new sample rate and maximum block size.
    ///
    /// Called before the first block and whenever the host changes the
    /// stream configuration. Resets modulation phases and delay memory.
    fn prepare(&mut self, sample_rate: f64, max_block_size: usize);

    /// Process one block in place.
    ///
    /// Parameters are read once at the start of the block and held constant
    /// for its duration. All channel slices are expected to have the same
    /// length; only the shortest common length is processed.
    fn process_block(&mut self, channels: &mut [&mut [f32]]);

    /// Clear internal state (phases, delay memory) without touching parameters.
    fn reset(&mut self);

    /// Processing latency in samples. Default is 0.
    fn latency_samples(&self) -> usize {
        0
    }
}

/// Number of frames that can be processed across all channels.
///
/// Returns 0 for an empty channel list.
#[inline]
pub fn block_len(channels: &[&mut [f32]]) -> usize {
    channels.iter().map(|c| c.len()).min().unwrap_or(0)
}
