//! Property-based tests for vibra-effects.

use proptest::prelude::*;
use vibra_core::{Effect, ParameterInfo};
use vibra_effects::{ChorusFlanger, ChorusFlangerParams, ModulationMode, Tremolo};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// With depth in [0, 1] the tremolo only ever attenuates.
    #[test]
    fn tremolo_never_amplifies(
        depth in 0.0f32..=1.0,
        rate in 0.1f32..10.0,
        input in prop::collection::vec(-1.0f32..=1.0, 1..512),
    ) {
        let mut tremolo = Tremolo::new();
        tremolo.params().set_depth(depth);
        tremolo.params().set_rate(rate);
        tremolo.prepare(44100.0, input.len());

        let mut buf = input.clone();
        tremolo.process_block(&mut [&mut buf[..]]);
        for (out, inp) in buf.iter().zip(&input) {
            prop_assert!(out.abs() <= inp.abs() + 1e-6);
        }
    }

    /// Bounded input stays bounded for every control combination.
    #[test]
    fn chorus_stays_bounded(
        flanger in any::<bool>(),
        rate in 0.0f64..=1.0,
        depth in 0.0f64..=1.0,
        delay in 0.0f64..=1.0,
        feedback in 0.0f64..=1.0,
        input in prop::collection::vec(-1.0f32..=1.0, 1..1024),
    ) {
        let params = ChorusFlangerParams::new();
        if flanger {
            params.switch_mode(ModulationMode::Flanger);
        }
        for (index, norm) in [
            (ChorusFlangerParams::RATE, rate),
            (ChorusFlangerParams::DEPTH, depth),
            (ChorusFlangerParams::DELAY, delay),
            (ChorusFlangerParams::FEEDBACK, feedback),
        ] {
            let desc = params.param_info(index).unwrap();
            params.set_param(index, desc.min + norm * (desc.max - desc.min));
        }

        let mut chorus = ChorusFlanger::with_params(std::sync::Arc::new(params));
        chorus.prepare(48000.0, input.len());
        let mut left = input.clone();
        let mut right = input;
        chorus.process_block(&mut [&mut left[..], &mut right[..]]);
        // |line| <= 1 / (1 - 0.95), output = 0.5 (x + wet)
        prop_assert!(left.iter().chain(&right).all(|s| s.is_finite() && s.abs() <= 10.6));
    }
}
