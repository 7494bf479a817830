//! Property-based tests for vibra-core DSP primitives.
//!
//! Tests filter stability, LFO bounds, delay line integrity, and state blob
//! decoding using proptest for randomized input generation.

use proptest::prelude::*;
use vibra_core::{
    Biquad, InterpolatedDelay, Lfo, ParamDescriptor, ParamUnit, StateError, StateReader,
    StateWriter, bandpass_coefficients, unipolar_sine,
};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    /// Band-pass sections stay finite for any sweep position the auto-wah
    /// can reach at 48 kHz.
    #[test]
    fn bandpass_stability(
        freq in 20.0f32..20000.0f32,
        q in 0.3f32..10.0f32,
        input in prop::array::uniform32(-1.0f32..=1.0f32),
    ) {
        let mut biquad = Biquad::new();
        biquad.set_coefficients(bandpass_coefficients(freq, q, 48000.0));

        for _ in 0..32 {
            for &sample in &input {
                let out = biquad.process(sample);
                prop_assert!(out.is_finite(), "freq={} q={} produced {}", freq, q, out);
            }
        }
    }

    /// Swapping coefficients mid-stream (as the swept filter does every
    /// block) keeps the output bounded.
    #[test]
    fn bandpass_sweep_bounded(
        freqs in prop::collection::vec(100.0f32..4000.0f32, 1..64),
    ) {
        let mut biquad = Biquad::new();
        let mut n = 0u32;
        for freq in freqs {
            biquad.set_coefficients(bandpass_coefficients(freq, 1.0, 48000.0));
            for _ in 0..64 {
                let x = if n % 2 == 0 { 1.0 } else { -1.0 };
                let y = biquad.process(x);
                prop_assert!(y.abs() < 16.0, "sweep output {} at {} Hz", y, freq);
                n += 1;
            }
        }
    }

    /// The LFO output stays in [0, 1] and its phase in [0, 1).
    #[test]
    fn lfo_bounds(rate in 0.1f32..20.0f32, steps in 1usize..5000) {
        let mut lfo = Lfo::new(44100.0, rate);
        for _ in 0..steps {
            let v = lfo.next_unipolar();
            prop_assert!((0.0..=1.0).contains(&v));
            prop_assert!((0.0..1.0).contains(&lfo.phase()));
        }
    }

    /// The f64 unipolar sine stays in [0, 1] for any phase.
    #[test]
    fn unipolar_sine_bounds(phase in -100.0f64..100.0f64) {
        let v = unipolar_sine(phase);
        prop_assert!((0.0..=1.0).contains(&v));
    }

    /// An integer delay returns exactly the sample written that many steps ago.
    #[test]
    fn delay_integer_read(
        samples in prop::collection::vec(-1.0f32..=1.0f32, 1..256),
        back in 0usize..256,
    ) {
        let mut delay = InterpolatedDelay::new(512);
        for &s in &samples {
            delay.write(s);
        }
        if back < samples.len() {
            let expected = samples[samples.len() - 1 - back];
            prop_assert_eq!(delay.read(back as f32), expected);
        }
    }

    /// Constrained values always land in range.
    #[test]
    fn constrain_in_range(value in -1000.0f64..1000.0f64) {
        let desc = ParamDescriptor::new("Rate", "rate", ParamUnit::Hertz, 0.1, 20.0, 5.0)
            .with_step(0.01);
        let c = desc.constrain(value);
        prop_assert!(desc.contains(c), "{} constrained to {}", value, c);
    }

    /// Decoding a truncated blob reports truncation instead of panicking.
    #[test]
    fn state_truncation_never_panics(values in prop::collection::vec(any::<f64>(), 1..12), cut in 0usize..100) {
        let mut writer = StateWriter::new();
        for &v in &values {
            writer.write_f64(v);
        }
        let bytes = writer.finish();
        let cut = cut.min(bytes.len());

        match StateReader::new(&bytes[..cut]) {
            Ok(mut reader) => {
                for &v in &values {
                    match reader.read_f64() {
                        Ok(read) => prop_assert_eq!(read.to_bits(), v.to_bits()),
                        Err(err) => {
                            prop_assert!(matches!(err, StateError::Truncated { .. }), "expected StateError::Truncated, got {:?}", err);
                            break;
                        }
                    }
                }
            }
            Err(err) => prop_assert!(matches!(err, StateError::Truncated { .. }), "expected StateError::Truncated, got {:?}", err),
        }
    }
}
