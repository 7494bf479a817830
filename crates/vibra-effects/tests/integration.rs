//! End-to-end behaviour of the tremolo and chorus/flanger engines.

use std::sync::Arc;

use vibra_core::{Effect, ParameterInfo, StateError};
use vibra_effects::{
    CHORUS_FLANGER_STATE_LEN, ChorusFlanger, ChorusFlangerParams, ChorusFlangerSnapshot,
    ModulationMode, TREMOLO_STATE_LEN, Tremolo, TremoloParams, TremoloSnapshot,
};

fn stereo_sine(len: usize, freq: f32, sample_rate: f32) -> (Vec<f32>, Vec<f32>) {
    let left: Vec<f32> = (0..len)
        .map(|i| (std::f32::consts::TAU * freq * i as f32 / sample_rate).sin() * 0.5)
        .collect();
    let right = left.clone();
    (left, right)
}

// ============================================================================
// Tremolo
// ============================================================================

#[test]
fn tremolo_zero_depth_is_bit_exact() {
    let mut tremolo = Tremolo::new();
    tremolo.params().set_depth(0.0);
    tremolo.prepare(44100.0, 256);

    let (mut left, mut right) = stereo_sine(256, 440.0, 44100.0);
    let original = left.clone();
    tremolo.process_block(&mut [&mut left[..], &mut right[..]]);
    assert_eq!(left, original);
    assert_eq!(right, original);
}

#[test]
fn tremolo_full_depth_silences_at_peak() {
    let mut tremolo = Tremolo::new();
    tremolo.params().set_depth(1.0);
    tremolo.prepare(48000.0, 1);
    tremolo.set_phase(0.25);

    let mut buf = [0.8f32];
    tremolo.process_block(&mut [&mut buf[..]]);
    assert_eq!(buf[0], 0.0);
}

#[test]
fn tremolo_full_depth_passes_at_trough() {
    let mut tremolo = Tremolo::new();
    tremolo.params().set_depth(1.0);
    tremolo.prepare(48000.0, 1);
    tremolo.set_phase(0.75);

    let mut buf = [0.8f32];
    tremolo.process_block(&mut [&mut buf[..]]);
    assert!((buf[0] - 0.8).abs() < 1e-6);
}

#[test]
fn tremolo_gain_follows_depth() {
    let mut tremolo = Tremolo::new();
    tremolo.params().set_depth(0.5);
    tremolo.prepare(48000.0, 1);

    // phase 0: modulator 0.5, gain 0.75
    let mut buf = [1.0f32];
    tremolo.process_block(&mut [&mut buf[..]]);
    assert!((buf[0] - 0.75).abs() < 1e-6);
}

#[test]
fn tremolo_state_roundtrip_and_rejects_short() {
    let source = Tremolo::new();
    source.params().set_depth(0.9);
    source.params().set_rate(7.5);
    let bytes = source.save_state();
    assert_eq!(bytes.len(), TREMOLO_STATE_LEN);

    let target = Tremolo::new();
    target.restore_state(&bytes).unwrap();
    assert_eq!(
        target.params().snapshot(),
        TremoloSnapshot {
            depth: 0.9,
            rate: 7.5
        }
    );

    let err = target.restore_state(&bytes[..6]).unwrap_err();
    assert!(matches!(err, StateError::Truncated { .. }));
    assert_eq!(target.params().snapshot().depth, 0.9);
}

#[test]
fn tremolo_shares_store_with_ui_side() {
    let params = Arc::new(TremoloParams::new());
    let mut tremolo = Tremolo::with_params(Arc::clone(&params));
    tremolo.prepare(48000.0, 4);

    params.set_param(TremoloParams::DEPTH, 0.0);
    let mut buf = [0.3f32; 4];
    tremolo.process_block(&mut [&mut buf[..]]);
    assert_eq!(buf, [0.3; 4]);
}

// ============================================================================
// Chorus / flanger
// ============================================================================

#[test]
fn chorus_default_values() {
    let params = ChorusFlangerParams::new();
    assert_eq!(params.mode(), ModulationMode::Chorus);
    assert_eq!(params.get_param(ChorusFlangerParams::RATE), 5.0);
    assert!((params.get_param(ChorusFlangerParams::DEPTH) - 0.6).abs() < 1e-6);
    assert_eq!(params.get_param(ChorusFlangerParams::DELAY), 15.0);
    assert!((params.get_param(ChorusFlangerParams::FEEDBACK) - 0.05).abs() < 1e-6);
    assert_eq!(params.param_index("feedback"), Some(ChorusFlangerParams::FEEDBACK));
}

#[test]
fn chorus_mode_roundtrip_keeps_values_close() {
    let params = ChorusFlangerParams::new();
    params.switch_mode(ModulationMode::Flanger);
    params.switch_mode(ModulationMode::Chorus);
    let snap = params.snapshot();
    assert_eq!(snap.mode, ModulationMode::Chorus);
    assert!((snap.rate - 5.0).abs() < 0.02);
    assert!((snap.delay - 15.0).abs() < 0.05);
    assert!((snap.feedback - 0.05).abs() < 1e-6);
}

#[test]
fn chorus_output_is_finite_with_max_feedback() {
    let mut chorus = ChorusFlanger::new();
    chorus.params().set_param(ChorusFlangerParams::FEEDBACK, 1.0);
    chorus.params().set_param(ChorusFlangerParams::DEPTH, 1.0);
    chorus.prepare(48000.0, 512);

    for _ in 0..200 {
        let (mut left, mut right) = stereo_sine(512, 220.0, 48000.0);
        chorus.process_block(&mut [&mut left[..], &mut right[..]]);
        assert!(left.iter().chain(right.iter()).all(|s| s.is_finite() && s.abs() < 20.0));
    }
}

#[test]
fn chorus_wet_signal_arrives_after_delay() {
    let mut chorus = ChorusFlanger::new();
    let params = chorus.params();
    params.set_param(ChorusFlangerParams::DEPTH, 0.0);
    params.set_param(ChorusFlangerParams::DELAY, 1.0);
    params.set_param(ChorusFlangerParams::FEEDBACK, 0.0);
    chorus.prepare(48000.0, 96);

    let mut buf = vec![0.0f32; 96];
    buf[0] = 1.0;
    chorus.process_block(&mut [&mut buf[..]]);

    assert_eq!(buf[0], 0.5);
    assert!((buf[48] - 0.5).abs() < 1e-6, "echo at 1 ms: {}", buf[48]);
    let elsewhere: f32 = buf
        .iter()
        .enumerate()
        .filter(|&(i, _)| i != 0 && i != 48)
        .map(|(_, s)| s.abs())
        .sum();
    assert!(elsewhere < 1e-6);
}

#[test]
fn chorus_reset_clears_delay_lines() {
    let mut chorus = ChorusFlanger::new();
    chorus.prepare(48000.0, 256);
    let mut buf = vec![1.0f32; 256];
    chorus.process_block(&mut [&mut buf[..]]);

    chorus.reset();
    let mut silence = vec![0.0f32; 256];
    chorus.process_block(&mut [&mut silence[..]]);
    assert!(silence.iter().all(|&s| s == 0.0));
}

#[test]
fn chorus_state_roundtrip_preserves_mode() {
    let source = ChorusFlanger::new();
    source.params().switch_mode(ModulationMode::Flanger);
    let bytes = source.save_state();
    assert_eq!(bytes.len(), CHORUS_FLANGER_STATE_LEN);
    assert_eq!(bytes[1], 1);

    let target = ChorusFlanger::new();
    target.restore_state(&bytes).unwrap();
    assert_eq!(target.params().snapshot(), source.params().snapshot());
    assert_eq!(
        target.params().param_info(ChorusFlangerParams::DELAY).unwrap().max,
        5.0
    );
}

#[test]
fn chorus_bad_state_leaves_store_untouched() {
    let chorus = ChorusFlanger::new();
    let mut bytes = ChorusFlangerSnapshot {
        rate: 1.0,
        ..ChorusFlangerSnapshot::default()
    }
    .to_state();
    bytes[1] = 9;
    assert_eq!(chorus.restore_state(&bytes), Err(StateError::InvalidMode(9)));
    assert_eq!(chorus.params().snapshot(), ChorusFlangerSnapshot::default());

    assert!(chorus.restore_state(&[]).is_err());
}
