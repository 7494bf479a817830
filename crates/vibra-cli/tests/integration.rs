//! Integration tests for vibra-cli.
//!
//! Each test runs the `vibra` binary against files in a temporary directory.

use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

fn vibra_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_vibra"))
}

fn run_ok(args: &[&str]) -> Output {
    let output = vibra_bin().args(args).output().expect("failed to run vibra");
    assert!(
        output.status.success(),
        "vibra {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    output
}

fn write_float_wav(path: &Path, channels: &[Vec<f32>], sample_rate: u32) {
    let spec = hound::WavSpec {
        channels: channels.len() as u16,
        sample_rate,
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Float,
    };
    let mut writer = hound::WavWriter::create(path, spec).unwrap();
    for frame in 0..channels[0].len() {
        for channel in channels {
            writer.write_sample(channel[frame]).unwrap();
        }
    }
    writer.finalize().unwrap();
}

fn read_float_wav(path: &Path) -> (hound::WavSpec, Vec<f32>) {
    let mut reader = hound::WavReader::open(path).unwrap();
    let spec = reader.spec();
    let samples = reader.samples::<f32>().map(Result::unwrap).collect();
    (spec, samples)
}

// ---------------------------------------------------------------------------
// vibra params / presets
// ---------------------------------------------------------------------------

#[test]
fn cli_params_lists_every_engine() {
    let output = run_ok(&["params"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    for key in ["wave_type", "auto_wah_rate", "depth", "feedback", "delay"] {
        assert!(stdout.contains(key), "params listing should contain '{key}'");
    }
    for engine in ["synth", "tremolo", "chorus", "flanger"] {
        assert!(stdout.contains(engine));
    }
}

#[test]
fn cli_params_flanger_shows_flanger_ranges() {
    let output = run_ok(&["params", "flanger"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("0.5 - 5"), "got:\n{stdout}");
}

#[test]
fn cli_presets_list_and_show() {
    let output = run_ok(&["presets", "list"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("wah_lead"));
    assert!(stdout.contains("jet_flanger"));

    let output = run_ok(&["presets", "show", "jet_flanger"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("[chorus_flanger]"));
    assert!(stdout.contains("mode = \"flanger\""));
}

#[test]
fn cli_presets_validate_rejects_bad_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.toml");
    std::fs::write(&path, "name = \"bad\"\n[tremolo]\nrate = 99.0\n").unwrap();

    let output = vibra_bin()
        .args(["presets", "validate", path.to_str().unwrap()])
        .output()
        .unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("rate"), "got: {stderr}");
}

// ---------------------------------------------------------------------------
// vibra render
// ---------------------------------------------------------------------------

#[test]
fn cli_render_writes_expected_length() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("chord.wav");
    run_ok(&[
        "render",
        out.to_str().unwrap(),
        "--sample-rate",
        "8000",
        "--length",
        "0.5",
        "--tail",
        "0",
        "--param",
        "release=0.1",
        "--notes",
        "C4",
        "E4",
        "G4",
    ]);

    let (spec, samples) = read_float_wav(&out);
    assert_eq!(spec.channels, 2);
    assert_eq!(spec.sample_rate, 8000);
    // 0.5 s hold plus 0.1 s release at 8 kHz
    assert_eq!(samples.len(), 2 * 4800);
    assert!(samples.iter().all(|s| s.is_finite()));
    assert!(samples.iter().any(|&s| s.abs() > 0.01));

    // Channels are identical copies.
    for frame in samples.chunks_exact(2) {
        assert_eq!(frame[0], frame[1]);
    }
}

#[test]
fn cli_render_rejects_unknown_param() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("x.wav");
    let output = vibra_bin()
        .args([
            "render",
            out.to_str().unwrap(),
            "--param",
            "cutoff=100",
            "--notes",
            "60",
        ])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(!out.exists());
}

// ---------------------------------------------------------------------------
// vibra process
// ---------------------------------------------------------------------------

#[test]
fn cli_process_tremolo_zero_depth_is_identity() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("in.wav");
    let output = dir.path().join("out.wav");
    let left: Vec<f32> = (0..4000).map(|i| (i as f32 * 0.03).sin() * 0.5).collect();
    let right: Vec<f32> = left.iter().map(|s| s * 0.5).collect();
    write_float_wav(&input, &[left, right], 44100);

    run_ok(&[
        "process",
        input.to_str().unwrap(),
        output.to_str().unwrap(),
        "--effect",
        "tremolo",
        "--param",
        "depth=0",
    ]);

    let (_, original) = read_float_wav(&input);
    let (spec, processed) = read_float_wav(&output);
    assert_eq!(spec.channels, 2);
    assert_eq!(processed, original);
}

#[test]
fn cli_process_flanger_changes_signal() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("in.wav");
    let output = dir.path().join("out.wav");
    let mono: Vec<f32> = (0..8000).map(|i| (i as f32 * 0.07).sin() * 0.5).collect();
    write_float_wav(&input, &[mono.clone()], 48000);

    run_ok(&[
        "process",
        input.to_str().unwrap(),
        output.to_str().unwrap(),
        "--effect",
        "flanger",
        "--preset",
        "jet_flanger",
    ]);

    let (spec, processed) = read_float_wav(&output);
    assert_eq!(spec.channels, 1);
    assert_eq!(processed.len(), mono.len());
    assert!(processed.iter().all(|s| s.is_finite()));
    assert!(processed.iter().zip(&mono).any(|(a, b)| (a - b).abs() > 1e-3));
}

// ---------------------------------------------------------------------------
// vibra state
// ---------------------------------------------------------------------------

#[test]
fn cli_state_dump_and_load_roundtrip() {
    let dir = TempDir::new().unwrap();
    let blob = dir.path().join("synth.bin");
    let preset = dir.path().join("restored.toml");

    run_ok(&[
        "state",
        "dump",
        "synth",
        blob.to_str().unwrap(),
        "--param",
        "wave_type=square",
        "--param",
        "auto_wah_enabled=true",
    ]);
    let bytes = std::fs::read(&blob).unwrap();
    assert_eq!(bytes.len(), 78);
    assert_eq!(bytes[0], 0);
    assert_eq!(&bytes[17..21], &3i32.to_le_bytes());
    assert_eq!(bytes[77], 1);

    let output = run_ok(&[
        "state",
        "load",
        "synth",
        blob.to_str().unwrap(),
        "--save-preset",
        preset.to_str().unwrap(),
    ]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("square"));

    let toml = std::fs::read_to_string(&preset).unwrap();
    assert!(toml.contains("wave_type = \"square\""));
    assert!(toml.contains("auto_wah_enabled = true"));
}

#[test]
fn cli_state_load_rejects_truncated_blob() {
    let dir = TempDir::new().unwrap();
    let blob = dir.path().join("short.bin");
    std::fs::write(&blob, [0u8, 1, 2]).unwrap();

    let output = vibra_bin()
        .args(["state", "load", "tremolo", blob.to_str().unwrap()])
        .output()
        .unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("not a valid tremolo state"), "got: {stderr}");
}

#[test]
fn cli_state_flanger_mode_byte() {
    let dir = TempDir::new().unwrap();
    let blob = dir.path().join("flanger.bin");
    run_ok(&["state", "dump", "flanger", blob.to_str().unwrap()]);
    let bytes = std::fs::read(&blob).unwrap();
    assert_eq!(bytes.len(), 18);
    assert_eq!(bytes[1], 1);
}
