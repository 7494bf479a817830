//! Criterion benchmarks for vibra-synth components
//!
//! Run with: cargo bench -p vibra-synth

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use vibra_core::ParameterInfo;
use vibra_synth::{
    Adsr, Envelope, NoteEvent, SubtractiveSynth, SynthParams, VOICE_COUNT, WaveType,
};

const SAMPLE_RATE: f64 = 48000.0;
const BLOCK_SIZES: &[usize] = &[64, 128, 256, 512, 1024];

// ============================================================================
// Oscillator benchmarks
// ============================================================================

fn bench_waveforms(c: &mut Criterion) {
    let mut group = c.benchmark_group("Waveform");

    for wave in WaveType::ALL {
        for &block_size in BLOCK_SIZES {
            let delta = std::f64::consts::TAU * 440.0 / SAMPLE_RATE;
            group.bench_with_input(
                BenchmarkId::new(wave.name(), block_size),
                &block_size,
                |b, &size| {
                    b.iter(|| {
                        let mut angle = 0.0;
                        let mut sum = 0.0;
                        for _ in 0..size {
                            sum += wave.render(angle, 0.5);
                            angle += delta;
                            if angle >= std::f64::consts::TAU {
                                angle -= std::f64::consts::TAU;
                            }
                        }
                        black_box(sum)
                    })
                },
            );
        }
    }

    group.finish();
}

// ============================================================================
// Envelope benchmarks
// ============================================================================

fn bench_envelope_full_cycle(c: &mut Criterion) {
    let adsr = Adsr::default();
    c.bench_function("Envelope/full_cycle", |b| {
        b.iter(|| {
            let mut env = Envelope::new(SAMPLE_RATE);
            env.note_on();
            for _ in 0..4800 {
                env.advance(&adsr);
            }
            env.note_off();
            while env.is_active() {
                env.advance(&adsr);
            }
            black_box(env.multiplier())
        })
    });
}

// ============================================================================
// Engine benchmarks
// ============================================================================

fn bench_synth_voices(c: &mut Criterion) {
    let mut group = c.benchmark_group("Synth");

    for voices in [1, 4, VOICE_COUNT] {
        for wah in [false, true] {
            let label = if wah { "wah" } else { "dry" };
            let mut synth = SubtractiveSynth::new();
            synth
                .params()
                .set_param(SynthParams::AUTO_WAH_ENABLED, if wah { 1.0 } else { 0.0 });
            synth.params().set_param(SynthParams::SUSTAIN, 1.0);
            synth.prepare(SAMPLE_RATE, 512);

            let chord: Vec<NoteEvent> = (0..voices as u8)
                .map(|i| NoteEvent::On {
                    note: 48 + i * 2,
                    velocity: 100,
                })
                .collect();
            let mut left = vec![0.0f32; 512];
            let mut right = vec![0.0f32; 512];
            synth.process_block(&mut [&mut left[..], &mut right[..]], &chord, None);

            group.bench_function(BenchmarkId::new(label, voices), |b| {
                b.iter(|| {
                    synth.process_block(&mut [&mut left[..], &mut right[..]], &[], None);
                    black_box(left[0])
                })
            });
        }
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_waveforms,
    bench_envelope_full_cycle,
    bench_synth_voices,
);

criterion_main!(benches);
