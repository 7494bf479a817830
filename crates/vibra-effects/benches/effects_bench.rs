//! Criterion benchmarks for vibra-effects
//!
//! Run with: cargo bench -p vibra-effects

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use vibra_core::Effect;
use vibra_effects::{ChorusFlanger, ModulationMode, Tremolo};

const SAMPLE_RATE: f64 = 48000.0;
const BLOCK_SIZES: &[usize] = &[64, 128, 256, 512, 1024];

fn stereo_input(size: usize) -> (Vec<f32>, Vec<f32>) {
    let left: Vec<f32> = (0..size).map(|i| ((i as f32) * 0.05).sin() * 0.5).collect();
    (left.clone(), left)
}

fn bench_tremolo(c: &mut Criterion) {
    let mut group = c.benchmark_group("Tremolo");

    for &block_size in BLOCK_SIZES {
        let mut tremolo = Tremolo::new();
        tremolo.prepare(SAMPLE_RATE, block_size);
        let (mut left, mut right) = stereo_input(block_size);

        group.bench_with_input(BenchmarkId::new("stereo", block_size), &block_size, |b, _| {
            b.iter(|| {
                tremolo.process_block(&mut [&mut left[..], &mut right[..]]);
                black_box(left[0])
            })
        });
    }

    group.finish();
}

fn bench_chorus_flanger(c: &mut Criterion) {
    let mut group = c.benchmark_group("ChorusFlanger");

    for mode in [ModulationMode::Chorus, ModulationMode::Flanger] {
        for &block_size in BLOCK_SIZES {
            let mut effect = ChorusFlanger::new();
            effect.params().switch_mode(mode);
            effect.prepare(SAMPLE_RATE, block_size);
            let (mut left, mut right) = stereo_input(block_size);

            group.bench_with_input(
                BenchmarkId::new(mode.name(), block_size),
                &block_size,
                |b, _| {
                    b.iter(|| {
                        effect.process_block(&mut [&mut left[..], &mut right[..]]);
                        black_box(left[0])
                    })
                },
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_tremolo, bench_chorus_flanger);

criterion_main!(benches);
