//! Benchmarks for neurite training primitives.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use neurite::kernel::{apply_updates, backpropagate, propagate, HiddenLayers, Network, Pattern};
use neurite::{Learner, LearnerConfig, ManualClock, Values};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::Duration;

// =============================================================================
// Fixtures
// =============================================================================

fn wide_patterns(inputs: usize, count: usize) -> Vec<Pattern> {
    (0..count)
        .map(|p| {
            let ins: Values = (0..inputs)
                .map(|i| (format!("in_{}", i), ((i * 31 + p * 17) % 100) as f64 / 100.0))
                .collect();
            let outs = Values::from([("out", (p % 2) as f64)]);
            Pattern::new(ins, outs)
        })
        .collect()
}

fn network(patterns: &[Pattern]) -> Network {
    Network::build(
        patterns,
        &HiddenLayers::Explicit(vec![16, 8]),
        &mut ChaCha8Rng::seed_from_u64(42),
    )
    .unwrap()
}

fn benchmark_propagate(c: &mut Criterion) {
    let patterns = wide_patterns(32, 1);
    let mut net = network(&patterns);

    c.bench_function("propagate_32x16x8x1", |b| {
        b.iter(|| propagate(&mut net, black_box(patterns[0].inputs())))
    });
}

fn benchmark_backprop(c: &mut Criterion) {
    let patterns = wide_patterns(32, 1);
    let mut net = network(&patterns);

    c.bench_function("backprop_update_32x16x8x1", |b| {
        b.iter(|| {
            propagate(&mut net, patterns[0].inputs());
            backpropagate(&mut net, black_box(patterns[0].outputs()));
            apply_updates(&mut net, 0.3, 0.1);
        })
    });
}

fn benchmark_build(c: &mut Criterion) {
    let patterns = wide_patterns(32, 64);

    c.bench_function("build_from_64_patterns", |b| {
        b.iter(|| network(black_box(&patterns)))
    });
}

fn benchmark_slice(c: &mut Criterion) {
    c.bench_function("learner_one_slice_xor", |b| {
        b.iter(|| {
            let config = LearnerConfig::default()
                .with_seed(1)
                .with_targeted_mse(0.0)
                .with_slice_budget(Duration::from_millis(1));
            let clock = ManualClock::new(Duration::from_micros(10));
            let mut learner = Learner::with_clock(config, clock).unwrap();
            for (a, bit, out) in [(0.0, 0.0, 0.0), (0.0, 1.0, 1.0), (1.0, 0.0, 1.0), (1.0, 1.0, 0.0)] {
                learner
                    .learn(Values::from([("a", a), ("b", bit)]), Values::from(out))
                    .unwrap();
            }
            learner.guess_now(Values::from([("a", 1.0), ("b", 0.0)])).unwrap();
            learner.step();
            black_box(learner.step())
        })
    });
}

criterion_group!(
    benches,
    benchmark_propagate,
    benchmark_backprop,
    benchmark_build,
    benchmark_slice,
);
criterion_main!(benches);
