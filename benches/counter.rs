use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use repcount::{find_peaks, Loess, RepCounter, RepCounterConfig};

fn sine_with_noise(samples: usize, period: f64, seed: u64) -> Vec<f64> {
    let mut state = seed;
    (0..samples)
        .map(|i| {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
            let noise = (state as f64 / u64::MAX as f64) * 0.2 - 0.1;
            (2.0 * std::f64::consts::PI * i as f64 / period).sin() + noise
        })
        .collect()
}

// One full smoothing pass is O(n * reach); reach ~122 samples for c = 10
fn bench_loess_pass(c: &mut Criterion) {
    let mut group = c.benchmark_group("loess_pass");
    let loess = Loess::new(10.0).unwrap();

    for size in [100, 250, 500, 1000].iter() {
        let signal = sine_with_noise(*size, 40.0, 42);
        let mut out = Vec::with_capacity(*size);
        group.throughput(Throughput::Elements(*size as u64));

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| {
                loess.smooth_into(black_box(&signal), &mut out).unwrap();
                black_box(&out);
            });
        });
    }

    group.finish();
}

fn bench_find_peaks(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_peaks");

    for size in [100, 1000, 10000].iter() {
        let signal = sine_with_noise(*size, 40.0, 7);
        group.throughput(Throughput::Elements(*size as u64));

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| black_box(find_peaks(black_box(&signal), 10, 0.5)));
        });
    }

    group.finish();
}

// Full streaming run: one count() call per sample, recompute every 5 frames
fn bench_streaming_run(c: &mut Criterion) {
    let mut group = c.benchmark_group("streaming_run");
    group.sample_size(20);

    for use_filter in [false, true] {
        let signal = sine_with_noise(600, 40.0, 3);
        let config = RepCounterConfig::default().with_use_filter(use_filter);
        let label = if use_filter { "filtered" } else { "raw" };

        group.bench_function(BenchmarkId::new(label, signal.len()), |b| {
            b.iter(|| {
                let mut counter = RepCounter::new(config).unwrap();
                for &x in &signal {
                    let _ = black_box(counter.count(black_box(x)));
                }
                counter.rep_count()
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_loess_pass,
    bench_find_peaks,
    bench_streaming_run
);
criterion_main!(benches);
