use proptest::prelude::*;
use repcount::{find_peaks, RepCounter, RepCounterConfig};
use std::f64::consts::PI;

fn arbitrary_signal() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-100.0f64..100.0, 0..300)
}

fn arbitrary_config() -> impl Strategy<Value = RepCounterConfig> {
    (1usize..30, 0usize..40, 0.0f64..2.0, 0.5f64..20.0, any::<bool>()).prop_map(
        |(distance, min_buffer_size, prominence, filter_constant, use_filter)| {
            RepCounterConfig::default()
                .with_distance(distance)
                .with_min_buffer_size(min_buffer_size)
                .with_prominence(prominence)
                .with_filter_constant(filter_constant)
                .with_use_filter(use_filter)
        },
    )
}

#[test]
fn buffer_grows_by_one_per_sample() {
    proptest!(|(config in arbitrary_config(), signal in arbitrary_signal())| {
        let mut counter = RepCounter::new(config).unwrap();
        for (i, &x) in signal.iter().enumerate() {
            let _ = counter.count(x);
            prop_assert_eq!(counter.buffer().len(), i + 1);
            prop_assert_eq!(counter.frame_count(), i + 1);
        }
    });
}

#[test]
fn throttled_frames_repeat_previous_count() {
    proptest!(|(config in arbitrary_config(), signal in arbitrary_signal())| {
        let mut counter = RepCounter::new(config).unwrap();
        let mut previous = 0;
        for &x in &signal {
            let Ok(reps) = counter.count(x) else { continue };
            let frame = counter.frame_count();
            if frame < config.min_buffer_size || !counter.is_recompute_frame(frame) {
                prop_assert_eq!(reps, previous);
            }
            previous = reps;
        }
    });
}

#[test]
fn reset_behaves_like_fresh_counter() {
    proptest!(|(config in arbitrary_config(), signal in arbitrary_signal(), x in -10.0f64..10.0)| {
        let mut counter = RepCounter::new(config).unwrap();
        for &s in &signal {
            let _ = counter.count(s);
        }
        counter.reset();

        let mut fresh = RepCounter::new(config).unwrap();
        prop_assert_eq!(counter.count(x), fresh.count(x));
        prop_assert_eq!(counter.buffer(), fresh.buffer());
        prop_assert_eq!(counter.smoothed(), fresh.smoothed());
        prop_assert_eq!(counter.rep_count(), fresh.rep_count());
    });
}

#[test]
fn peaks_respect_distance() {
    proptest!(|(signal in arbitrary_signal(), distance in 1usize..40, prominence in 0.0f64..5.0)| {
        let peaks = find_peaks(&signal, distance, prominence);
        for pair in peaks.windows(2) {
            prop_assert!(pair[1] - pair[0] >= distance);
        }
        for &p in &peaks {
            prop_assert!(p > 0 && p + 1 < signal.len());
        }
    });
}

#[test]
fn counting_is_deterministic() {
    proptest!(|(config in arbitrary_config(), signal in arbitrary_signal())| {
        let mut a = RepCounter::new(config).unwrap();
        let mut b = RepCounter::new(config).unwrap();
        for &x in &signal {
            prop_assert_eq!(a.count(x), b.count(x));
        }
    });
}

#[test]
fn raw_sinusoid_converges_to_period_count() {
    // Periods are multiples of 10 so the final frame is always a recompute frame
    proptest!(|(periods in 1usize..8, period_tenths in 2usize..8, distance in 2usize..10)| {
        let period = period_tenths * 10;
        prop_assume!(distance < period / 2);

        let config = RepCounterConfig::default()
            .with_use_filter(false)
            .with_distance(distance)
            .with_min_buffer_size(1);
        let mut counter = RepCounter::new(config).unwrap();

        let samples = periods * period;
        let mut reps = 0;
        for i in 0..samples {
            let x = (2.0 * PI * i as f64 / period as f64).sin();
            reps = counter.count(x).unwrap();
        }

        prop_assume!(counter.is_recompute_frame(samples));
        prop_assert_eq!(reps, periods);
    });
}

#[test]
fn flat_signal_never_counts() {
    proptest!(|(level in -50.0f64..50.0, len in 1usize..120, use_filter in any::<bool>())| {
        let config = RepCounterConfig::default().with_use_filter(use_filter);
        let mut counter = RepCounter::new(config).unwrap();
        for _ in 0..len {
            prop_assert_eq!(counter.count(level), Ok(0));
        }
    });
}

/// 20 resting frames, 8 raised-cosine reps of `period` frames, 20 resting
/// frames, plus LCG jitter in `[-jitter, jitter]`.
fn rep_trace(period: usize, jitter: f64, seed: u64) -> Vec<f64> {
    let mut trace = vec![0.0; 20];
    trace.extend((0..8 * period).map(|i| {
        let phase = 2.0 * PI * (i % period) as f64 / period as f64;
        0.5 * (1.0 - phase.cos())
    }));
    trace.extend(std::iter::repeat(0.0).take(20));

    let mut state = seed;
    if jitter > 0.0 {
        for s in &mut trace {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
            *s += jitter * ((state as f64 / u64::MAX as f64) * 2.0 - 1.0);
        }
    }
    trace
}

fn assert_count_never_drops(config: RepCounterConfig, trace: &[f64], label: &str) {
    let mut counter = RepCounter::new(config).unwrap();
    let mut previous = 0;
    for (frame, &x) in trace.iter().enumerate() {
        let reps = counter.count(x).unwrap();
        assert!(
            reps >= previous,
            "{}: count fell {} -> {} at frame {}",
            label,
            previous,
            reps,
            frame + 1
        );
        previous = reps;
    }
    assert_eq!(previous, 8, "{}: final count", label);
}

#[test]
fn count_never_drops_on_clean_reps() {
    let base = RepCounterConfig::default();
    let configs = [
        ("raw", base.with_use_filter(false)),
        ("loess c=3", base.with_filter_constant(3.0)),
        ("loess c=10", base),
    ];

    for period in (16..=60).step_by(2) {
        let trace = rep_trace(period, 0.0, 0);
        for (name, config) in configs {
            assert_count_never_drops(config, &trace, &format!("{} period={}", name, period));
        }
    }
}

#[test]
fn count_never_drops_on_jittered_reps_with_prominence() {
    let base = RepCounterConfig::default().with_prominence(0.2);
    let configs = [("raw", base.with_use_filter(false)), ("loess c=10", base)];

    for seed in 1..=40 {
        for period in [20, 30, 40] {
            for jitter in [0.02, 0.05] {
                let trace = rep_trace(period, jitter, seed);
                for (name, config) in configs {
                    let label = format!("{} seed={} period={} jitter={}", name, seed, period, jitter);
                    assert_count_never_drops(config, &trace, &label);
                }
            }
        }
    }
}
