//! Benchmarks for the envelope law.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use sostenuto::dsp::envelope::{EnvelopeConfig, EnvelopeState};

use crate::BLOCK_SIZES;

pub fn bench_envelope(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/envelope");
    let env = EnvelopeConfig::default().to_samples(48_000.0);

    // (name, state, first timer value)
    let cases = [
        ("attack", EnvelopeState::On, 0),
        ("sustain", EnvelopeState::On, env.sustain_onset()),
        ("release", EnvelopeState::Off, 0),
        // Pedal runs a sqrt per sample
        ("pedal", EnvelopeState::Pedal, 0),
        ("pedal_off", EnvelopeState::PedalOff, 0),
    ];

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        for (name, state, start) in cases {
            group.bench_with_input(BenchmarkId::new(name, size), &size, |b, _| {
                b.iter(|| {
                    for (t, sample) in buffer.iter_mut().enumerate() {
                        *sample = env
                            .level(black_box(state), start + t as u32, 0.4, 1_000)
                            .unwrap_or(0.0);
                    }
                })
            });
        }
    }

    group.finish();
}
