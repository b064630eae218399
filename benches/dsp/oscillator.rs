//! Benchmarks for oscillator shapes.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use sostenuto::dsp::{oscillator::OscillatorShape, tuning::PhaseTable};

use crate::BLOCK_SIZES;

pub fn bench_oscillator(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/oscillator");
    let table = PhaseTable::new(48_000.0).expect("valid sample rate");
    let increment = table.increment(69);

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        for shape in OscillatorShape::ALL {
            let mut phase = 0.0f64;
            group.bench_with_input(BenchmarkId::new(shape.name(), size), &size, |b, _| {
                b.iter(|| {
                    for sample in buffer.iter_mut() {
                        *sample = black_box(shape).sample(phase, black_box(4.0));
                        phase += increment;
                    }
                })
            });
        }
    }

    group.finish();
}
