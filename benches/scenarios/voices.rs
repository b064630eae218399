//! Benchmarks for whole-block rendering.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use sostenuto::{
    dsp::oscillator::OscillatorShape,
    synth::{message::SynthMessage, poly::PolySynth},
    SynthConfig, NUM_NOTES,
};

use crate::BLOCK_SIZES;

fn engine(notes: impl IntoIterator<Item = u8>, pedal: bool) -> PolySynth {
    let mut synth = PolySynth::standalone(48_000.0, SynthConfig::default()).expect("valid config");
    if pedal {
        synth.handle_message(SynthMessage::SustainPedal(true));
    }
    for note in notes {
        synth.handle_message(SynthMessage::NoteOn {
            note,
            velocity: 0.8,
        });
        if pedal {
            synth.handle_message(SynthMessage::NoteOff { note });
        }
    }
    synth
}

pub fn bench_voices(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/voices");

    for &size in BLOCK_SIZES {
        let mut left = vec![0.0f32; size];
        let mut right = vec![0.0f32; size];

        // === IDLE ===
        // Baseline: 128 idle voices, nothing but the skip test
        let mut idle = engine(std::iter::empty(), false);
        group.bench_with_input(BenchmarkId::new("idle", size), &size, |b, _| {
            b.iter(|| idle.render_block(black_box(&mut left), black_box(&mut right)))
        });

        // === TRIAD ===
        let mut triad = engine([60, 64, 67], false);
        group.bench_with_input(BenchmarkId::new("triad", size), &size, |b, _| {
            b.iter(|| triad.render_block(black_box(&mut left), black_box(&mut right)))
        });

        // === PEDAL WASH ===
        // Two octaves of released keys ringing under the pedal
        let mut wash = engine(48..72, true);
        group.bench_with_input(BenchmarkId::new("pedal_wash", size), &size, |b, _| {
            b.iter(|| wash.render_block(black_box(&mut left), black_box(&mut right)))
        });

        // === FULL KEYBOARD ===
        // Worst case: every voice active with the clipping shape
        let mut full = engine(0..NUM_NOTES as u8, false);
        full.params().set_shape(OscillatorShape::Distortion);
        full.params().set_drive(4.0);
        group.bench_with_input(BenchmarkId::new("all_128", size), &size, |b, _| {
            b.iter(|| full.render_block(black_box(&mut left), black_box(&mut right)))
        });
    }

    group.finish();
}
