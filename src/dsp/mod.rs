//! Low-level DSP primitives used by the voice engine.
//!
//! These components are allocation-free and realtime-safe, making them safe to
//! call from inside the audio callback. They stay focused on the
//! signal-processing math; the state they read lives in the voice table.

/// Hard-clip waveshaper behind the distortion shape.
pub mod distortion;
/// Piano-style envelope with sustain-pedal segments.
pub mod envelope;
/// Oscillator shapes.
pub mod oscillator;
/// Equal-tempered note frequencies and per-sample phase increments.
pub mod tuning;

pub use envelope::{Envelope, EnvelopeConfig, EnvelopeState};
pub use oscillator::OscillatorShape;
pub use tuning::PhaseTable;
