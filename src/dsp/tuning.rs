use std::f64::consts::TAU;

use crate::{
    error::{Result, SynthError},
    NUM_NOTES,
};

/*
Equal Temperament and Phase Increments
======================================

Every MIDI note number maps to one fixed pitch. The reference is A4:

    note 69  = 440 Hz

and each semitone multiplies the frequency by the twelfth root of two:

    frequency(n) = 440 * 2^((n - 69) / 12)

    note  21 (A0)   =   27.5 Hz
    note  60 (C4)   ≈  261.6 Hz
    note  69 (A4)   =  440.0 Hz
    note 108 (C8)   ≈ 4186.0 Hz


From Frequency to Phase Increment
---------------------------------

The oscillator does not track time, it tracks an angle. One full cycle of a
sine is 2π radians, so a tone at f Hz must advance

    increment = 2π * f / sample_rate

radians every sample. At 48kHz, A4 advances 2π * 440 / 48000 ≈ 0.0576 rad.

The table below holds one increment per note. It only depends on the sample
rate, so it is rebuilt whole whenever the rate changes and never touched on
the audio path otherwise.

We compute in f64: phase accumulates for as long as a note is held, and
single precision drifts audibly after a few minutes of sustain.
*/

pub const A4_NOTE: u8 = 69;
pub const A4_FREQUENCY: f64 = 440.0;

/// Convert MIDI note number to frequency in Hz.
/// A4 = 440 Hz = MIDI note 69
#[inline]
pub fn midi_note_to_freq(note: u8) -> f64 {
    A4_FREQUENCY * 2.0_f64.powf((note as f64 - A4_NOTE as f64) / 12.0)
}

/// Radians per sample for every MIDI note at one sample rate.
#[derive(Debug, Clone)]
pub struct PhaseTable {
    sample_rate: f32,
    increments: [f64; NUM_NOTES],
}

impl PhaseTable {
    /// Build the table for `sample_rate`.
    ///
    /// Fails for zero, negative, or non-finite rates since every increment
    /// divides by it.
    pub fn new(sample_rate: f32) -> Result<Self> {
        if !sample_rate.is_finite() || sample_rate <= 0.0 {
            return Err(SynthError::invalid(
                "sample_rate",
                sample_rate,
                "must be a finite rate above zero",
            ));
        }

        let mut increments = [0.0; NUM_NOTES];
        for (note, increment) in increments.iter_mut().enumerate() {
            let frequency = midi_note_to_freq(note as u8);
            *increment = TAU * frequency / sample_rate as f64;
        }

        Ok(Self {
            sample_rate,
            increments,
        })
    }

    #[inline]
    pub fn increment(&self, note: u8) -> f64 {
        self.increments[note as usize]
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }
}
