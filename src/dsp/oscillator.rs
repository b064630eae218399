#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::dsp::distortion::hard_clip;

/*
Oscillator Shapes
=================

The oscillator maps a phase angle (radians) to one sample. It keeps no state
of its own: each voice owns its phase and the renderer asks the globally
selected shape for a value.

Sine: the pure tone.
  - amplitude = sin(phase)
  - Harmonics: fundamental only

Distortion: an overdriven sine.
  - amplitude = clamp(drive * sin(phase), -1, 1)
  - drive <= 1.0 stays clean (a quieter sine below 1.0)
  - drive > 1.0 flattens the peaks, adding odd harmonics

Both shapes stay inside [-1, 1] for any drive, so a voice can never exceed
its envelope level.
*/

/// Globally selected oscillator shape.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OscillatorShape {
    #[default]
    Sine,
    Distortion,
}

impl OscillatorShape {
    pub const ALL: [OscillatorShape; 2] = [OscillatorShape::Sine, OscillatorShape::Distortion];

    /// One sample of this shape at `phase` radians.
    ///
    /// `drive` only affects [`OscillatorShape::Distortion`].
    #[inline]
    pub fn sample(self, phase: f64, drive: f32) -> f32 {
        let sine = phase.sin() as f32;
        match self {
            OscillatorShape::Sine => sine,
            OscillatorShape::Distortion => hard_clip(sine, drive, 1.0),
        }
    }

    /// The shape after this one, wrapping around.
    pub fn next(self) -> Self {
        match self {
            OscillatorShape::Sine => OscillatorShape::Distortion,
            OscillatorShape::Distortion => OscillatorShape::Sine,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            OscillatorShape::Sine => "sine",
            OscillatorShape::Distortion => "distortion",
        }
    }

    pub(crate) fn to_u8(self) -> u8 {
        match self {
            OscillatorShape::Sine => 0,
            OscillatorShape::Distortion => 1,
        }
    }

    pub(crate) fn from_u8(value: u8) -> Self {
        match value {
            1 => OscillatorShape::Distortion,
            _ => OscillatorShape::Sine,
        }
    }
}
