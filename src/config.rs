//! Engine configuration.
//!
//! [`SynthConfig`] gathers everything the engine needs before the first
//! block: envelope timings plus the initial values of the shared
//! [`SynthParams`](crate::synth::params::SynthParams). With the `serde`
//! feature enabled it can be loaded from any serde format.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    dsp::{envelope::EnvelopeConfig, oscillator::OscillatorShape},
    error::{Result, SynthError},
    synth::params::MAX_DRIVE,
};

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SynthConfig {
    pub envelope: EnvelopeConfig,
    /// Master volume (0.0 - 1.0)
    pub output_volume: f32,
    /// Post-mix gain (0.0 - 1.0), applied together with the volume
    pub output_gain: f32,
    pub shape: OscillatorShape,
    /// Distortion drive (0.0 - MAX_DRIVE), ignored by the sine shape
    pub drive: f32,
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self {
            envelope: EnvelopeConfig::default(),
            output_volume: 0.5,
            output_gain: 1.0,
            shape: OscillatorShape::Sine,
            drive: 1.0,
        }
    }
}

impl SynthConfig {
    /// Reject values the engine would otherwise have to clamp silently.
    pub fn validate(&self) -> Result<()> {
        self.envelope.validate()?;

        let unit = [
            ("output_volume", self.output_volume),
            ("output_gain", self.output_gain),
        ];
        for (param, value) in unit {
            if !(0.0..=1.0).contains(&value) {
                return Err(SynthError::invalid(param, value, "must lie between 0.0 and 1.0"));
            }
        }

        if !(0.0..=MAX_DRIVE).contains(&self.drive) {
            return Err(SynthError::invalid(
                "drive",
                self.drive,
                "must lie between 0.0 and MAX_DRIVE",
            ));
        }

        Ok(())
    }

    pub fn with_envelope(mut self, envelope: EnvelopeConfig) -> Self {
        self.envelope = envelope;
        self
    }

    pub fn with_output_volume(mut self, volume: f32) -> Self {
        self.output_volume = volume;
        self
    }

    pub fn with_shape(mut self, shape: OscillatorShape) -> Self {
        self.shape = shape;
        self
    }

    pub fn with_drive(mut self, drive: f32) -> Self {
        self.drive = drive;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert!(SynthConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_out_of_range_scalars() {
        let config = SynthConfig::default().with_output_volume(1.2);
        assert!(matches!(
            config.validate(),
            Err(SynthError::InvalidConfiguration {
                param: "output_volume",
                ..
            })
        ));

        let config = SynthConfig::default().with_drive(f32::NAN);
        assert!(config.validate().is_err());
    }

    #[test]
    fn envelope_errors_surface() {
        let envelope = EnvelopeConfig {
            pedal: -1.0,
            ..EnvelopeConfig::default()
        };
        let config = SynthConfig::default().with_envelope(envelope);
        assert!(matches!(
            config.validate(),
            Err(SynthError::InvalidConfiguration { param: "pedal", .. })
        ));
    }
}
