//! Lock-free scalar parameters shared between the UI and the audio thread.
//!
//! Every parameter is a single atomic: the UI thread stores, the audio thread
//! loads once per block. f32 values travel as their bit patterns in an
//! `AtomicU32`. `Relaxed` ordering is enough since no parameter depends on
//! another; a block that races a write simply picks up the new value one
//! block later.

use std::sync::atomic::{AtomicU32, AtomicU8, Ordering};

use crate::{config::SynthConfig, dsp::oscillator::OscillatorShape};

/// Upper bound for the distortion drive.
pub const MAX_DRIVE: f32 = 64.0;

/// Output and oscillator parameters, usually held in an `Arc`.
#[derive(Debug)]
pub struct SynthParams {
    output_volume: AtomicU32,
    output_gain: AtomicU32,
    drive: AtomicU32,
    shape: AtomicU8,
}

/// Plain copy of [`SynthParams`] taken once per block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamSnapshot {
    pub output_volume: f32,
    pub output_gain: f32,
    pub drive: f32,
    pub shape: OscillatorShape,
}

impl Default for SynthParams {
    fn default() -> Self {
        Self::from_config(&SynthConfig::default())
    }
}

impl SynthParams {
    pub fn from_config(config: &SynthConfig) -> Self {
        let params = Self {
            output_volume: AtomicU32::new(0.0f32.to_bits()),
            output_gain: AtomicU32::new(1.0f32.to_bits()),
            drive: AtomicU32::new(1.0f32.to_bits()),
            shape: AtomicU8::new(config.shape.to_u8()),
        };
        params.set_output_volume(config.output_volume);
        params.set_output_gain(config.output_gain);
        params.set_drive(config.drive);
        params
    }

    /// Master volume, clamped to [0, 1]. NaN is ignored.
    pub fn set_output_volume(&self, volume: f32) {
        store_clamped(&self.output_volume, volume, 0.0, 1.0);
    }

    /// Post-mix gain, clamped to [0, 1]. NaN is ignored.
    pub fn set_output_gain(&self, gain: f32) {
        store_clamped(&self.output_gain, gain, 0.0, 1.0);
    }

    /// Distortion drive, clamped to [0, MAX_DRIVE]. NaN is ignored.
    pub fn set_drive(&self, drive: f32) {
        store_clamped(&self.drive, drive, 0.0, MAX_DRIVE);
    }

    pub fn set_shape(&self, shape: OscillatorShape) {
        self.shape.store(shape.to_u8(), Ordering::Relaxed);
    }

    pub fn output_volume(&self) -> f32 {
        load_f32(&self.output_volume)
    }

    pub fn output_gain(&self) -> f32 {
        load_f32(&self.output_gain)
    }

    pub fn drive(&self) -> f32 {
        load_f32(&self.drive)
    }

    pub fn shape(&self) -> OscillatorShape {
        OscillatorShape::from_u8(self.shape.load(Ordering::Relaxed))
    }

    pub fn snapshot(&self) -> ParamSnapshot {
        ParamSnapshot {
            output_volume: self.output_volume(),
            output_gain: self.output_gain(),
            drive: self.drive(),
            shape: self.shape(),
        }
    }
}

#[inline]
fn load_f32(cell: &AtomicU32) -> f32 {
    f32::from_bits(cell.load(Ordering::Relaxed))
}

fn store_clamped(cell: &AtomicU32, value: f32, min: f32, max: f32) {
    if value.is_nan() {
        return;
    }
    cell.store(value.clamp(min, max).to_bits(), Ordering::Relaxed);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{sync::Arc, thread};

    #[test]
    fn defaults_follow_config() {
        let config = SynthConfig::default();
        let params = SynthParams::default();
        assert_eq!(params.output_volume(), config.output_volume);
        assert_eq!(params.output_gain(), config.output_gain);
        assert_eq!(params.drive(), config.drive);
        assert_eq!(params.shape(), config.shape);
    }

    #[test]
    fn setters_clamp_and_ignore_nan() {
        let params = SynthParams::default();
        params.set_output_volume(1.7);
        assert_eq!(params.output_volume(), 1.0);
        params.set_output_gain(-0.2);
        assert_eq!(params.output_gain(), 0.0);
        params.set_drive(1_000.0);
        assert_eq!(params.drive(), MAX_DRIVE);

        params.set_output_volume(0.3);
        params.set_output_volume(f32::NAN);
        assert_eq!(params.output_volume(), 0.3);
    }

    #[test]
    fn writes_from_another_thread_are_visible() {
        let params = Arc::new(SynthParams::default());
        let writer = Arc::clone(&params);
        thread::spawn(move || {
            writer.set_shape(OscillatorShape::Distortion);
            writer.set_drive(2.0);
        })
        .join()
        .unwrap();

        let snapshot = params.snapshot();
        assert_eq!(snapshot.shape, OscillatorShape::Distortion);
        assert_eq!(snapshot.drive, 2.0);
    }
}
