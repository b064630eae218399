//! Hard-clip waveshaping
//!
//! The distortion oscillator shape is a sine pushed through a hard clipper.
//! The "drive" parameter sets how far the sine is amplified before it hits
//! the rails.
//!
//! # How It Sounds
//!
//!   output = clamp(input * drive, -threshold, threshold)
//!
//! With drive at or below 1.0 a full-scale sine never reaches the threshold
//! and passes through unchanged (only scaled). Above 1.0 the peaks are cut
//! flat and the wave drifts toward a square, gaining odd harmonics:
//!
//!   1.0  = Clean sine
//!   2-4  = Rounded square, obvious buzz
//!   10+  = Nearly square, harsh fuzz

/// Hard clipping - amplifies by `drive` then clamps at `threshold`.
///
/// Creates harsh, buzzy distortion rich in odd harmonics.
#[inline]
pub fn hard_clip(sample: f32, drive: f32, threshold: f32) -> f32 {
    let x = sample * drive;
    x.clamp(-threshold, threshold)
}
