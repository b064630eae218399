#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Result, SynthError};

/*
Piano-Style Envelope With Sustain Pedal
=======================================

This module computes the amplitude multiplier of one voice from where it is in
its lifecycle. Unlike an incremental envelope that nudges a level every
sample, the level here is a pure function of (state, timer): the renderer can
evaluate it at any sample without history, and every transition snapshots
just enough to keep the curve continuous.

Vocabulary
----------

  state        Which segment the voice is in: Idle, On, Off, Pedal, PedalOff.

  timer        Samples elapsed since the voice entered its state. Reset to 0
               on every transition.

  start level  The envelope value at the instant of the last transition.
               Attack ramps up from it, release and pedal decay fall
               from it.

  pedal hold   How long (in samples) a voice sat in Pedal before the pedal
               came up. Fixes the level PedalOff fades from.

  S            Sustain level, the floor a held key settles on (0.0 - 1.0).

  A H D R P    Attack, hold, decay, release and pedal window lengths in
               samples.


The Shape
---------

  Level
    1.0 ┐   ┌──┐
        │  ╱    ╲
    S   │ ╱      ╲________          (On)
        │╱                ╲
    0.0 └──────────────────╲──→ Time
         A   H   D    S     R      (Off after key up)

  Key up while the pedal is down does not fade linearly. The note rings on a
  square-root decay from the level it had at key up (S once the decay has
  finished). It falls fast at first and then lingers, like a damper lifted
  off a string:

    S   ┐╲
        │ ╲_
        │   ‾‾──___                 (Pedal)
    0.0 └──────────‾‾‾──→ P

  Pedal up on a ringing note applies a normal release fade on top of
  whatever the pedal decay had reached:

    level = start * (1 - sqrt(hold / P)) * (1 - t / R)   (PedalOff)


The State Machine
-----------------

    ┌──────┐  note_on   ┌────┐  note_off, pedal up    ┌─────┐
    │ Idle │ ─────────→ │ On │ ─────────────────────→ │ Off │
    └──────┘            └────┘                        └─────┘
       ↑                  │  note_off, pedal down        │
       │                  ↓                              │
       │              ┌───────┐  pedal up  ┌──────────┐  │
       │              │ Pedal │ ─────────→ │ PedalOff │  │
       │              └───────┘            └──────────┘  │
       │                  │                     │        │
       └──────────────────┴─────────────────────┴────────┘
                        window elapsed

Any state goes back to On on note_on. On never times out: a held key sounds
at S until it is released.


Zero-Length Windows
-------------------

A window of zero samples is skipped outright: attack jumps straight to 1,
decay straight to S, release and pedal straight to silence. Each ratio below
is only computed while `timer < window`, so the divisor is never zero.
*/

/// Lifecycle state of one voice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnvelopeState {
    #[default]
    Idle, // Silent, phase pinned to 0
    On,       // Key held: attack, hold, decay, then sustain forever
    Off,      // Key released, pedal up: linear release
    Pedal,    // Key released while the pedal is down: sqrt decay
    PedalOff, // Pedal lifted on a Pedal voice: release on top of the pedal decay
}

/// Envelope timings in seconds, as a user or preset describes them.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnvelopeConfig {
    pub attack: f32,
    pub hold: f32,
    pub decay: f32,
    pub sustain: f32,
    pub release: f32,
    pub pedal: f32,
}

impl Default for EnvelopeConfig {
    fn default() -> Self {
        Self {
            attack: 0.005,
            hold: 0.02,
            decay: 0.8,
            sustain: 0.4,
            release: 0.15,
            pedal: 6.0,
        }
    }
}

impl EnvelopeConfig {
    /// Check that every time is finite and non-negative and the sustain
    /// level lies in [0, 1].
    pub fn validate(&self) -> Result<()> {
        let times = [
            ("attack", self.attack),
            ("hold", self.hold),
            ("decay", self.decay),
            ("release", self.release),
            ("pedal", self.pedal),
        ];
        for (param, value) in times {
            if !value.is_finite() || value < 0.0 {
                return Err(SynthError::invalid(
                    param,
                    value,
                    "must be a finite, non-negative time in seconds",
                ));
            }
        }

        if !(0.0..=1.0).contains(&self.sustain) {
            return Err(SynthError::invalid(
                "sustain",
                self.sustain,
                "must lie between 0.0 and 1.0",
            ));
        }

        Ok(())
    }

    /// Convert to sample counts at `sample_rate`.
    ///
    /// Callers validate first; the conversion itself saturates instead of
    /// failing.
    pub fn to_samples(&self, sample_rate: f32) -> Envelope {
        let samples = |seconds: f32| (seconds * sample_rate).round().max(0.0) as u32;

        Envelope {
            attack: samples(self.attack),
            hold: samples(self.hold),
            decay: samples(self.decay),
            sustain: self.sustain.clamp(0.0, 1.0),
            release: samples(self.release),
            pedal: samples(self.pedal),
        }
    }
}

/// Envelope windows in samples, ready for the renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Envelope {
    pub attack: u32,
    pub hold: u32,
    pub decay: u32,
    pub sustain: f32,
    pub release: u32,
    pub pedal: u32,
}

impl Envelope {
    /// Amplitude multiplier for a voice, or `None` once the voice has nothing
    /// left to play (Idle, or its window has elapsed).
    ///
    /// `pedal_hold` is only read in PedalOff.
    #[inline]
    pub fn level(
        &self,
        state: EnvelopeState,
        timer: u32,
        start_level: f32,
        pedal_hold: u32,
    ) -> Option<f32> {
        match state {
            EnvelopeState::Idle => None,
            EnvelopeState::On => Some(self.held_level(timer, start_level)),
            EnvelopeState::Off => {
                (timer < self.release).then(|| start_level * self.release_fade(timer))
            }
            EnvelopeState::Pedal => {
                (timer < self.pedal).then(|| start_level * self.pedal_decay(timer))
            }
            EnvelopeState::PedalOff => {
                if timer >= self.release {
                    return None;
                }
                let from = if pedal_hold < self.pedal {
                    start_level * self.pedal_decay(pedal_hold)
                } else {
                    0.0
                };
                (from > 0.0).then(|| from * self.release_fade(timer))
            }
        }
    }

    /// Attack, hold, decay, then sustain for a key that is still down.
    fn held_level(&self, timer: u32, start_level: f32) -> f32 {
        if timer < self.attack {
            let progress = timer as f32 / self.attack as f32;
            return start_level + (1.0 - start_level) * progress;
        }

        let t = timer - self.attack;
        if t < self.hold {
            return 1.0;
        }

        let t = t - self.hold;
        if t < self.decay {
            let progress = t as f32 / self.decay as f32;
            return 1.0 + (self.sustain - 1.0) * progress;
        }

        self.sustain
    }

    /// 1 - sqrt(t / P), only called while t < P.
    fn pedal_decay(&self, timer: u32) -> f32 {
        let progress = timer as f32 / self.pedal as f32;
        1.0 - progress.sqrt()
    }

    /// 1 - t / R, only called while t < R.
    fn release_fade(&self, timer: u32) -> f32 {
        1.0 - timer as f32 / self.release as f32
    }

    /// Samples from note-on until the sustain level is reached.
    pub fn sustain_onset(&self) -> u32 {
        self.attack
            .saturating_add(self.hold)
            .saturating_add(self.decay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RATE: f32 = 1_000.0;

    fn envelope() -> Envelope {
        EnvelopeConfig {
            attack: 0.01,
            hold: 0.005,
            decay: 0.02,
            sustain: 0.5,
            release: 0.04,
            pedal: 0.1,
        }
        .to_samples(SAMPLE_RATE)
    }

    #[test]
    fn seconds_convert_to_samples() {
        let env = envelope();
        assert_eq!(env.attack, 10);
        assert_eq!(env.hold, 5);
        assert_eq!(env.decay, 20);
        assert_eq!(env.release, 40);
        assert_eq!(env.pedal, 100);
        assert_eq!(env.sustain_onset(), 35);
    }

    #[test]
    fn attack_ramps_from_start_level() {
        let env = envelope();
        assert_eq!(env.level(EnvelopeState::On, 0, 0.0, 0), Some(0.0));
        assert_eq!(env.level(EnvelopeState::On, 5, 0.0, 0), Some(0.5));
        let from_retrigger = env.level(EnvelopeState::On, 5, 0.4, 0).unwrap();
        assert!((from_retrigger - 0.7).abs() < 1e-6);
        assert_eq!(env.level(EnvelopeState::On, 10, 0.0, 0), Some(1.0));
    }

    #[test]
    fn hold_then_decay_to_sustain() {
        let env = envelope();
        assert_eq!(env.level(EnvelopeState::On, 14, 0.0, 0), Some(1.0));
        let mid_decay = env.level(EnvelopeState::On, 25, 0.0, 0).unwrap();
        assert!((mid_decay - 0.75).abs() < 1e-6);
        assert_eq!(env.level(EnvelopeState::On, 35, 0.0, 0), Some(0.5));
        assert_eq!(env.level(EnvelopeState::On, 1_000_000, 0.0, 0), Some(0.5));
    }

    #[test]
    fn release_fades_from_start_level() {
        let env = envelope();
        assert_eq!(env.level(EnvelopeState::Off, 0, 0.5, 0), Some(0.5));
        assert_eq!(env.level(EnvelopeState::Off, 20, 0.5, 0), Some(0.25));
        assert_eq!(env.level(EnvelopeState::Off, 40, 0.5, 0), None);
    }

    #[test]
    fn pedal_follows_square_root_law() {
        let env = envelope();
        assert_eq!(env.level(EnvelopeState::Pedal, 0, 0.5, 0), Some(0.5));
        let level = env.level(EnvelopeState::Pedal, 50, 0.5, 0).unwrap();
        let expected = 0.5 * (1.0 - 0.5f32.sqrt());
        assert!((level - expected).abs() < 1e-6);
        assert_eq!(env.level(EnvelopeState::Pedal, 100, 0.5, 0), None);
    }

    #[test]
    fn pedal_decays_from_level_at_key_up() {
        let env = envelope();
        // Key up mid-attack
        assert_eq!(env.level(EnvelopeState::Pedal, 0, 0.1, 0), Some(0.1));
        let quarter = env.level(EnvelopeState::Pedal, 25, 0.8, 0).unwrap();
        assert!((quarter - 0.4).abs() < 1e-6);
    }

    #[test]
    fn pedal_off_continues_from_pedal_level() {
        let env = envelope();
        let at_lift = env.level(EnvelopeState::Pedal, 25, 0.5, 0).unwrap();
        let after_lift = env.level(EnvelopeState::PedalOff, 0, 0.5, 25).unwrap();
        assert_eq!(at_lift, after_lift);

        let halfway = env.level(EnvelopeState::PedalOff, 20, 0.5, 25).unwrap();
        assert!((halfway - at_lift * 0.5).abs() < 1e-6);
        assert_eq!(env.level(EnvelopeState::PedalOff, 40, 0.5, 25), None);
    }

    #[test]
    fn pedal_off_after_full_decay_is_silent() {
        let env = envelope();
        assert_eq!(env.level(EnvelopeState::PedalOff, 0, 0.5, 100), None);
        assert_eq!(env.level(EnvelopeState::PedalOff, 0, 0.5, 5_000), None);
        // Released under the pedal before any sound
        assert_eq!(env.level(EnvelopeState::PedalOff, 0, 0.0, 10), None);
    }

    #[test]
    fn idle_is_inactive() {
        assert_eq!(envelope().level(EnvelopeState::Idle, 0, 1.0, 0), None);
    }

    #[test]
    fn zero_windows_jump_to_endpoints() {
        let env = EnvelopeConfig {
            attack: 0.0,
            hold: 0.0,
            decay: 0.0,
            sustain: 0.3,
            release: 0.0,
            pedal: 0.0,
        }
        .to_samples(SAMPLE_RATE);

        assert_eq!(env.level(EnvelopeState::On, 0, 0.0, 0), Some(0.3));
        assert_eq!(env.level(EnvelopeState::Off, 0, 0.3, 0), None);
        assert_eq!(env.level(EnvelopeState::Pedal, 0, 0.3, 0), None);
        assert_eq!(env.level(EnvelopeState::PedalOff, 0, 0.3, 0), None);
    }

    #[test]
    fn zero_attack_with_hold_starts_at_peak() {
        let env = EnvelopeConfig {
            attack: 0.0,
            hold: 0.01,
            ..EnvelopeConfig::default()
        }
        .to_samples(SAMPLE_RATE);
        assert_eq!(env.level(EnvelopeState::On, 0, 0.0, 0), Some(1.0));
    }

    #[test]
    fn validation_rejects_bad_values() {
        let ok = EnvelopeConfig::default();
        assert!(ok.validate().is_ok());

        let negative = EnvelopeConfig {
            release: -0.1,
            ..ok
        };
        assert!(negative.validate().is_err());

        let nan = EnvelopeConfig {
            attack: f32::NAN,
            ..ok
        };
        assert!(nan.validate().is_err());

        let loud = EnvelopeConfig {
            sustain: 1.5,
            ..ok
        };
        assert!(matches!(
            loud.validate(),
            Err(SynthError::InvalidConfiguration {
                param: "sustain",
                ..
            })
        ));
    }
}
