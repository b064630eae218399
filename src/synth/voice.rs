use crate::dsp::envelope::{Envelope, EnvelopeState};

/// Persistent state of the voice for one MIDI note.
///
/// Voices are never allocated or freed: the engine owns one per note number
/// and they cycle through [`EnvelopeState`] for the engine's whole lifetime.
/// Every transition writes the state and zeroes the timer together.
#[derive(Debug, Clone, Copy)]
pub struct Voice {
    phase: f64,           // radians, accumulated without wrapping
    velocity: f32,        // 0.0 - 1.0, captured at note-on
    state: EnvelopeState, // current segment
    timer: u32,           // samples since the last transition
    start_level: f32,     // envelope value at the last transition
    pedal_hold: u32,      // timer value when Pedal became PedalOff
    level: f32,           // envelope value of the last rendered sample
}

impl Default for Voice {
    fn default() -> Self {
        Self::new()
    }
}

impl Voice {
    pub const fn new() -> Self {
        Self {
            phase: 0.0,
            velocity: 0.0,
            state: EnvelopeState::Idle,
            timer: 0,
            start_level: 0.0,
            pedal_hold: 0,
            level: 0.0,
        }
    }

    /// Envelope value this voice would produce on its next sample.
    #[inline]
    pub fn current_level(&self, envelope: &Envelope) -> f32 {
        envelope
            .level(self.state, self.timer, self.start_level, self.pedal_hold)
            .unwrap_or(0.0)
    }

    /// Key down. Phase is kept so a retriggered note stays continuous.
    pub fn note_on(&mut self, velocity: f32, envelope: &Envelope) {
        self.start_level = self.current_level(envelope);
        self.velocity = velocity;
        self.enter(EnvelopeState::On);
    }

    /// Key up. Only a held voice reacts; it rings on in Pedal while the
    /// sustain pedal is down.
    pub fn note_off(&mut self, pedal_down: bool, envelope: &Envelope) {
        if self.state != EnvelopeState::On {
            return;
        }

        self.start_level = self.current_level(envelope);
        if pedal_down {
            self.enter(EnvelopeState::Pedal);
        } else {
            self.enter(EnvelopeState::Off);
        }
    }

    /// Sustain pedal lifted: a ringing Pedal voice starts its release.
    pub fn pedal_up(&mut self) {
        if self.state == EnvelopeState::Pedal {
            self.pedal_hold = self.timer;
            self.enter(EnvelopeState::PedalOff);
        }
    }

    /// Release a held or pedal-sustained voice as if the key and pedal were
    /// both up.
    pub fn release(&mut self, envelope: &Envelope) {
        if matches!(self.state, EnvelopeState::On | EnvelopeState::Pedal) {
            self.start_level = self.current_level(envelope);
            self.enter(EnvelopeState::Off);
        }
    }

    /// Drop straight to Idle: silent, phase pinned to 0.
    pub fn silence(&mut self) {
        self.phase = 0.0;
        self.start_level = 0.0;
        self.pedal_hold = 0;
        self.level = 0.0;
        self.enter(EnvelopeState::Idle);
    }

    /// Render one sample's envelope step: returns the amplitude multiplier
    /// for this sample (velocity included) and advances phase and timer, or
    /// returns `None` and goes Idle once the voice has finished.
    #[inline]
    pub fn tick(&mut self, envelope: &Envelope, increment: f64) -> Option<(f64, f32)> {
        match envelope.level(self.state, self.timer, self.start_level, self.pedal_hold) {
            Some(level) => {
                let phase = self.phase;
                self.level = level;
                self.phase += increment;
                self.timer = self.timer.saturating_add(1);
                Some((phase, level * self.velocity))
            }
            None => {
                if self.state != EnvelopeState::Idle {
                    self.silence();
                }
                None
            }
        }
    }

    fn enter(&mut self, state: EnvelopeState) {
        self.state = state;
        self.timer = 0;
    }

    pub fn state(&self) -> EnvelopeState {
        self.state
    }

    pub fn phase(&self) -> f64 {
        self.phase
    }

    pub fn timer(&self) -> u32 {
        self.timer
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    /// Envelope value of the most recently rendered sample (0.0 - 1.0).
    pub fn level(&self) -> f32 {
        self.level
    }

    pub fn is_active(&self) -> bool {
        self.state != EnvelopeState::Idle
    }
}
