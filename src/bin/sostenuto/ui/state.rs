//! Voice table snapshots sent from the audio thread to the UI.
//!
//! Captured once per audio callback, so capture is allocation-free and the
//! snapshot is `Copy`.

use sostenuto::{
    dsp::EnvelopeState,
    synth::{
        message::{MessageReceiver, SynthMessage},
        poly::PolySynth,
    },
    NUM_NOTES,
};

#[derive(Clone, Copy, Debug)]
pub struct VoiceSnapshot {
    /// Envelope state per note
    pub states: [EnvelopeState; NUM_NOTES],
    /// Envelope level per note, after velocity (0.0 - 1.0)
    pub levels: [f32; NUM_NOTES],
    pub pedal_down: bool,
    pub active: usize,
}

impl Default for VoiceSnapshot {
    fn default() -> Self {
        Self {
            states: [EnvelopeState::Idle; NUM_NOTES],
            levels: [0.0; NUM_NOTES],
            pedal_down: false,
            active: 0,
        }
    }
}

impl VoiceSnapshot {
    pub fn capture<R: MessageReceiver>(synth: &PolySynth<R>) -> Self {
        let mut snapshot = Self {
            pedal_down: synth.sustain_pedal_down(),
            ..Self::default()
        };
        for (note, voice) in synth.voices().iter().enumerate() {
            snapshot.states[note] = voice.state();
            snapshot.levels[note] = voice.level() * voice.velocity();
            if voice.is_active() {
                snapshot.active += 1;
            }
        }
        snapshot
    }

    /// Pedal message that flips the engine's current pedal, whatever set it
    /// last (the keyboard or a MIDI sustain controller).
    pub fn pedal_toggle(&self) -> SynthMessage {
        SynthMessage::SustainPedal(!self.pedal_down)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sostenuto::SynthConfig;

    #[test]
    fn pedal_toggle_follows_engine_state() {
        let mut synth = PolySynth::standalone(1_000.0, SynthConfig::default()).unwrap();
        let up = VoiceSnapshot::capture(&synth);
        assert_eq!(up.pedal_toggle(), SynthMessage::SustainPedal(true));

        // Pedal pressed from MIDI, not the keyboard
        synth.handle_message(SynthMessage::SustainPedal(true));
        let down = VoiceSnapshot::capture(&synth);
        assert_eq!(down.pedal_toggle(), SynthMessage::SustainPedal(false));
    }

    #[test]
    fn capture_counts_active_voices() {
        let mut synth = PolySynth::standalone(1_000.0, SynthConfig::default()).unwrap();
        synth.handle_message(SynthMessage::NoteOn {
            note: 60,
            velocity: 1.0,
        });
        let snapshot = VoiceSnapshot::capture(&synth);
        assert_eq!(snapshot.active, 1);
        assert_eq!(snapshot.states[60], EnvelopeState::On);
    }
}
