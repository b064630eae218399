#[cfg(feature = "rtrb")]
use rtrb::Consumer;

use crate::dsp::envelope::EnvelopeConfig;

/// Events delivered to the engine by the MIDI layer or the UI.
///
/// All variants are `Copy` so they can travel through a realtime ring buffer
/// without allocating.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum SynthMessage {
    /// Key down. `velocity` is normalized to 0.0 - 1.0.
    NoteOn { note: u8, velocity: f32 },
    /// Key up.
    NoteOff { note: u8 },
    /// Sustain pedal down (`true`) or up (`false`).
    SustainPedal(bool),
    /// Release every sounding note, ignoring the pedal.
    AllNotesOff,
    /// Silence every voice immediately.
    AllSoundOff,
    /// Replace the envelope timings.
    SetEnvelope(EnvelopeConfig),
}

pub trait MessageReceiver {
    fn pop(&mut self) -> Option<SynthMessage>;
}

#[cfg(feature = "rtrb")]
impl MessageReceiver for Consumer<SynthMessage> {
    fn pop(&mut self) -> Option<SynthMessage> {
        Consumer::pop(self).ok()
    }
}

/// Receiver that never yields anything, for engines driven directly through
/// [`PolySynth::handle_message`](crate::synth::poly::PolySynth::handle_message).
#[derive(Debug, Default, Clone, Copy)]
pub struct NoMessages;

impl MessageReceiver for NoMessages {
    fn pop(&mut self) -> Option<SynthMessage> {
        None
    }
}
