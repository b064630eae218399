use crate::{io::midi::MidiEvent, synth::message::SynthMessage};

/// Sustain (damper) pedal controller.
pub const CC_SUSTAIN: u8 = 64;
/// Channel mode message: silence everything now.
pub const CC_ALL_SOUND_OFF: u8 = 120;
/// Channel mode message: release every held note.
pub const CC_ALL_NOTES_OFF: u8 = 123;

/// Which MIDI channels the engine listens to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChannelFilter {
    /// Every channel (the default, like a single-timbre keyboard).
    #[default]
    Omni,
    /// A single 0-based channel.
    Channel(u8),
}

impl ChannelFilter {
    pub fn accepts(self, channel: u8) -> bool {
        match self {
            ChannelFilter::Omni => true,
            ChannelFilter::Channel(c) => c == channel,
        }
    }
}

/// Translate a decoded MIDI event into an engine message.
///
/// Returns `None` for events on filtered channels and kinds the engine
/// ignores (pitch bend, program change, unmapped controllers).
pub fn midi_to_synth(midi: MidiEvent, filter: ChannelFilter) -> Option<SynthMessage> {
    if !filter.accepts(midi.channel()) {
        return None;
    }

    match midi {
        MidiEvent::NoteOn { key, velocity, .. } => Some(SynthMessage::NoteOn {
            note: key,
            velocity: velocity as f32 / 127.0,
        }),
        MidiEvent::NoteOff { key, .. } => Some(SynthMessage::NoteOff { note: key }),
        MidiEvent::ControlChange {
            controller, value, ..
        } => match controller {
            CC_SUSTAIN => Some(SynthMessage::SustainPedal(value >= 64)),
            CC_ALL_SOUND_OFF => Some(SynthMessage::AllSoundOff),
            CC_ALL_NOTES_OFF => Some(SynthMessage::AllNotesOff),
            _ => None,
        },
        _ => None,
    }
}

/// Decode raw bytes and translate in one step.
pub fn bytes_to_synth(bytes: &[u8], filter: ChannelFilter) -> Option<SynthMessage> {
    MidiEvent::parse(bytes).and_then(|event| midi_to_synth(event, filter))
}
