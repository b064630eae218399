/// A decoded channel-voice MIDI message.
///
/// Channels are 0-based (0 - 15). System messages are not represented; the
/// parser returns `None` for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MidiEvent {
    NoteOn { channel: u8, key: u8, velocity: u8 },
    NoteOff { channel: u8, key: u8, velocity: u8 },
    ControlChange { channel: u8, controller: u8, value: u8 },
    PitchBend { channel: u8, value: i16 },
    ProgramChange { channel: u8, program: u8 },
}

impl MidiEvent {
    /// Decode one message as delivered by a MIDI input callback.
    ///
    /// Returns `None` for truncated messages, data bytes with the high bit
    /// set, and message kinds the engine has no use for (aftertouch, system
    /// messages). A note-on with velocity 0 decodes as a note-off.
    pub fn parse(bytes: &[u8]) -> Option<Self> {
        let (&status, data) = bytes.split_first()?;
        if status < 0x80 || data.iter().any(|&b| b >= 0x80) {
            return None;
        }

        let channel = status & 0x0F;
        let kind = status & 0xF0;

        let event = match (kind, data) {
            (0x80, &[key, velocity, ..]) => MidiEvent::NoteOff {
                channel,
                key,
                velocity,
            },
            (0x90, &[key, 0, ..]) => MidiEvent::NoteOff {
                channel,
                key,
                velocity: 0,
            },
            (0x90, &[key, velocity, ..]) => MidiEvent::NoteOn {
                channel,
                key,
                velocity,
            },
            (0xB0, &[controller, value, ..]) => MidiEvent::ControlChange {
                channel,
                controller,
                value,
            },
            (0xC0, &[program, ..]) => MidiEvent::ProgramChange { channel, program },
            (0xE0, &[lsb, msb, ..]) => MidiEvent::PitchBend {
                channel,
                value: (((msb as i16) << 7) | lsb as i16) - 8192,
            },
            _ => return None,
        };

        Some(event)
    }

    pub fn channel(&self) -> u8 {
        match *self {
            MidiEvent::NoteOn { channel, .. }
            | MidiEvent::NoteOff { channel, .. }
            | MidiEvent::ControlChange { channel, .. }
            | MidiEvent::PitchBend { channel, .. }
            | MidiEvent::ProgramChange { channel, .. } => channel,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_notes() {
        assert_eq!(
            MidiEvent::parse(&[0x90, 60, 100]),
            Some(MidiEvent::NoteOn {
                channel: 0,
                key: 60,
                velocity: 100
            })
        );
        assert_eq!(
            MidiEvent::parse(&[0x83, 61, 12]),
            Some(MidiEvent::NoteOff {
                channel: 3,
                key: 61,
                velocity: 12
            })
        );
    }

    #[test]
    fn zero_velocity_note_on_is_note_off() {
        assert_eq!(
            MidiEvent::parse(&[0x9F, 64, 0]),
            Some(MidiEvent::NoteOff {
                channel: 15,
                key: 64,
                velocity: 0
            })
        );
    }

    #[test]
    fn decodes_sustain_controller() {
        assert_eq!(
            MidiEvent::parse(&[0xB0, 64, 127]),
            Some(MidiEvent::ControlChange {
                channel: 0,
                controller: 64,
                value: 127
            })
        );
    }

    #[test]
    fn pitch_bend_is_centered() {
        assert_eq!(
            MidiEvent::parse(&[0xE0, 0x00, 0x40]),
            Some(MidiEvent::PitchBend {
                channel: 0,
                value: 0
            })
        );
        assert_eq!(
            MidiEvent::parse(&[0xE0, 0x7F, 0x7F]),
            Some(MidiEvent::PitchBend {
                channel: 0,
                value: 8191
            })
        );
    }

    #[test]
    fn rejects_malformed_bytes() {
        assert_eq!(MidiEvent::parse(&[]), None);
        assert_eq!(MidiEvent::parse(&[0x90, 60]), None);
        assert_eq!(MidiEvent::parse(&[60, 100]), None);
        assert_eq!(MidiEvent::parse(&[0x90, 0x80, 100]), None);
        assert_eq!(MidiEvent::parse(&[0xA0, 60, 20]), None);
        assert_eq!(MidiEvent::parse(&[0xF8]), None);
    }
}
