//! TUI module for sostenuto
//!
//! A small control surface over the running engine: output parameters,
//! sustain pedal, latched test notes, and a view of the voice table.

pub mod state;
mod status;
mod voices;
mod waveform;

use color_eyre::eyre::Result as EyreResult;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::Paragraph,
    DefaultTerminal, Frame,
};
use sostenuto::synth::{message::SynthMessage, params::MAX_DRIVE};
use std::time::Duration;

use crate::app::{send, Session};
use state::VoiceSnapshot;
use status::{render_status, AudioStats};
use voices::render_voices;
use waveform::render_waveform;

/// Audio visualization buffer size
const VIS_BUFFER_SIZE: usize = 1024;

const VOLUME_STEP: f32 = 0.05;
const DRIVE_STEP: f32 = 0.5;
const LATCH_VELOCITY: f32 = 0.8;

/// Home row keys latching C4 to C5 on the white keys.
const LATCH_KEYS: [(char, u8); 8] = [
    ('a', 60),
    ('s', 62),
    ('d', 64),
    ('f', 65),
    ('g', 67),
    ('h', 69),
    ('j', 71),
    ('k', 72),
];

/// UI application state
pub struct UiApp {
    session: Session,
    /// Latest voice table snapshot
    voices: VoiceSnapshot,
    /// Audio sample buffer for visualization
    audio_buffer: Vec<f32>,
    /// Which `LATCH_KEYS` notes are held from the keyboard
    latched: [bool; LATCH_KEYS.len()],
    should_quit: bool,
}

impl UiApp {
    pub fn new(session: Session) -> Self {
        Self {
            session,
            voices: VoiceSnapshot::default(),
            audio_buffer: vec![0.0; VIS_BUFFER_SIZE],
            latched: [false; LATCH_KEYS.len()],
            should_quit: false,
        }
    }

    /// Run the UI event loop
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        log::info!(
            "playing on {} with {} MIDI input(s): {:?}",
            self.session.device_name,
            self.session.midi_ports.len(),
            self.session.midi_ports
        );

        while !self.should_quit {
            self.poll_audio();
            self.poll_voices();

            terminal.draw(|frame| self.render(frame))?;

            // Handle keyboard input (non-blocking, ~60fps)
            if event::poll(Duration::from_millis(16))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code);
                    }
                }
            }
        }

        send(&self.session.events, SynthMessage::AllSoundOff);
        Ok(())
    }

    /// Poll for new audio samples, keeping the last VIS_BUFFER_SIZE
    fn poll_audio(&mut self) {
        while let Ok(sample) = self.session.audio_rx.pop() {
            self.audio_buffer.push(sample);
        }
        if self.audio_buffer.len() > VIS_BUFFER_SIZE {
            let excess = self.audio_buffer.len() - VIS_BUFFER_SIZE;
            self.audio_buffer.drain(0..excess);
        }
    }

    /// Keep only the latest snapshot
    fn poll_voices(&mut self) {
        while let Ok(snapshot) = self.session.voice_rx.pop() {
            self.voices = snapshot;
        }
    }

    fn handle_key(&mut self, key: KeyCode) {
        let params = &self.session.params;
        match key {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Up => params.set_output_volume(params.output_volume() + VOLUME_STEP),
            KeyCode::Down => params.set_output_volume(params.output_volume() - VOLUME_STEP),
            KeyCode::Right => params.set_output_gain(params.output_gain() + VOLUME_STEP),
            KeyCode::Left => params.set_output_gain(params.output_gain() - VOLUME_STEP),
            KeyCode::Char(']') => params.set_drive((params.drive() + DRIVE_STEP).min(MAX_DRIVE)),
            KeyCode::Char('[') => params.set_drive(params.drive() - DRIVE_STEP),
            KeyCode::Tab => params.set_shape(params.shape().next()),
            KeyCode::Char(' ') => {
                send(&self.session.events, self.voices.pedal_toggle());
            }
            KeyCode::Char(c) => {
                if let Some(slot) = LATCH_KEYS.iter().position(|&(key, _)| key == c) {
                    self.toggle_latch(slot);
                }
            }
            _ => {}
        }
    }

    fn toggle_latch(&mut self, slot: usize) {
        let note = LATCH_KEYS[slot].1;
        let held = !self.latched[slot];
        self.latched[slot] = held;

        let msg = if held {
            SynthMessage::NoteOn {
                note,
                velocity: LATCH_VELOCITY,
            }
        } else {
            SynthMessage::NoteOff { note }
        };
        send(&self.session.events, msg);
    }

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        // Main layout: status, voices, waveform, help
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Status bar
                Constraint::Min(4),    // Voice strip
                Constraint::Length(8), // Waveform
                Constraint::Length(1), // Help bar
            ])
            .split(area);

        let stats = AudioStats::from_buffer(&self.audio_buffer);
        render_status(
            frame,
            chunks[0],
            self.session.sample_rate,
            &self.session.params.snapshot(),
            &self.voices,
            &stats,
        );
        render_voices(frame, chunks[1], &self.voices);
        render_waveform(frame, chunks[2], &self.audio_buffer);

        let help = Paragraph::new(
            " [Q] Quit  [Up/Down] Volume  [Left/Right] Gain  [ [ ] ] Drive  [Tab] Shape  [Space] Pedal  [A-K] Notes",
        )
        .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(help, chunks[3]);
    }
}
