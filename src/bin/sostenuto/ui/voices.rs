//! Voice strip widget - one cell per piano key, height from envelope level,
//! color from envelope state

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use sostenuto::dsp::EnvelopeState;

use super::state::VoiceSnapshot;

/// A0 to C8, the 88 keys of a piano.
const LOWEST_KEY: usize = 21;
const HIGHEST_KEY: usize = 108;

const LEVEL_GLYPHS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

fn state_color(state: EnvelopeState) -> Color {
    match state {
        EnvelopeState::Idle => Color::DarkGray,
        EnvelopeState::On => Color::Green,
        EnvelopeState::Off => Color::Red,
        EnvelopeState::Pedal => Color::Cyan,
        EnvelopeState::PedalOff => Color::Magenta,
    }
}

fn glyph(level: f32) -> char {
    if level <= 0.0 {
        return '·';
    }
    let index = (level.clamp(0.0, 1.0) * (LEVEL_GLYPHS.len() - 1) as f32).round() as usize;
    LEVEL_GLYPHS[index]
}

/// Render the voice strip
pub fn render_voices(frame: &mut Frame, area: Rect, voices: &VoiceSnapshot) {
    let block = Block::default()
        .title(" Voices (on / off / pedal / pedal-off) ")
        .borders(Borders::ALL);

    let spans: Vec<Span> = (LOWEST_KEY..=HIGHEST_KEY)
        .map(|note| {
            let state = voices.states[note];
            Span::styled(
                glyph(voices.levels[note]).to_string(),
                Style::default().fg(state_color(state)),
            )
        })
        .collect();

    let paragraph = Paragraph::new(Line::from(spans))
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}
