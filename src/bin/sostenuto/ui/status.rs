//! Status bar widget - shows output parameters, pedal, voices, and audio stats

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use sostenuto::synth::params::ParamSnapshot;

use super::state::VoiceSnapshot;

/// Audio statistics for display
pub struct AudioStats {
    pub peak: f32,
    pub rms: f32,
}

impl AudioStats {
    /// Compute audio stats from a buffer
    pub fn from_buffer(buffer: &[f32]) -> Self {
        if buffer.is_empty() {
            return Self { peak: 0.0, rms: 0.0 };
        }
        let peak = buffer.iter().fold(0.0f32, |acc, &x| acc.max(x.abs()));
        let rms = (buffer.iter().map(|&x| x * x).sum::<f32>() / buffer.len() as f32).sqrt();
        Self { peak, rms }
    }
}

/// Render the status bar
pub fn render_status(
    frame: &mut Frame,
    area: Rect,
    sample_rate: f32,
    params: &ParamSnapshot,
    voices: &VoiceSnapshot,
    audio_stats: &AudioStats,
) {
    let block = Block::default().title(" sostenuto ").borders(Borders::ALL);

    let (pedal, pedal_color) = if voices.pedal_down {
        ("Pedal DOWN", Color::Green)
    } else {
        ("Pedal up", Color::DarkGray)
    };

    let line = Line::from(vec![
        Span::styled(
            format!(" Vol: {:.2}  Gain: {:.2}  ", params.output_volume, params.output_gain),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(
            format!("{} (drive {:.1})  ", params.shape.name(), params.drive),
            Style::default().fg(Color::White),
        ),
        Span::styled(format!("{pedal}  "), Style::default().fg(pedal_color)),
        Span::styled(
            format!("Voices: {:>3}  ", voices.active),
            Style::default().fg(Color::Yellow),
        ),
        Span::styled(
            format!("{:.1}kHz  ", sample_rate / 1000.0),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            format!("Peak: {:.2}  RMS: {:.2}", audio_stats.peak, audio_stats.rms),
            Style::default().fg(Color::Magenta),
        ),
    ]);

    let paragraph = Paragraph::new(line).block(block);
    frame.render_widget(paragraph, area);
}
