use std::sync::Arc;

use crate::{
    config::SynthConfig,
    dsp::{
        envelope::{Envelope, EnvelopeConfig},
        oscillator::OscillatorShape,
        tuning::PhaseTable,
    },
    error::Result,
    synth::{
        message::{MessageReceiver, NoMessages, SynthMessage},
        params::SynthParams,
        voice::Voice,
    },
    NUM_NOTES,
};

/// The voice engine: one voice per MIDI note, a shared sustain pedal, and a
/// mono mix duplicated to stereo.
///
/// `PolySynth` is owned by the audio thread. Events reach it through the
/// message receiver (drained at the start of every block) or directly via
/// [`handle_message`](Self::handle_message); output parameters are read from
/// the shared [`SynthParams`] once per block.
pub struct PolySynth<R: MessageReceiver = NoMessages> {
    voices: [Voice; NUM_NOTES],
    phase_table: PhaseTable,
    envelope_config: EnvelopeConfig,
    envelope: Envelope,
    pedal_down: bool,
    params: Arc<SynthParams>,
    rx: R,
    frame_counter: u64,
}

impl PolySynth<NoMessages> {
    /// Engine without a message queue, driven through `handle_message`.
    pub fn standalone(sample_rate: f32, config: SynthConfig) -> Result<Self> {
        Self::new(sample_rate, config, NoMessages)
    }
}

impl<R: MessageReceiver> PolySynth<R> {
    pub fn new(sample_rate: f32, config: SynthConfig, rx: R) -> Result<Self> {
        config.validate()?;
        let params = Arc::new(SynthParams::from_config(&config));
        Self::with_params(sample_rate, config.envelope, params, rx)
    }

    /// Engine reading its output parameters from an existing handle.
    pub fn with_params(
        sample_rate: f32,
        envelope: EnvelopeConfig,
        params: Arc<SynthParams>,
        rx: R,
    ) -> Result<Self> {
        envelope.validate()?;
        let phase_table = PhaseTable::new(sample_rate)?;

        Ok(Self {
            voices: [Voice::new(); NUM_NOTES],
            envelope: envelope.to_samples(sample_rate),
            envelope_config: envelope,
            phase_table,
            pedal_down: false,
            params,
            rx,
            frame_counter: 0,
        })
    }

    /// Apply one event to the voice table. Produces no audio.
    ///
    /// Notes above 127 are ignored.
    pub fn handle_message(&mut self, msg: SynthMessage) {
        match msg {
            SynthMessage::NoteOn { note, velocity } => {
                let velocity = if velocity.is_nan() {
                    0.0
                } else {
                    velocity.clamp(0.0, 1.0)
                };
                if let Some(voice) = self.voices.get_mut(note as usize) {
                    voice.note_on(velocity, &self.envelope);
                }
            }
            SynthMessage::NoteOff { note } => {
                let pedal_down = self.pedal_down;
                if let Some(voice) = self.voices.get_mut(note as usize) {
                    voice.note_off(pedal_down, &self.envelope);
                }
            }
            SynthMessage::SustainPedal(true) => {
                self.pedal_down = true;
            }
            SynthMessage::SustainPedal(false) => {
                self.pedal_down = false;
                for voice in &mut self.voices {
                    voice.pedal_up();
                }
            }
            SynthMessage::AllNotesOff => {
                for voice in &mut self.voices {
                    voice.release(&self.envelope);
                }
            }
            SynthMessage::AllSoundOff => {
                for voice in &mut self.voices {
                    voice.silence();
                }
            }
            SynthMessage::SetEnvelope(config) => {
                // Invalid configs are dropped; validate off the audio thread
                // to get the reason.
                if config.validate().is_ok() {
                    self.apply_envelope(config);
                }
            }
        }
    }

    /// Rebuild the phase table and envelope windows for a new rate.
    ///
    /// On error the engine keeps running at its previous rate.
    pub fn set_sample_rate(&mut self, sample_rate: f32) -> Result<()> {
        self.phase_table = PhaseTable::new(sample_rate)
            .inspect_err(|err| log::warn!("keeping previous sample rate: {err}"))?;
        self.envelope = self.envelope_config.to_samples(sample_rate);
        log::info!("sample rate set to {sample_rate} Hz");
        Ok(())
    }

    pub fn set_envelope(&mut self, config: EnvelopeConfig) -> Result<()> {
        config
            .validate()
            .inspect_err(|err| log::warn!("envelope rejected: {err}"))?;
        self.apply_envelope(config);
        log::debug!("envelope updated: {config:?}");
        Ok(())
    }

    fn apply_envelope(&mut self, config: EnvelopeConfig) {
        self.envelope_config = config;
        self.envelope = config.to_samples(self.phase_table.sample_rate());
    }

    fn drain_messages(&mut self) {
        while let Some(msg) = self.rx.pop() {
            self.handle_message(msg);
        }
    }

    /// Render into separate left/right buffers. Both channels receive the
    /// same mono mix; the shorter buffer sets the frame count.
    pub fn render_block(&mut self, left: &mut [f32], right: &mut [f32]) {
        let frames = left.len().min(right.len());
        self.render_with(frames, |frame, sample| {
            left[frame] = sample;
            right[frame] = sample;
        });
    }

    /// Render into an interleaved buffer with `channels` channels, writing
    /// the mono mix to every channel of each frame.
    pub fn render_interleaved(&mut self, out: &mut [f32], channels: usize) {
        if channels == 0 {
            return;
        }
        let frames = out.len() / channels;
        self.render_with(frames, |frame, sample| {
            let start = frame * channels;
            out[start..start + channels].fill(sample);
        });
    }

    /// Render `frames` stereo frames into a new buffer.
    ///
    /// Allocates; meant for offline rendering and tests, not the audio
    /// callback.
    pub fn render_frames(&mut self, frames: usize) -> Vec<[f32; 2]> {
        let mut out = vec![[0.0; 2]; frames];
        self.render_with(frames, |frame, sample| {
            out[frame] = [sample, sample];
        });
        out
    }

    fn render_with(&mut self, frames: usize, mut write: impl FnMut(usize, f32)) {
        if frames == 0 {
            return;
        }

        self.drain_messages();

        let params = self.params.snapshot();
        let master = params.output_volume * params.output_gain;

        for frame in 0..frames {
            let mixed = self.next_sample(params.shape, params.drive);
            write(frame, mixed * master);
        }

        self.frame_counter += frames as u64;
    }

    /// Sum every active voice for one sample and advance them.
    #[inline]
    fn next_sample(&mut self, shape: OscillatorShape, drive: f32) -> f32 {
        let mut mixed = 0.0;
        for (note, voice) in self.voices.iter_mut().enumerate() {
            if !voice.is_active() {
                continue;
            }
            let increment = self.phase_table.increment(note as u8);
            if let Some((phase, gain)) = voice.tick(&self.envelope, increment) {
                mixed += shape.sample(phase, drive) * gain;
            }
        }
        mixed
    }

    /// Shared parameter handle for the UI thread.
    pub fn params(&self) -> Arc<SynthParams> {
        Arc::clone(&self.params)
    }

    pub fn voice(&self, note: u8) -> Option<&Voice> {
        self.voices.get(note as usize)
    }

    pub fn voices(&self) -> &[Voice; NUM_NOTES] {
        &self.voices
    }

    pub fn active_voices(&self) -> usize {
        self.voices.iter().filter(|v| v.is_active()).count()
    }

    pub fn sustain_pedal_down(&self) -> bool {
        self.pedal_down
    }

    pub fn sample_rate(&self) -> f32 {
        self.phase_table.sample_rate()
    }

    pub fn phase_table(&self) -> &PhaseTable {
        &self.phase_table
    }

    pub fn envelope(&self) -> &Envelope {
        &self.envelope
    }

    pub fn envelope_config(&self) -> EnvelopeConfig {
        self.envelope_config
    }

    /// Frames rendered since construction.
    pub fn frame_counter(&self) -> u64 {
        self.frame_counter
    }
}
