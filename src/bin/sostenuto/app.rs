//! Device layer: audio output stream, MIDI inputs, and the queues between
//! them and the engine.

use std::sync::{Arc, Mutex};

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use midir::{Ignore, MidiInput, MidiInputConnection};
use rtrb::{Consumer, Producer, RingBuffer};

use sostenuto::{
    io::{converter::bytes_to_synth, ChannelFilter},
    synth::{message::SynthMessage, params::SynthParams, poly::PolySynth},
    SynthConfig, MAX_BLOCK_SIZE,
};

use super::ui::state::VoiceSnapshot;

/// Pending engine events. MIDI bursts (chords, controller sweeps) stay well
/// under this between two audio callbacks.
const EVENT_QUEUE_SIZE: usize = 1024;
/// Voice snapshots waiting for the UI; it only ever draws the newest.
const SNAPSHOT_QUEUE_SIZE: usize = 8;

/// Event producer shared by every MIDI connection and the UI. The audio
/// thread only holds the consumer, so it never contends for this lock.
pub type EventSender = Arc<Mutex<Producer<SynthMessage>>>;

/// Push an event to the engine, logging when the queue is full.
pub fn send(events: &EventSender, msg: SynthMessage) {
    match events.lock() {
        Ok(mut tx) => {
            if tx.push(msg).is_err() {
                log::warn!("event queue full, dropped {msg:?}");
            }
        }
        Err(_) => log::error!("event queue lock poisoned, dropped {msg:?}"),
    }
}

/// Everything the UI needs from a running engine.
pub struct Session {
    pub events: EventSender,
    pub params: Arc<SynthParams>,
    pub audio_rx: Consumer<f32>,
    pub voice_rx: Consumer<VoiceSnapshot>,
    pub sample_rate: f32,
    pub device_name: String,
    pub midi_ports: Vec<String>,
    _stream: cpal::Stream,
    _midi: Vec<MidiInputConnection<()>>,
}

impl Session {
    /// Open the default output device, start the engine on its callback, and
    /// connect all MIDI inputs.
    pub fn start(config: SynthConfig) -> EyreResult<Self> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| eyre!("no default output device available"))?;
        let device_name = device.name().unwrap_or_else(|_| "unknown".to_string());
        let stream_config = device
            .default_output_config()
            .wrap_err("failed to fetch default output config")?;

        let sample_rate = stream_config.sample_rate().0 as f32;
        let channels = stream_config.channels() as usize;
        log::info!("output device {device_name}: {sample_rate} Hz, {channels} channels");

        let (event_tx, event_rx) = RingBuffer::<SynthMessage>::new(EVENT_QUEUE_SIZE);
        // About a second of mono samples for the oscilloscope
        let (mut audio_tx, audio_rx) = RingBuffer::<f32>::new(sample_rate as usize);
        let (mut voice_tx, voice_rx) = RingBuffer::<VoiceSnapshot>::new(SNAPSHOT_QUEUE_SIZE);

        let mut synth = PolySynth::new(sample_rate, config, event_rx)
            .wrap_err("failed to build the voice engine")?;
        let params = synth.params();

        let stream = device.build_output_stream(
            &stream_config.into(),
            move |data: &mut [f32], _| {
                for chunk in data.chunks_mut(MAX_BLOCK_SIZE * channels) {
                    synth.render_interleaved(chunk, channels);

                    // The scope drops samples once it falls behind
                    for frame in chunk.chunks_exact(channels) {
                        if audio_tx.push(frame[0]).is_err() {
                            break;
                        }
                    }
                }
                // A full queue means the UI is behind; it catches up on the next one
                let _ = voice_tx.push(VoiceSnapshot::capture(&synth));
            },
            |err| log::error!("audio stream error: {err}"),
            None,
        )?;
        stream.play().wrap_err("failed to start the audio stream")?;

        let events: EventSender = Arc::new(Mutex::new(event_tx));
        let (midi, midi_ports) = connect_midi(&events);

        Ok(Self {
            events,
            params,
            audio_rx,
            voice_rx,
            sample_rate,
            device_name,
            midi_ports,
            _stream: stream,
            _midi: midi,
        })
    }
}

/// Connect to every MIDI input port, one `MidiInput` per port.
///
/// Failures are logged and skipped; the engine still plays from the
/// computer keyboard without MIDI.
fn connect_midi(events: &EventSender) -> (Vec<MidiInputConnection<()>>, Vec<String>) {
    let names = match MidiInput::new("sostenuto") {
        Ok(probe) => probe
            .ports()
            .iter()
            .map(|port| probe.port_name(port).unwrap_or_else(|_| "unnamed".to_string()))
            .collect::<Vec<_>>(),
        Err(err) => {
            log::warn!("MIDI unavailable: {err}");
            return (Vec::new(), Vec::new());
        }
    };

    let mut connections = Vec::new();
    let mut connected = Vec::new();

    for (source, name) in names.into_iter().enumerate() {
        let mut midi_in = match MidiInput::new("sostenuto") {
            Ok(midi_in) => midi_in,
            Err(err) => {
                log::warn!("MIDI source {source} ({name}): {err}");
                continue;
            }
        };
        midi_in.ignore(Ignore::All);

        let Some(port) = midi_in.ports().into_iter().nth(source) else {
            log::warn!("MIDI source {source} ({name}) disappeared");
            continue;
        };

        let tx = Arc::clone(events);
        let label = name.clone();
        let result = midi_in.connect(
            &port,
            "sostenuto-in",
            move |_stamp, bytes, _| {
                if let Some(msg) = bytes_to_synth(bytes, ChannelFilter::Omni) {
                    log::debug!("source {source} ({label}): {msg:?}");
                    send(&tx, msg);
                }
            },
            (),
        );

        match result {
            Ok(conn) => {
                log::info!("connected MIDI source {source}: {name}");
                connections.push(conn);
                connected.push(name);
            }
            Err(err) => log::warn!("MIDI source {source} ({name}): {err}"),
        }
    }

    (connections, connected)
}
