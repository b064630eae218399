// Purpose: Voice table, event handling, block rendering
// This layer sits above the DSP primitives and owns all per-voice state

pub mod message;
pub mod params;
pub mod poly;
pub mod voice;

pub use message::{MessageReceiver, SynthMessage};
pub use params::SynthParams;
pub use poly::PolySynth;
