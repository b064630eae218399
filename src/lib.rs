pub mod config; // Engine configuration
pub mod dsp;
pub mod error;
pub mod io;
pub mod synth; // Voice table, event handling, rendering

pub use config::SynthConfig;
pub use error::SynthError;

/// Number of MIDI notes, and so of voices.
pub const NUM_NOTES: usize = 128;
pub const MAX_BLOCK_SIZE: usize = 2048;
