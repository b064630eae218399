//! Real-world scenario benchmarks.
//!
//! These benchmarks model how a player actually loads the engine: a few held
//! notes, a pedal-sustained wash, and the worst case of every key at once.

mod voices;

pub use voices::bench_voices;
