//! Error types for engine configuration.

use thiserror::Error;

/// Errors raised when the engine is configured with values it cannot use.
///
/// Nothing on the audio path returns an error: events that cannot be applied
/// (out-of-range notes, malformed MIDI) are dropped instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SynthError {
    /// A configuration value is outside the range the engine accepts.
    #[error("invalid configuration for '{param}' ({value}): {reason}")]
    InvalidConfiguration {
        /// Name of the rejected parameter.
        param: &'static str,
        /// The rejected value.
        value: f32,
        /// Why the value was rejected.
        reason: &'static str,
    },
}

impl SynthError {
    pub(crate) fn invalid(param: &'static str, value: f32, reason: &'static str) -> Self {
        SynthError::InvalidConfiguration {
            param,
            value,
            reason,
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SynthError>;
