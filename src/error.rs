//! Fatal errors raised while parsing or serializing notation.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotationError {
    #[error("invalid pitch class specification \"{0}\"")]
    InvalidPitchClass(String),

    #[error("invalid pitch name \"{0}\"")]
    InvalidPitchName(String),

    #[error("invalid frequency {0}")]
    InvalidFrequency(String),

    #[error("interval name \"{0}\" not recognized")]
    InvalidIntervalName(String),

    #[error("invalid key specification \"{0}\"")]
    InvalidKey(String),

    #[error("unrecognized mode \"{mode}\" in key \"{key}\"")]
    UnknownMode { mode: String, key: String },

    #[error("invalid ABC note specification \"{0}\"")]
    InvalidNote(String),

    #[error("invalid relative duration in \"{token}\": {reason}")]
    InvalidDuration { token: String, reason: &'static str },

    #[error("duration must be positive, got {0}")]
    NonPositiveDuration(String),

    #[error("pitch class name \"{0}\" is longer than two characters")]
    SpellingTooLong(String),
}
