//! abcnote - ABC note token codec
//!
//! Converts single ABC note tokens (`^f'`, `_B,2`, `C//`) into pitches with
//! rational durations and back, with the pitch-class, interval and key arithmetic
//! needed to resolve key signatures and spell notes.

pub mod codec;
pub mod diagnostic;
pub mod error;
pub mod token_parser;
pub mod types;
pub mod util;

// Re-export commonly used types
pub use codec::{NotationContext, decode, encode};
pub use diagnostic::{Diagnosed, Diagnostic};
pub use error::NotationError;
pub use token_parser::{DurationSpec, NoteToken};
pub use types::accidental::{Accidental, Letter};
pub use types::interval::{SignedInterval, SimpleInterval};
pub use types::key::{Key, Mode};
pub use types::note::{Duration, Note};
pub use types::pitch::{Pitch, PitchClass, Spelling, pitch_class_value};

pub type Result<T> = std::result::Result<T, NotationError>;
