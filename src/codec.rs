//! Decoding ABC note tokens into [`Note`]s and encoding them back.
//!
//! Both directions depend on a [`NotationContext`]: the active key (for implied
//! accidentals), the octave of unmarked uppercase letters and the unit note length.
//! `decode(encode(note))` reproduces `note` for every note whose spelling has at
//! most one accidental.

use crate::error::NotationError;
use crate::token_parser::{DurationSpec, NoteToken};
use crate::types::accidental::Accidental;
use crate::types::key::Key;
use crate::types::note::{Duration, Note};
use crate::types::pitch::{Pitch, PitchClass, Spelling};
use crate::Result;
use num_traits::{CheckedDiv, CheckedMul};

pub const DEFAULT_OCTAVE_BASE: i32 = 4;

pub fn default_unit_duration() -> Duration {
    Duration::new(1, 8)
}

/// Key, octave base and unit duration in effect for a run of tokens.
#[derive(Debug, Clone, PartialEq)]
pub struct NotationContext {
    key: Key,
    octave_base: i32,
    unit_duration: Duration,
}

impl Default for NotationContext {
    fn default() -> Self {
        Self {
            key: Key::default(),
            octave_base: DEFAULT_OCTAVE_BASE,
            unit_duration: default_unit_duration(),
        }
    }
}

impl NotationContext {
    pub fn new(key: Key, unit_duration: Duration) -> Result<Self> {
        Self::default().with_key(key).with_unit_duration(unit_duration)
    }

    pub fn with_key(self, key: Key) -> Self {
        Self { key, ..self }
    }

    /// Octave number of uppercase letters without octave marks.
    pub fn with_octave_base(self, octave_base: i32) -> Self {
        Self {
            octave_base,
            ..self
        }
    }

    pub fn with_unit_duration(self, unit_duration: Duration) -> Result<Self> {
        if unit_duration <= Duration::from_integer(0) {
            return Err(NotationError::NonPositiveDuration(
                unit_duration.to_string(),
            ));
        }
        Ok(Self {
            unit_duration,
            ..self
        })
    }

    pub fn key(&self) -> &Key {
        &self.key
    }

    pub fn octave_base(&self) -> i32 {
        self.octave_base
    }

    pub fn unit_duration(&self) -> Duration {
        self.unit_duration
    }

    /// Decode the note at the start of `token`; anything after it is ignored.
    pub fn decode(&self, token: &str) -> Result<Note> {
        let (note, rest) = self.decode_prefix(token)?;
        if !rest.is_empty() {
            log::debug!("ignoring \"{}\" after note \"{}\"", rest, token);
        }
        Ok(note)
    }

    /// Decode one note from the start of `input`, returning the unread rest.
    pub fn decode_prefix<'a>(&self, input: &'a str) -> Result<(Note, &'a str)> {
        let (token, rest) = NoteToken::scan(input)?;
        let note = self.decode_token(&token)?;
        log::trace!("decoded \"{}\" as {}", &input[..input.len() - rest.len()], note);
        Ok((note, rest))
    }

    pub fn decode_token(&self, token: &NoteToken) -> Result<Note> {
        let octave = token.octave(self.octave_base);

        // An explicit accidental, `=` included, replaces the key signature.
        let alter = match token.accidental {
            Some(acc) => acc.semitones(),
            None => self
                .key
                .accidental(token.letter)
                .map_or(0, Accidental::semitones),
        };

        let value = token.letter.natural_offset() + 12 * octave + alter;
        let pitch = if alter.abs() <= 1 {
            Pitch::from_pitch_class(
                PitchClass::from_spelling(Spelling::new(token.letter, alter as i8)),
                octave,
            )
        } else {
            Pitch::new(value)
        };

        let duration = token
            .duration
            .relative()
            .checked_mul(&self.unit_duration)
            .ok_or_else(|| NotationError::InvalidDuration {
                token: token.to_string(),
                reason: "duration overflows",
            })?;

        Note::new(pitch, duration)
    }

    pub fn encode(&self, note: &Note) -> Result<String> {
        let token = self.encode_token(note)?;
        Ok(token.to_string())
    }

    pub fn encode_token(&self, note: &Note) -> Result<NoteToken> {
        let pitch = note.pitch();
        let spelling = pitch.spelling();
        if spelling.alter.abs() > 1 {
            return Err(NotationError::SpellingTooLong(spelling.name()));
        }

        let written = spelling.accidental();
        let implied = self.key.accidental(spelling.letter);
        let accidental = match (written, implied) {
            (None, None) => None,
            (None, Some(_)) => Some(Accidental::Natural),
            (Some(w), Some(k)) if w == k => None,
            (Some(w), _) => Some(w),
        };

        let octave = pitch.written_octave();
        let base = self.octave_base;
        let octave_shift = if octave < base {
            octave - base
        } else if octave <= base + 1 {
            0
        } else {
            octave - base - 1
        };

        let too_long = || NotationError::InvalidDuration {
            token: note.to_string(),
            reason: "cannot be written relative to the unit duration",
        };
        let relative = note
            .duration()
            .checked_div(&self.unit_duration)
            .ok_or_else(too_long)?;
        let duration = DurationSpec::from_relative(relative).ok_or_else(too_long)?;

        Ok(NoteToken {
            accidental,
            letter: spelling.letter,
            lowercase: octave > base,
            octave_shift,
            duration,
        })
    }
}

/// Decode `token` in `key` with the default octave base.
pub fn decode(token: &str, key: &Key, unit_duration: Duration) -> Result<Note> {
    NotationContext::new(*key, unit_duration)?.decode(token)
}

/// Encode `note` in `key` with the default octave base.
pub fn encode(note: &Note, key: &Key, unit_duration: Duration) -> Result<String> {
    NotationContext::new(*key, unit_duration)?.encode(note)
}

impl Note {
    pub fn from_abc(token: &str, context: &NotationContext) -> Result<Self> {
        context.decode(token)
    }

    pub fn to_abc(&self, context: &NotationContext) -> Result<String> {
        context.encode(self)
    }
}
