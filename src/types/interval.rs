//! Interval naming.
//!
//! The tritone (6 semitones) is always named `A4`.

use crate::diagnostic::{Diagnosed, Diagnostic};
use crate::error::NotationError;
use crate::Result;
use std::fmt;
use std::str::FromStr;

const SHORT_NAMES: [&str; 13] = [
    "P1", "m2", "M2", "m3", "M3", "P4", "A4", "P5", "m6", "M6", "m7", "M7", "P8",
];

const OCTAVE: &str = "P8";

/// Unsigned interval of at most one octave (0..=12 semitones).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SimpleInterval {
    value: u8,
}

impl SimpleInterval {
    /// Values outside 0..=12 are coerced to `|v| mod 12`, with nonzero multiples
    /// of 12 becoming 12, and the coercion is reported.
    pub fn new(value: i32) -> Diagnosed<Self> {
        if (0..=12).contains(&value) {
            return Diagnosed::clean(Self { value: value as u8 });
        }

        let magnitude = value.unsigned_abs();
        let coerced = match magnitude % 12 {
            0 => 12,
            r => r as u8,
        };
        Diagnosed::with_diagnostic(
            Self { value: coerced },
            Diagnostic::IntervalOutOfRange {
                raw: value,
                coerced,
            },
        )
    }

    /// Upward distance between two classes, wrapped into 0..12.
    pub(crate) fn from_class_distance(semitones: i32) -> Self {
        Self {
            value: semitones.rem_euclid(12) as u8,
        }
    }

    pub fn from_name(name: &str) -> Result<Self> {
        SHORT_NAMES
            .iter()
            .position(|n| *n == name)
            .map(|value| Self {
                value: value as u8,
            })
            .ok_or_else(|| NotationError::InvalidIntervalName(name.to_string()))
    }

    /// Number of semitones.
    pub fn value(&self) -> u8 {
        self.value
    }

    /// Perfect, major or minor short name (`P1`, `m3`, ... `P8`).
    pub fn name(&self) -> &'static str {
        SHORT_NAMES[self.value as usize]
    }

    pub fn whole_steps(&self) -> f32 {
        self.value as f32 / 2.0
    }

    pub fn inverse(&self) -> Self {
        Self {
            value: 12 - self.value,
        }
    }
}

impl fmt::Display for SimpleInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for SimpleInterval {
    type Err = NotationError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_name(s)
    }
}

/// Directed interval of any size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SignedInterval {
    value: i32,
}

impl SignedInterval {
    pub fn new(value: i32) -> Self {
        Self { value }
    }

    pub fn value(&self) -> i32 {
        self.value
    }

    pub fn is_negative(&self) -> bool {
        self.value < 0
    }

    pub fn octaves(&self) -> u32 {
        self.value.unsigned_abs() / 12
    }

    pub fn remainder(&self) -> SimpleInterval {
        SimpleInterval::from_class_distance((self.value.unsigned_abs() % 12) as i32)
    }

    /// Compound name such as `P8+m3` or `2(P8)+m3`. Descending compound intervals
    /// are bracketed, `-[2(P8)+m3]`; a descending interval within the octave keeps
    /// the plain simple name.
    pub fn name(&self) -> String {
        let remainder = self.remainder();
        let octaves = match self.octaves() {
            0 => None,
            1 => Some(OCTAVE.to_string()),
            n => Some(format!("{}({})", n, OCTAVE)),
        };

        let name = match (octaves, remainder.value()) {
            (None, 0) => SHORT_NAMES[0].to_string(),
            (None, _) => remainder.name().to_string(),
            (Some(o), 0) => o,
            (Some(o), _) => format!("{}+{}", o, remainder.name()),
        };

        if self.is_negative() && self.octaves() > 0 {
            format!("-[{}]", name)
        } else {
            name
        }
    }
}

impl fmt::Display for SignedInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.name())
    }
}
