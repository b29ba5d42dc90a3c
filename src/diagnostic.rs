//! Non-fatal diagnostics.
//!
//! Some computations coerce their input into a canonical range instead of failing
//! (a `Cb` class value of -1, an interval of 24 semitones). The coerced value is
//! returned together with a [`Diagnostic`] so callers can assert on it or ignore it.

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    /// A pitch class value fell outside 0..=11.
    PitchClassOutOfRange { name: String, raw: i32, wrapped: i32 },
    /// A simple interval value fell outside 0..=12 and was coerced.
    IntervalOutOfRange { raw: i32, coerced: u8 },
    /// A frequency did not land within one cent of an equal-tempered pitch.
    FrequencyRounded { frequency: f64, cents: f64 },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::PitchClassOutOfRange { name, raw, wrapped } => write!(
                f,
                "computed pitch class value {} for \"{}\" outside 0--11 (wraps to {})",
                raw, name, wrapped
            ),
            Diagnostic::IntervalOutOfRange { raw, coerced } => write!(
                f,
                "input value {} not between 0 and 12 has been coerced to {}",
                raw, coerced
            ),
            Diagnostic::FrequencyRounded { frequency, cents } => write!(
                f,
                "{} Hz is more than one cent off ({:.2}), rounding {} to the nearest piano key",
                frequency,
                cents,
                if *cents < 0.0 { "up" } else { "down" }
            ),
        }
    }
}

/// A value paired with the diagnostic raised while computing it, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnosed<T> {
    value: T,
    diagnostic: Option<Diagnostic>,
}

impl<T> Diagnosed<T> {
    pub fn clean(value: T) -> Self {
        Self {
            value,
            diagnostic: None,
        }
    }

    pub fn with_diagnostic(value: T, diagnostic: Diagnostic) -> Self {
        Self {
            value,
            diagnostic: Some(diagnostic),
        }
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn diagnostic(&self) -> Option<&Diagnostic> {
        self.diagnostic.as_ref()
    }

    pub fn is_clean(&self) -> bool {
        self.diagnostic.is_none()
    }

    pub fn into_parts(self) -> (T, Option<Diagnostic>) {
        (self.value, self.diagnostic)
    }

    /// Drop the diagnostic, logging it as a warning.
    pub fn into_value(self) -> T {
        if let Some(diagnostic) = &self.diagnostic {
            log::warn!("{}", diagnostic);
        }
        self.value
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Diagnosed<U> {
        Diagnosed {
            value: f(self.value),
            diagnostic: self.diagnostic,
        }
    }
}
