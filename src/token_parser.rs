//! Scanner for single ABC note tokens.
//!
//! ```text
//! (^ | ^^ | = | _ | __)? [a-gA-G] [,']* [0-9]* (/+ [0-9]*)?
//! ```
//!
//! The scanner produces a [`NoteToken`] whose duration part is already one of the
//! legal shapes; combinations such as `C3/` or `C//4` are rejected here.

use crate::error::NotationError;
use crate::types::accidental::{Accidental, Letter};
use crate::types::note::Duration;
use crate::Result;
use std::fmt;
use std::str::FromStr;

/// Longest slash run that still fits the duration type.
const MAX_HALVINGS: u32 = 62;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurationSpec {
    /// No suffix: one unit.
    Unit,
    /// `C3`
    Multiple(u32),
    /// `C/`, `C//`: halve once per slash.
    Halvings(u32),
    /// `C/4`
    Reciprocal(u32),
    /// `C3/2`
    Ratio(u32, u32),
}

impl DurationSpec {
    /// Length in units.
    pub fn relative(&self) -> Duration {
        match *self {
            DurationSpec::Unit => Duration::from_integer(1),
            DurationSpec::Multiple(n) => Duration::from_integer(n as i64),
            DurationSpec::Halvings(k) => Duration::new(1, 1i64 << k),
            DurationSpec::Reciprocal(d) => Duration::new(1, d as i64),
            DurationSpec::Ratio(n, d) => Duration::new(n as i64, d as i64),
        }
    }

    /// Shortest suffix for a relative length.
    pub fn from_relative(relative: Duration) -> Option<Self> {
        let numer = u32::try_from(*relative.numer()).ok()?;
        let denom = u32::try_from(*relative.denom()).ok()?;
        Some(match (numer, denom) {
            (0, _) => return None,
            (1, 1) => DurationSpec::Unit,
            (1, d) => DurationSpec::Reciprocal(d),
            (n, 1) => DurationSpec::Multiple(n),
            (n, d) => DurationSpec::Ratio(n, d),
        })
    }
}

impl fmt::Display for DurationSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DurationSpec::Unit => Ok(()),
            DurationSpec::Multiple(n) => write!(f, "{}", n),
            DurationSpec::Halvings(k) => {
                for _ in 0..*k {
                    f.write_str("/")?;
                }
                Ok(())
            }
            DurationSpec::Reciprocal(d) => write!(f, "/{}", d),
            DurationSpec::Ratio(n, d) => write!(f, "{}/{}", n, d),
        }
    }
}

/// One note token split into its parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoteToken {
    /// Explicit accidental; `Natural` for `=`.
    pub accidental: Option<Accidental>,
    pub letter: Letter,
    /// Lowercase letters sit one octave above the base octave.
    pub lowercase: bool,
    /// Count of `'` minus count of `,`.
    pub octave_shift: i32,
    pub duration: DurationSpec,
}

impl NoteToken {
    /// Scan a token from the start of `input`, returning it with the unread rest.
    pub fn scan(input: &str) -> Result<(NoteToken, &str)> {
        let mut cursor = Cursor::new(input);

        let accidental = if cursor.eat("^^") {
            Some(Accidental::DoubleSharp)
        } else if cursor.eat("^") {
            Some(Accidental::Sharp)
        } else if cursor.eat("__") {
            Some(Accidental::DoubleFlat)
        } else if cursor.eat("_") {
            Some(Accidental::Flat)
        } else if cursor.eat("=") {
            Some(Accidental::Natural)
        } else {
            None
        };

        let letter_char = cursor
            .next_if(|c| matches!(c, 'a'..='g' | 'A'..='G'))
            .ok_or_else(|| NotationError::InvalidNote(input.to_string()))?;
        let letter =
            Letter::from_char(letter_char).ok_or_else(|| NotationError::InvalidNote(input.to_string()))?;

        let mut octave_shift = 0;
        while let Some(c) = cursor.next_if(|c| c == ',' || c == '\'') {
            octave_shift += if c == '\'' { 1 } else { -1 };
        }

        let numerator = cursor.take_while(|c| c.is_ascii_digit());
        let slashes = cursor.take_while(|c| c == '/').len() as u32;
        let denominator = cursor.take_while(|c| c.is_ascii_digit());

        let invalid = |reason| NotationError::InvalidDuration {
            token: input[..cursor.pos].to_string(),
            reason,
        };
        let number = |digits: &str| -> Result<u32> {
            match digits.parse::<u32>() {
                Ok(0) => Err(invalid("zero length")),
                Ok(n) => Ok(n),
                Err(_) => Err(invalid("number too large")),
            }
        };

        let numerator = (!numerator.is_empty()).then_some(numerator);
        let denominator = (!denominator.is_empty()).then_some(denominator);

        let duration = match (numerator, slashes, denominator) {
            (None, 0, _) => DurationSpec::Unit,
            (Some(n), 0, _) => DurationSpec::Multiple(number(n)?),
            (None, k, None) if k > MAX_HALVINGS => return Err(invalid("too many slashes")),
            (None, k, None) => DurationSpec::Halvings(k),
            (None, 1, Some(d)) => DurationSpec::Reciprocal(number(d)?),
            (Some(n), 1, Some(d)) => DurationSpec::Ratio(number(n)?, number(d)?),
            (_, _, Some(_)) => return Err(invalid("only one `/` is allowed before a denominator")),
            (Some(_), _, None) => return Err(invalid("slashes after a numerator need a denominator")),
        };

        let token = NoteToken {
            accidental,
            letter,
            lowercase: letter_char.is_ascii_lowercase(),
            octave_shift,
            duration,
        };
        Ok((token, cursor.rest()))
    }

    /// Octave of the written note given the octave of uppercase unmarked letters.
    pub fn octave(&self, octave_base: i32) -> i32 {
        octave_base + self.lowercase as i32 + self.octave_shift
    }
}

impl FromStr for NoteToken {
    type Err = NotationError;

    /// Scan a whole token; trailing characters are an error.
    fn from_str(s: &str) -> Result<Self> {
        let (token, rest) = NoteToken::scan(s)?;
        if !rest.is_empty() {
            return Err(NotationError::InvalidNote(s.to_string()));
        }
        Ok(token)
    }
}

impl fmt::Display for NoteToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(acc) = self.accidental {
            f.write_str(acc.abc())?;
        }
        let letter = self.letter.as_char();
        if self.lowercase {
            write!(f, "{}", letter.to_ascii_lowercase())?;
        } else {
            write!(f, "{}", letter)?;
        }
        let mark = if self.octave_shift > 0 { "'" } else { "," };
        for _ in 0..self.octave_shift.unsigned_abs() {
            f.write_str(mark)?;
        }
        write!(f, "{}", self.duration)
    }
}

struct Cursor<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn eat(&mut self, prefix: &str) -> bool {
        if self.rest().starts_with(prefix) {
            self.pos += prefix.len();
            true
        } else {
            false
        }
    }

    fn next_if(&mut self, accept: impl Fn(char) -> bool) -> Option<char> {
        let c = self.rest().chars().next().filter(|c| accept(*c))?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn take_while(&mut self, accept: impl Fn(char) -> bool) -> &'a str {
        let start = self.pos;
        while self.next_if(&accept).is_some() {}
        &self.input[start..self.pos]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn token(s: &str) -> NoteToken {
        s.parse().unwrap()
    }

    #[test]
    fn test_scan_parts() {
        assert_eq!(
            token("^^f',,3"),
            NoteToken {
                accidental: Some(Accidental::DoubleSharp),
                letter: Letter::F,
                lowercase: true,
                octave_shift: -1,
                duration: DurationSpec::Multiple(3),
            }
        );
        assert_eq!(
            token("=C"),
            NoteToken {
                accidental: Some(Accidental::Natural),
                letter: Letter::C,
                lowercase: false,
                octave_shift: 0,
                duration: DurationSpec::Unit,
            }
        );
        assert_eq!(token("__B,,").accidental, Some(Accidental::DoubleFlat));
        assert_eq!(token("__B,,").octave_shift, -2);
    }

    #[test]
    fn test_scan_durations() {
        for (s, expected) in [
            ("C", DurationSpec::Unit),
            ("C2", DurationSpec::Multiple(2)),
            ("C/", DurationSpec::Halvings(1)),
            ("C//", DurationSpec::Halvings(2)),
            ("C/3", DurationSpec::Reciprocal(3)),
            ("C3/2", DurationSpec::Ratio(3, 2)),
        ] {
            assert_eq!(token(s).duration, expected, "{}", s);
        }
        assert_eq!(DurationSpec::Halvings(3).relative(), Duration::new(1, 8));
        assert_eq!(DurationSpec::Ratio(6, 4).relative(), Duration::new(3, 2));
    }

    #[test]
    fn test_scan_rejects() {
        for s in ["", "H", "^", "^^^C", "=^C", "c3/", "C2//", "C//4", "C0", "C/0", "C99999999999"] {
            assert!(s.parse::<NoteToken>().is_err(), "{}", s);
        }
        assert!(matches!(
            NoteToken::scan("C//4"),
            Err(NotationError::InvalidDuration { .. })
        ));
        assert!(matches!(
            NoteToken::scan("x"),
            Err(NotationError::InvalidNote(_))
        ));
        let too_many = format!("C{}", "/".repeat(63));
        assert!(NoteToken::scan(&too_many).is_err());
    }

    #[test]
    fn test_scan_prefix() {
        let (t, rest) = NoteToken::scan("_B,2, c").unwrap();
        assert_eq!(t.duration, DurationSpec::Multiple(2));
        assert_eq!(t.octave_shift, -1);
        assert_eq!(rest, ", c");
        assert!("_B,2,".parse::<NoteToken>().is_err());
    }

    #[test]
    fn test_octave() {
        assert_eq!(token("C").octave(4), 4);
        assert_eq!(token("c").octave(4), 5);
        assert_eq!(token("c''").octave(4), 7);
        assert_eq!(token("C,,'").octave(4), 3);
    }

    #[test]
    fn test_display() {
        for s in ["^^f,3", "=C", "_b''/", "C//", "d/4", "E3/2", "__G,,,"] {
            assert_eq!(token(s).to_string(), s);
        }
    }

    #[test]
    fn test_from_relative() {
        for (relative, expected) in [
            (Duration::from_integer(1), DurationSpec::Unit),
            (Duration::new(1, 2), DurationSpec::Reciprocal(2)),
            (Duration::from_integer(3), DurationSpec::Multiple(3)),
            (Duration::new(3, 2), DurationSpec::Ratio(3, 2)),
        ] {
            assert_eq!(DurationSpec::from_relative(relative), Some(expected));
        }
        assert_eq!(DurationSpec::from_relative(Duration::from_integer(0)), None);
        assert_eq!(
            DurationSpec::from_relative(Duration::from_integer(i64::MAX)),
            None
        );
    }
}
