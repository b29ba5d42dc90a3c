use crate::error::NotationError;
use crate::types::pitch::Pitch;
use crate::Result;
use num_rational::Rational64;
use std::fmt;

/// Note length in whole notes.
pub type Duration = Rational64;

/// A pitch with a strictly positive duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Note {
    pitch: Pitch,
    duration: Duration,
}

impl Note {
    pub fn new(pitch: Pitch, duration: Duration) -> Result<Self> {
        if duration <= Duration::from_integer(0) {
            return Err(NotationError::NonPositiveDuration(duration.to_string()));
        }
        Ok(Self { pitch, duration })
    }

    pub fn pitch(&self) -> Pitch {
        self.pitch
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Semitones above C0.
    pub fn value(&self) -> i32 {
        self.pitch.value()
    }

    pub fn octave(&self) -> i32 {
        self.pitch.octave()
    }

    pub fn name(&self) -> String {
        self.pitch.name()
    }

    pub fn with_duration(&self, duration: Duration) -> Result<Self> {
        Self::new(self.pitch, duration)
    }

    pub fn transpose(&self, semitones: i32) -> Self {
        Self {
            pitch: self.pitch + semitones,
            duration: self.duration,
        }
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.pitch, self.duration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let c4 = Pitch::from_name("C4").unwrap();
        let note = Note::new(c4, Duration::new(1, 8)).unwrap();
        assert_eq!(note.value(), 48);
        assert_eq!(note.octave(), 4);
        assert_eq!(note.to_string(), "C4_1/8");

        assert!(matches!(
            Note::new(c4, Duration::from_integer(0)),
            Err(NotationError::NonPositiveDuration(_))
        ));
        assert!(Note::new(c4, Duration::new(-1, 4)).is_err());
        assert!(note.with_duration(Duration::new(0, 1)).is_err());
    }

    #[test]
    fn test_equality_ignores_spelling() {
        let d = Duration::new(1, 4);
        let a = Note::new(Pitch::from_name("F#4").unwrap(), d).unwrap();
        let b = Note::new(Pitch::from_name("Gb4").unwrap(), d).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, b.with_duration(Duration::new(1, 8)).unwrap());
    }

    #[test]
    fn test_transpose() {
        let note = Note::new(Pitch::from_name("C4").unwrap(), Duration::new(3, 8)).unwrap();
        let up = note.transpose(-13);
        assert_eq!(up.name(), "B2");
        assert_eq!(up.duration(), Duration::new(3, 8));
    }
}
