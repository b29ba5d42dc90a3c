use std::fmt;

/// Natural note letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Letter {
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

impl Letter {
    pub const ALL: [Letter; 7] = [
        Letter::C,
        Letter::D,
        Letter::E,
        Letter::F,
        Letter::G,
        Letter::A,
        Letter::B,
    ];

    /// Semitones above C.
    pub const fn natural_offset(self) -> i32 {
        match self {
            Letter::C => 0,
            Letter::D => 2,
            Letter::E => 4,
            Letter::F => 5,
            Letter::G => 7,
            Letter::A => 9,
            Letter::B => 11,
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'C' => Some(Letter::C),
            'D' => Some(Letter::D),
            'E' => Some(Letter::E),
            'F' => Some(Letter::F),
            'G' => Some(Letter::G),
            'A' => Some(Letter::A),
            'B' => Some(Letter::B),
            _ => None,
        }
    }

    pub const fn as_char(self) -> char {
        match self {
            Letter::C => 'C',
            Letter::D => 'D',
            Letter::E => 'E',
            Letter::F => 'F',
            Letter::G => 'G',
            Letter::A => 'A',
            Letter::B => 'B',
        }
    }

    /// The natural letter with exactly this offset from C, if any.
    pub fn from_natural_offset(offset: i32) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|l| l.natural_offset() == offset.rem_euclid(12))
    }

    fn index(self) -> usize {
        self as usize
    }

    /// Letter `steps` diatonic steps away (wrapping).
    pub fn step(self, steps: i32) -> Self {
        Self::ALL[(self.index() as i32 + steps).rem_euclid(7) as usize]
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Accidental {
    DoubleFlat,
    Flat,
    Natural,
    Sharp,
    DoubleSharp,
}

impl Accidental {
    pub const fn semitones(self) -> i32 {
        match self {
            Accidental::DoubleFlat => -2,
            Accidental::Flat => -1,
            Accidental::Natural => 0,
            Accidental::Sharp => 1,
            Accidental::DoubleSharp => 2,
        }
    }

    pub fn from_semitones(semitones: i32) -> Option<Self> {
        match semitones {
            -2 => Some(Accidental::DoubleFlat),
            -1 => Some(Accidental::Flat),
            0 => Some(Accidental::Natural),
            1 => Some(Accidental::Sharp),
            2 => Some(Accidental::DoubleSharp),
            _ => None,
        }
    }

    pub const fn ascii(self) -> &'static str {
        match self {
            Accidental::DoubleFlat => "bb",
            Accidental::Flat => "b",
            Accidental::Natural => "=",
            Accidental::Sharp => "#",
            Accidental::DoubleSharp => "##",
        }
    }

    pub const fn unicode(self) -> &'static str {
        match self {
            Accidental::DoubleFlat => "𝄫",
            Accidental::Flat => "♭",
            Accidental::Natural => "♮",
            Accidental::Sharp => "♯",
            Accidental::DoubleSharp => "𝄪",
        }
    }

    pub const fn html(self) -> &'static str {
        match self {
            Accidental::DoubleFlat => "&#119083;",
            Accidental::Flat => "&flat;",
            Accidental::Natural => "&natural;",
            Accidental::Sharp => "&sharp;",
            Accidental::DoubleSharp => "&#119082;",
        }
    }

    /// ABC prefix form (`^`, `_`, `=`, ...).
    pub const fn abc(self) -> &'static str {
        match self {
            Accidental::DoubleFlat => "__",
            Accidental::Flat => "_",
            Accidental::Natural => "=",
            Accidental::Sharp => "^",
            Accidental::DoubleSharp => "^^",
        }
    }
}

impl fmt::Display for Accidental {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.ascii())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letters() {
        assert_eq!(Letter::from_char('g'), Some(Letter::G));
        assert_eq!(Letter::from_char('H'), None);
        assert_eq!(Letter::from_natural_offset(11), Some(Letter::B));
        assert_eq!(Letter::from_natural_offset(1), None);
        assert_eq!(Letter::B.step(1), Letter::C);
        assert_eq!(Letter::C.step(-1), Letter::B);
        assert_eq!(Letter::F.step(4), Letter::C);
    }

    #[test]
    fn test_accidentals() {
        for semitones in -2..=2 {
            let acc = Accidental::from_semitones(semitones).unwrap();
            assert_eq!(acc.semitones(), semitones);
        }
        assert_eq!(Accidental::from_semitones(3), None);
        assert_eq!(Accidental::Sharp.abc(), "^");
        assert_eq!(Accidental::DoubleFlat.unicode(), "𝄫");
        assert_eq!(Accidental::Flat.to_string(), "b");
    }
}
