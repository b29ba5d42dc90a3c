//! Keys (`G`, `Em`, `Ador`, `Bbmin`) and their signatures.

use crate::error::NotationError;
use crate::types::accidental::{Accidental, Letter};
use crate::types::pitch::{PitchClass, Spelling};
use crate::Result;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    Major,
    Minor,
    Ionian,
    Aeolian,
    Mixolydian,
    Dorian,
    Phrygian,
    Lydian,
    Locrian,
}

impl Mode {
    pub const ALL: [Mode; 9] = [
        Mode::Major,
        Mode::Minor,
        Mode::Ionian,
        Mode::Aeolian,
        Mode::Mixolydian,
        Mode::Dorian,
        Mode::Phrygian,
        Mode::Lydian,
        Mode::Locrian,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Mode::Major => "major",
            Mode::Minor => "minor",
            Mode::Ionian => "ionian",
            Mode::Aeolian => "aeolian",
            Mode::Mixolydian => "mixolydian",
            Mode::Dorian => "dorian",
            Mode::Phrygian => "phrygian",
            Mode::Lydian => "lydian",
            Mode::Locrian => "locrian",
        }
    }

    pub fn abbreviation(self) -> &'static str {
        &self.name()[..3]
    }

    /// Semitones from the tonic to the relative ionian root.
    pub const fn offset(self) -> i32 {
        match self {
            Mode::Major | Mode::Ionian => 0,
            Mode::Minor | Mode::Aeolian => 3,
            Mode::Mixolydian => -7,
            Mode::Dorian => -2,
            Mode::Phrygian => -4,
            Mode::Lydian => -5,
            Mode::Locrian => 1,
        }
    }

    /// Position of the mode's tonic within the major scale.
    const fn degree(self) -> usize {
        match self {
            Mode::Major | Mode::Ionian => 0,
            Mode::Dorian => 1,
            Mode::Phrygian => 2,
            Mode::Lydian => 3,
            Mode::Mixolydian => 4,
            Mode::Minor | Mode::Aeolian => 5,
            Mode::Locrian => 6,
        }
    }

    /// `m` or the first three letters of a mode name, any case.
    pub fn from_name(name: &str) -> Option<Self> {
        if name == "m" {
            return Some(Mode::Minor);
        }
        let prefix: String = name.chars().take(3).collect::<String>().to_lowercase();
        Self::ALL.into_iter().find(|m| m.abbreviation() == prefix)
    }

    pub fn is_equivalent(self, other: Mode) -> bool {
        self.offset() == other.offset()
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

const MAJOR_STEPS: [i32; 7] = [2, 2, 1, 2, 2, 2, 1];

const SHARP_ORDER: [Letter; 7] = [
    Letter::F,
    Letter::C,
    Letter::G,
    Letter::D,
    Letter::A,
    Letter::E,
    Letter::B,
];

const FLAT_ORDER: [Letter; 7] = [
    Letter::B,
    Letter::E,
    Letter::A,
    Letter::D,
    Letter::G,
    Letter::C,
    Letter::F,
];

/// Sharp (positive) or flat (negative) count of each ionian root spelling.
const IONIAN_SIGNATURES: [(Letter, i8, i8); 15] = [
    (Letter::C, 1, 7),
    (Letter::F, 1, 6),
    (Letter::B, 0, 5),
    (Letter::E, 0, 4),
    (Letter::A, 0, 3),
    (Letter::D, 0, 2),
    (Letter::G, 0, 1),
    (Letter::C, 0, 0),
    (Letter::F, 0, -1),
    (Letter::B, -1, -2),
    (Letter::E, -1, -3),
    (Letter::A, -1, -4),
    (Letter::D, -1, -5),
    (Letter::G, -1, -6),
    (Letter::C, -1, -7),
];

fn ionian_signature(root: &PitchClass) -> Option<i8> {
    let spelling = root.spelling();
    IONIAN_SIGNATURES
        .iter()
        .find(|(letter, alter, _)| *letter == spelling.letter && *alter == spelling.alter)
        .map(|(_, _, count)| *count)
}

/// Tonic plus mode. Two keys are equal when their tonics have the same value and
/// their modes the same offset, so `Cmaj == Cion`.
#[derive(Debug, Clone, Copy)]
pub struct Key {
    tonic: PitchClass,
    mode: Mode,
    signature: i8,
}

impl Key {
    pub fn new(tonic: PitchClass, mode: Mode) -> Self {
        let mut key = Self {
            tonic,
            mode,
            signature: 0,
        };
        let root = key.relative_tonic(Mode::Ionian);
        key.signature = ionian_signature(&root)
            .or_else(|| ionian_signature(&PitchClass::new(root.value() as i32)))
            .unwrap_or_default();
        key
    }

    /// Parse a key name such as `D`, `Ador`, `Bbmin` or `F# minor`.
    ///
    /// Text after the mode word is ignored.
    pub fn from_name(name: &str) -> Result<Self> {
        let name = name.trim();
        let invalid = || NotationError::InvalidKey(name.to_string());

        let mut chars = name.chars();
        let letter = chars
            .next()
            .filter(|c| c.is_ascii_uppercase())
            .and_then(Letter::from_char)
            .ok_or_else(invalid)?;

        let mut rest = chars.as_str();
        let mut alter = 0;
        if let Some(c) = rest.chars().next() {
            alter = match c {
                '#' | '♯' => 1,
                'b' | '♭' => -1,
                _ => 0,
            };
            if alter != 0 {
                rest = &rest[c.len_utf8()..];
            }
        }

        let rest = rest.trim_start();
        let word_end = rest
            .find(|c: char| !c.is_alphanumeric())
            .unwrap_or(rest.len());
        let (word, extra) = rest.split_at(word_end);

        let mode = if word.is_empty() {
            Mode::Major
        } else {
            Mode::from_name(word).ok_or_else(|| NotationError::UnknownMode {
                mode: word.to_string(),
                key: name.to_string(),
            })?
        };
        if !extra.trim().is_empty() {
            log::debug!("ignoring \"{}\" after key \"{}\"", extra.trim(), name);
        }

        Ok(Self::new(
            PitchClass::from_spelling(Spelling::new(letter, alter)),
            mode,
        ))
    }

    pub fn tonic(&self) -> PitchClass {
        self.tonic
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Number of sharps (positive) or flats (negative) in the signature.
    pub fn signature_count(&self) -> i8 {
        self.signature
    }

    /// Tonic of the relative key in `mode`, spelled to match this key's tonic
    /// when a single accidental allows it.
    fn relative_tonic(&self, mode: Mode) -> PitchClass {
        let root = self.tonic + (self.mode.offset() - mode.offset());
        let alter = self.tonic.spelling().alter;
        let respelled = if alter > 0 {
            Some(root.equivalent_sharp())
        } else if alter < 0 {
            Some(root.equivalent_flat())
        } else {
            None
        };
        match respelled {
            Some(pc) if pc.name().chars().count() == 2 => pc,
            _ => root,
        }
    }

    pub fn relative(&self, mode: Mode) -> Key {
        Key::new(self.relative_tonic(mode), mode)
    }

    pub fn relative_ionian(&self) -> Key {
        self.relative(Mode::Ionian)
    }

    pub fn relative_major(&self) -> Key {
        self.relative_ionian()
    }

    pub fn relative_aeolian(&self) -> Key {
        self.relative(Mode::Aeolian)
    }

    pub fn relative_minor(&self) -> Key {
        self.relative_aeolian()
    }

    /// Accidentals shown in the signature, in circle-of-fifths order.
    pub fn key_signature(&self) -> Vec<PitchClass> {
        self.accidentals()
            .into_iter()
            .map(|(letter, acc)| {
                PitchClass::from_spelling(Spelling::new(letter, acc.semitones() as i8))
            })
            .collect()
    }

    /// Letters altered by the signature, each with its accidental.
    pub fn accidentals(&self) -> Vec<(Letter, Accidental)> {
        let count = self.signature.unsigned_abs() as usize;
        if self.signature > 0 {
            SHARP_ORDER[..count]
                .iter()
                .map(|l| (*l, Accidental::Sharp))
                .collect()
        } else {
            FLAT_ORDER[..count]
                .iter()
                .map(|l| (*l, Accidental::Flat))
                .collect()
        }
    }

    /// Accidental the signature applies to `letter`, if any.
    pub fn accidental(&self, letter: Letter) -> Option<Accidental> {
        let count = self.signature.unsigned_abs() as usize;
        if self.signature > 0 {
            SHARP_ORDER[..count]
                .contains(&letter)
                .then_some(Accidental::Sharp)
        } else {
            FLAT_ORDER[..count]
                .contains(&letter)
                .then_some(Accidental::Flat)
        }
    }

    /// Whole/half step pattern of the mode, e.g. `WWHWWWH` for major.
    pub fn intervals(&self) -> String {
        self.steps()
            .map(|step| if step == 1 { 'H' } else { 'W' })
            .collect()
    }

    fn steps(&self) -> impl Iterator<Item = i32> {
        let degree = self.mode.degree();
        (0..7).map(move |i| MAJOR_STEPS[(degree + i) % 7])
    }

    /// The seven scale degrees starting from the tonic, one per letter.
    pub fn scale(&self) -> Vec<PitchClass> {
        let tonic = self.tonic.spelling();
        let mut value = tonic.raw_offset();
        let mut degrees = Vec::with_capacity(7);
        for (i, step) in self.steps().enumerate() {
            let letter = tonic.letter.step(i as i32);
            let alter = (value - letter.natural_offset() + 6).rem_euclid(12) - 6;
            degrees.push(PitchClass::from_spelling(Spelling::new(letter, alter as i8)));
            value += step;
        }
        degrees
    }
}

impl PartialEq for Key {
    fn eq(&self, other: &Self) -> bool {
        self.tonic == other.tonic && self.mode.is_equivalent(other.mode)
    }
}

impl Eq for Key {}

impl Default for Key {
    fn default() -> Self {
        Key::new(PitchClass::new(0), Mode::Major)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.tonic.name(), self.mode.abbreviation())
    }
}

impl FromStr for Key {
    type Err = NotationError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_name(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn key(name: &str) -> Key {
        name.parse().unwrap()
    }

    fn names(pcs: &[PitchClass]) -> Vec<String> {
        pcs.iter().map(|pc| pc.name()).collect()
    }

    #[test]
    fn test_parse_many_key_names() {
        let tonics = [
            "C", "C#", "D", "Eb", "E", "F", "F#", "G", "Ab", "A", "Bb", "B",
        ];
        let mut modes: Vec<String> = Vec::new();
        for mode in Mode::ALL {
            let mut capitalized = mode.name().to_string();
            capitalized[..1].make_ascii_uppercase();
            modes.push(capitalized);
            modes.push(mode.name().to_string());
            modes.push(mode.name().to_uppercase());
        }
        let truncated: Vec<String> = modes.iter().map(|m| m[..3].to_string()).collect();
        modes.extend(truncated);
        modes.push("m".to_string());

        for tonic in tonics {
            for mode in &modes {
                let name = format!("{}{}", tonic, mode);
                let k: Key = name.parse().unwrap_or_else(|e| panic!("{}: {}", name, e));
                assert_eq!(k.tonic().name(), tonic);
                assert!(k.accidentals().len() <= 7);
            }
        }
    }

    #[test]
    fn test_parse_errors() {
        for name in ["", "H", "c", "#", "Cxyz", "Bbfoo", "C M"] {
            assert!(name.parse::<Key>().is_err(), "{}", name);
        }
        assert!(matches!(
            "Cxyz".parse::<Key>(),
            Err(NotationError::UnknownMode { .. })
        ));
    }

    #[test]
    fn test_parse_forms() {
        assert_eq!(key("G").mode(), Mode::Major);
        assert_eq!(key("Em").mode(), Mode::Minor);
        assert_eq!(key("F# minor").tonic().name(), "F#");
        assert_eq!(key("Bbmin").tonic().name(), "Bb");
        assert_eq!(key("Ador").mode(), Mode::Dorian);
        assert_eq!(key("Gmaj clef=treble"), key("G"));
        assert_eq!(key("Cmaj"), key("Cion"));
        assert_eq!(key("Am"), key("Aaeolian"));
        assert_ne!(key("Am"), key("A"));
        assert_eq!(key("Ebmix").to_string(), "Ebmix");
    }

    #[test]
    fn test_key_signature() {
        let a = key("Amaj");
        assert_eq!(names(&a.key_signature()), ["F#", "C#", "G#"]);
        for letter in [Letter::F, Letter::C, Letter::G] {
            assert_eq!(a.accidental(letter), Some(Accidental::Sharp));
        }
        assert_eq!(a.accidental(Letter::D), None);

        assert_eq!(names(&key("Eb").key_signature()), ["Bb", "Eb", "Ab"]);
        assert!(key("C").accidentals().is_empty());
        assert!(key("Am").accidentals().is_empty());
        assert_eq!(key("D").accidentals(), [(Letter::F, Accidental::Sharp), (Letter::C, Accidental::Sharp)]);
    }

    #[test]
    fn test_signature_counts() {
        for (name, count) in [
            ("C#", 7),
            ("Cb", -7),
            ("G#m", 5),
            ("D#m", 6),
            ("Ebm", -6),
            ("Abm", -7),
            ("Bbm", -5),
            ("Ador", 1),
            ("Fm", -4),
            ("Ebmix", -4),
            ("Bloc", 0),
            ("Flyd", 0),
            ("Ephr", 0),
            ("Dmix", 1),
        ] {
            assert_eq!(key(name).signature_count(), count, "{}", name);
        }
    }

    #[test]
    fn test_signature_never_mixes() {
        for tonic in ["C", "C#", "Db", "D", "Eb", "E", "F", "F#", "Gb", "G", "Ab", "A", "Bb", "B"] {
            for mode in Mode::ALL {
                let k = Key::new(PitchClass::from_name(tonic).unwrap(), mode);
                let accs = k.accidentals();
                assert!(
                    accs.iter().all(|(_, a)| *a == Accidental::Sharp)
                        || accs.iter().all(|(_, a)| *a == Accidental::Flat),
                    "{}",
                    k
                );
            }
        }
    }

    #[test]
    fn test_relatives() {
        let am = key("Am");
        let c = key("C");
        assert_eq!(am.relative_ionian(), c);
        assert_eq!(am.relative_major(), c);
        assert_eq!(c.relative_aeolian(), am);
        assert_eq!(c.relative_minor(), am);
        assert_eq!(key("Ador").relative_major(), key("G"));
        assert_eq!(key("Ebm").relative_major().tonic().name(), "Gb");
        assert_eq!(key("F#m").relative_major().tonic().name(), "A");
        assert_eq!(c.relative(Mode::Dorian), key("Ddor"));
    }

    #[test]
    fn test_scale() {
        assert_eq!(names(&key("C").scale()), ["C", "D", "E", "F", "G", "A", "B"]);
        assert_eq!(names(&key("Ador").scale()), ["A", "B", "C", "D", "E", "F#", "G"]);
        assert_eq!(
            names(&key("C#m").scale()),
            ["C#", "D#", "E", "F#", "G#", "A", "B"]
        );
        assert_eq!(names(&key("Bb").scale()), ["Bb", "C", "D", "Eb", "F", "G", "A"]);
    }

    #[test]
    fn test_intervals() {
        for letter in Letter::ALL {
            let k = Key::new(PitchClass::from_spelling(Spelling::new(letter, 0)), Mode::Major);
            assert_eq!(k.intervals(), "WWHWWWH");
        }
        assert_eq!(key("Am").intervals(), "WHWWHWW");
        assert_eq!(key("Ddor").intervals(), "WHWWWHW");
    }
}
