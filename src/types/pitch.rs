//! Pitch classes (`C`, `F#`) and absolute pitches (`C4`, `Bb2`).

use crate::diagnostic::{Diagnosed, Diagnostic};
use crate::error::NotationError;
use crate::types::accidental::{Accidental, Letter};
use crate::types::interval::{SignedInterval, SimpleInterval};
use crate::Result;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, Sub};
use std::str::FromStr;

/// Default spellings for the twelve class values, preferring the common accidental.
const DEFAULT_SPELLINGS: [(Letter, i8); 12] = [
    (Letter::C, 0),
    (Letter::C, 1),
    (Letter::D, 0),
    (Letter::E, -1),
    (Letter::E, 0),
    (Letter::F, 0),
    (Letter::F, 1),
    (Letter::G, 0),
    (Letter::A, -1),
    (Letter::A, 0),
    (Letter::B, -1),
    (Letter::B, 0),
];

/// Letter plus a signed count of accidentals (positive sharps, negative flats).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Spelling {
    pub letter: Letter,
    pub alter: i8,
}

impl Spelling {
    pub const fn new(letter: Letter, alter: i8) -> Self {
        Self { letter, alter }
    }

    fn default_for(class_value: i32) -> Self {
        let (letter, alter) = DEFAULT_SPELLINGS[class_value.rem_euclid(12) as usize];
        Self { letter, alter }
    }

    /// Offset from C before wrapping, e.g. -1 for `Cb`.
    pub const fn raw_offset(&self) -> i32 {
        self.letter.natural_offset() + self.alter as i32
    }

    /// Single accidental kind, or `None` for naturals and triple (or more) alterations.
    pub fn accidental(&self) -> Option<Accidental> {
        match self.alter {
            0 => None,
            a => Accidental::from_semitones(a as i32),
        }
    }

    pub fn is_natural(&self) -> bool {
        self.alter == 0
    }

    /// ASCII name, e.g. `Ebb`.
    pub fn name(&self) -> String {
        self.render(Accidental::Sharp.ascii(), Accidental::Flat.ascii())
    }

    pub fn unicode_name(&self) -> String {
        match self.accidental() {
            Some(acc) => format!("{}{}", self.letter, acc.unicode()),
            None => self.render(Accidental::Sharp.unicode(), Accidental::Flat.unicode()),
        }
    }

    pub fn html_name(&self) -> String {
        match self.accidental() {
            Some(acc) => format!("{}{}", self.letter, acc.html()),
            None => self.render(Accidental::Sharp.html(), Accidental::Flat.html()),
        }
    }

    fn render(&self, sharp: &str, flat: &str) -> String {
        let mark = if self.alter > 0 { sharp } else { flat };
        let mut s = self.letter.to_string();
        for _ in 0..self.alter.unsigned_abs() {
            s.push_str(mark);
        }
        s
    }
}

impl fmt::Display for Spelling {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Mark {
    Sharp,
    Flat,
    Natural,
}

fn mark_of(c: char) -> Option<(Mark, i32)> {
    match c {
        '#' | '♯' => Some((Mark::Sharp, 1)),
        '𝄪' => Some((Mark::Sharp, 2)),
        'b' | '♭' => Some((Mark::Flat, -1)),
        '𝄫' => Some((Mark::Flat, -2)),
        '=' | '♮' => Some((Mark::Natural, 0)),
        _ => None,
    }
}

/// Letter and accidental marks of a class name, without range validation.
struct ScannedName {
    letter: Letter,
    marks: Vec<Mark>,
    alter: i32,
}

fn scan_class_name(name: &str) -> Option<ScannedName> {
    let mut chars = name.chars();
    let letter = Letter::from_char(chars.next()?)?;
    let mut marks = Vec::new();
    let mut alter = 0;
    for c in chars {
        let (mark, delta) = mark_of(c)?;
        marks.push(mark);
        alter += delta;
    }
    Some(ScannedName {
        letter,
        marks,
        alter,
    })
}

/// Chromatic value of a pitch class name relative to `root`.
///
/// Any number of sharps and flats is accepted here. A result outside 0..=11 (`Cb`,
/// `B##`) is reported as a diagnostic; with `wrap` the returned value is reduced
/// mod 12, otherwise it is returned as computed.
pub fn pitch_class_value(name: &str, root: PitchClass, wrap: bool) -> Result<Diagnosed<i32>> {
    let name = name.trim();
    let scanned =
        scan_class_name(name).ok_or_else(|| NotationError::InvalidPitchClass(name.to_string()))?;

    let raw = scanned.letter.natural_offset() + scanned.alter - root.value() as i32;
    let wrapped = raw.rem_euclid(12);
    let value = if wrap { wrapped } else { raw };

    if (0..12).contains(&raw) {
        Ok(Diagnosed::clean(value))
    } else {
        Ok(Diagnosed::with_diagnostic(
            value,
            Diagnostic::PitchClassOutOfRange {
                name: name.to_string(),
                raw,
                wrapped,
            },
        ))
    }
}

/// Parse a class name allowing one or two `#`/`b`, or a single `=`.
fn parse_spelling(name: &str) -> Result<Spelling> {
    let invalid = || NotationError::InvalidPitchClass(name.to_string());
    let scanned = scan_class_name(name).ok_or_else(invalid)?;

    if let Some(first) = scanned.marks.first() {
        if scanned.marks.iter().any(|m| m != first) {
            return Err(invalid());
        }
        match first {
            Mark::Natural if scanned.marks.len() > 1 => return Err(invalid()),
            Mark::Sharp | Mark::Flat if scanned.alter.abs() > 2 => return Err(invalid()),
            _ => {}
        }
    }

    Ok(Spelling::new(scanned.letter, scanned.alter as i8))
}

/// Pitch without octave. Compares by value only; the spelling is informational.
#[derive(Debug, Clone, Copy)]
pub struct PitchClass {
    value: u8,
    spelling: Option<Spelling>,
}

impl PitchClass {
    /// Class from a chromatic value relative to C, wrapped into 0..=11.
    pub fn new(value: i32) -> Self {
        Self {
            value: value.rem_euclid(12) as u8,
            spelling: None,
        }
    }

    pub fn from_spelling(spelling: Spelling) -> Self {
        Self {
            value: spelling.raw_offset().rem_euclid(12) as u8,
            spelling: Some(spelling),
        }
    }

    pub fn from_name(name: &str) -> Result<Self> {
        parse_spelling(name.trim()).map(Self::from_spelling)
    }

    /// Chromatic value relative to C (0..=11).
    pub fn value(&self) -> u8 {
        self.value
    }

    /// Chromatic value relative to another root (0..=11).
    pub fn value_relative_to(&self, root: PitchClass) -> u8 {
        (self.value as i32 - root.value as i32).rem_euclid(12) as u8
    }

    pub fn spelling(&self) -> Spelling {
        self.spelling
            .unwrap_or_else(|| Spelling::default_for(self.value as i32))
    }

    pub fn has_explicit_spelling(&self) -> bool {
        self.spelling.is_some()
    }

    pub fn name(&self) -> String {
        self.spelling().name()
    }

    pub fn unicode_name(&self) -> String {
        self.spelling().unicode_name()
    }

    pub fn html_name(&self) -> String {
        self.spelling().html_name()
    }

    /// Natural letter of the spelling.
    pub fn letter(&self) -> Letter {
        self.spelling().letter
    }

    pub fn accidental(&self) -> Option<Accidental> {
        self.spelling().accidental()
    }

    /// Same class spelled with sharps from the natural below.
    pub fn equivalent_sharp(&self) -> PitchClass {
        let below = *self - 1;
        let spelling = if below.spelling().is_natural() {
            Spelling::new(below.letter(), 1)
        } else {
            Spelling::new((*self - 2).letter(), 2)
        };
        Self::from_spelling(spelling)
    }

    /// Same class spelled with flats from the natural above.
    pub fn equivalent_flat(&self) -> PitchClass {
        let above = *self + 1;
        let spelling = if above.spelling().is_natural() {
            Spelling::new(above.letter(), -1)
        } else {
            Spelling::new((*self + 2).letter(), -2)
        };
        Self::from_spelling(spelling)
    }

    /// Natural spelling of the same class, when one exists.
    pub fn equivalent_natural(&self) -> Option<PitchClass> {
        let plain = Self::new(self.value as i32);
        plain.spelling().is_natural().then_some(plain)
    }

    pub fn to_pitch(&self, octave: i32) -> Pitch {
        Pitch::from_pitch_class(*self, octave)
    }
}

impl PartialEq for PitchClass {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for PitchClass {}

impl Hash for PitchClass {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.name())
    }
}

impl FromStr for PitchClass {
    type Err = NotationError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_name(s)
    }
}

impl Add<i32> for PitchClass {
    type Output = PitchClass;

    fn add(self, semitones: i32) -> PitchClass {
        PitchClass::new(self.value as i32 + semitones)
    }
}

impl Sub<i32> for PitchClass {
    type Output = PitchClass;

    fn sub(self, semitones: i32) -> PitchClass {
        PitchClass::new(self.value as i32 - semitones)
    }
}

impl Add<SimpleInterval> for PitchClass {
    type Output = PitchClass;

    fn add(self, interval: SimpleInterval) -> PitchClass {
        self + interval.value() as i32
    }
}

impl Sub for PitchClass {
    type Output = SimpleInterval;

    /// Upward distance from `other` to `self`, wrapped into 0..12.
    fn sub(self, other: PitchClass) -> SimpleInterval {
        SimpleInterval::from_class_distance(self.value as i32 - other.value as i32)
    }
}

/// Absolute pitch as semitones above C0 (C4 = 48).
#[derive(Debug, Clone, Copy)]
pub struct Pitch {
    value: i32,
    spelling: Option<Spelling>,
}

impl Pitch {
    pub fn new(value: i32) -> Self {
        Self {
            value,
            spelling: None,
        }
    }

    pub fn from_class_value(class_value: i32, octave: i32) -> Self {
        Self::new(class_value + 12 * octave)
    }

    /// Pitch of `pc` written in `octave`; a spelled `Cb` in octave 4 is B3.
    pub fn from_pitch_class(pc: PitchClass, octave: i32) -> Self {
        match pc.spelling {
            Some(spelling) => Self {
                value: spelling.raw_offset() + 12 * octave,
                spelling: Some(spelling),
            },
            None => Self::from_class_value(pc.value as i32, octave),
        }
    }

    /// Parse scientific pitch notation such as `C4`, `Bb2` or `F# 3`.
    pub fn from_name(name: &str) -> Result<Self> {
        let name = name.trim();
        let invalid = || NotationError::InvalidPitchName(name.to_string());

        let split = name
            .find(|c: char| c.is_ascii_digit() || c == '-' || c.is_whitespace())
            .ok_or_else(invalid)?;
        let (class_name, octave) = name.split_at(split);
        let octave: i32 = octave.trim_start().parse().map_err(|_| invalid())?;
        let spelling = parse_spelling(class_name).map_err(|_| invalid())?;

        Ok(Self::from_pitch_class(
            PitchClass::from_spelling(spelling),
            octave,
        ))
    }

    /// Nearest equal-tempered pitch (A4 = 440 Hz).
    pub fn from_frequency(frequency: f64) -> Result<Diagnosed<Self>> {
        if !(frequency.is_finite() && frequency > 0.0) {
            return Err(NotationError::InvalidFrequency(frequency.to_string()));
        }
        let key_number = 12.0 * (frequency / 440.0).log2() + 49.0;
        let nearest = key_number.round();
        let error = key_number - nearest;
        let pitch = Self::new(nearest as i32 + 8);

        if error.abs() > 0.01 {
            Ok(Diagnosed::with_diagnostic(
                pitch,
                Diagnostic::FrequencyRounded {
                    frequency,
                    cents: error * 100.0,
                },
            ))
        } else {
            Ok(Diagnosed::clean(pitch))
        }
    }

    pub fn value(&self) -> i32 {
        self.value
    }

    pub fn class_value(&self) -> u8 {
        self.value.rem_euclid(12) as u8
    }

    pub fn octave(&self) -> i32 {
        self.value.div_euclid(12)
    }

    pub fn spelling(&self) -> Spelling {
        self.spelling
            .unwrap_or_else(|| Spelling::default_for(self.value))
    }

    pub fn to_pitch_class(&self) -> PitchClass {
        PitchClass {
            value: self.class_value(),
            spelling: self.spelling,
        }
    }

    pub fn class_name(&self) -> String {
        self.spelling().name()
    }

    /// Octave number as written alongside the spelling; `Cb4` is written in
    /// octave 4 although it sounds in octave 3.
    pub fn written_octave(&self) -> i32 {
        (self.value - self.spelling().raw_offset()).div_euclid(12)
    }

    /// Scientific pitch notation, e.g. `C#4`.
    pub fn name(&self) -> String {
        format!("{}{}", self.class_name(), self.written_octave())
    }

    pub fn html_name(&self) -> String {
        format!(
            "{}<sub>{}</sub>",
            self.spelling().html_name(),
            self.written_octave()
        )
    }

    /// Piano key number; middle C (C4) is 40.
    pub fn piano_key_number(&self) -> i32 {
        self.value - 8
    }

    pub fn equal_temperament_frequency(&self) -> f64 {
        440.0 * 2f64.powf((self.piano_key_number() - 49) as f64 / 12.0)
    }

    /// Same pitch with the spelling dropped.
    pub fn unspelled(&self) -> Self {
        Self::new(self.value)
    }
}

impl PartialEq for Pitch {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for Pitch {}

impl Hash for Pitch {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl PartialOrd for Pitch {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pitch {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

impl fmt::Display for Pitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.name())
    }
}

impl FromStr for Pitch {
    type Err = NotationError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_name(s)
    }
}

impl Add<i32> for Pitch {
    type Output = Pitch;

    fn add(self, semitones: i32) -> Pitch {
        Pitch::new(self.value + semitones)
    }
}

impl Sub<i32> for Pitch {
    type Output = Pitch;

    fn sub(self, semitones: i32) -> Pitch {
        Pitch::new(self.value - semitones)
    }
}

impl Add<SimpleInterval> for Pitch {
    type Output = Pitch;

    fn add(self, interval: SimpleInterval) -> Pitch {
        self + interval.value() as i32
    }
}

impl Sub<SimpleInterval> for Pitch {
    type Output = Pitch;

    fn sub(self, interval: SimpleInterval) -> Pitch {
        self - interval.value() as i32
    }
}

impl Sub for Pitch {
    type Output = SignedInterval;

    fn sub(self, other: Pitch) -> SignedInterval {
        SignedInterval::new(self.value - other.value)
    }
}
