//! # Note and Interval Types
//!
//! This module defines the value types the rest of the crate is built on.
//!
//! ## Type Hierarchy
//! ```text
//! Note
//!   ├── pitch_class: PitchClass (C, C#, D, ... B)
//!   ├── octave: i32
//!   └── pitch_number: i32   (canonical compare key)
//!
//! Interval
//!   ├── kind: IntervalKind (MinorSecond | MajorSecond)
//!   ├── name: &'static str
//!   └── semitones: i32
//! ```
//!
//! ## Pitch Numbers
//! `pitch_number = (octave + 1) * 12 + chromatic_index(pitch_class)`, so C4 = 60
//! and A4 = 69, matching MIDI numbering. The mapping is a bijection over every
//! integer: octave is `floor(n / 12) - 1` and the pitch class is `n mod 12`
//! with a non-negative remainder, so negative pitch numbers land in octave -2
//! and below.
//!
//! ## Octave Bounds
//! Notes built from a name and octave (including parsed identifiers and
//! config values) must have an octave in `MIN_OCTAVE..=MAX_OCTAVE` (C-1 to
//! B9, pitch numbers 0 to 131). `from_pitch_number` stays total, but such
//! notes are rejected by [`crate::range::NoteRange`] unless playable.
//!
//! ## Note Identifiers
//! Instruments address notes as `{pitchClass}{octave}`, e.g. `C#4` or `A-1`.
//! [`Note`] implements `Display` and `FromStr` for that form and serializes as
//! the same string.
//!
//! ## Related Modules
//! - `range` - filters notes by range and interval admissibility
//! - `generator` - builds interval pairs from these types
//! - `playback` - sends note identifiers to an instrument

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EarTrainerError;

/// One of the 12 chromatic pitch classes (sharps only)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PitchClass {
    C,
    CSharp,
    D,
    DSharp,
    E,
    F,
    FSharp,
    G,
    GSharp,
    A,
    ASharp,
    B,
}

impl PitchClass {
    /// All pitch classes in chromatic order starting at C
    pub const ALL: [PitchClass; 12] = [
        PitchClass::C,
        PitchClass::CSharp,
        PitchClass::D,
        PitchClass::DSharp,
        PitchClass::E,
        PitchClass::F,
        PitchClass::FSharp,
        PitchClass::G,
        PitchClass::GSharp,
        PitchClass::A,
        PitchClass::ASharp,
        PitchClass::B,
    ];

    /// Semitone offset from C (C=0, B=11)
    pub fn chromatic_index(self) -> i32 {
        match self {
            PitchClass::C => 0,
            PitchClass::CSharp => 1,
            PitchClass::D => 2,
            PitchClass::DSharp => 3,
            PitchClass::E => 4,
            PitchClass::F => 5,
            PitchClass::FSharp => 6,
            PitchClass::G => 7,
            PitchClass::GSharp => 8,
            PitchClass::A => 9,
            PitchClass::ASharp => 10,
            PitchClass::B => 11,
        }
    }

    /// Pitch class for a chromatic index; any integer is reduced mod 12
    pub fn from_chromatic_index(index: i32) -> Self {
        Self::ALL[index.rem_euclid(12) as usize]
    }

    pub fn label(self) -> &'static str {
        match self {
            PitchClass::C => "C",
            PitchClass::CSharp => "C#",
            PitchClass::D => "D",
            PitchClass::DSharp => "D#",
            PitchClass::E => "E",
            PitchClass::F => "F",
            PitchClass::FSharp => "F#",
            PitchClass::G => "G",
            PitchClass::GSharp => "G#",
            PitchClass::A => "A",
            PitchClass::ASharp => "A#",
            PitchClass::B => "B",
        }
    }
}

impl FromStr for PitchClass {
    type Err = EarTrainerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|pc| pc.label() == s)
            .ok_or_else(|| EarTrainerError::InvalidPitchClass(s.to_string()))
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Lowest octave a note can be named in
pub const MIN_OCTAVE: i32 = -1;
/// Highest octave a note can be named in
pub const MAX_OCTAVE: i32 = 9;

/// A playable pitch in 12-tone equal temperament
///
/// Immutable once built. Equality and ordering follow `pitch_number`, which
/// fully determines the pitch class and octave.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Note {
    pitch_class: PitchClass,
    octave: i32,
    pitch_number: i32,
}

impl Note {
    /// Build a note from a pitch-class label ("C", "C#", ... "B") and an octave.
    ///
    /// # Errors
    /// [`EarTrainerError::InvalidPitchClass`] if `name` is not one of the 12 labels.
    /// Flats and lowercase labels are rejected rather than coerced.
    /// [`EarTrainerError::OctaveOutOfRange`] outside `MIN_OCTAVE..=MAX_OCTAVE`.
    pub fn from_name(name: &str, octave: i32) -> Result<Self, EarTrainerError> {
        let pitch_class: PitchClass = name.parse()?;
        Self::new(pitch_class, octave)
    }

    /// # Errors
    /// [`EarTrainerError::OctaveOutOfRange`] outside `MIN_OCTAVE..=MAX_OCTAVE`.
    pub fn new(pitch_class: PitchClass, octave: i32) -> Result<Self, EarTrainerError> {
        if !(MIN_OCTAVE..=MAX_OCTAVE).contains(&octave) {
            return Err(EarTrainerError::OctaveOutOfRange(octave));
        }
        Ok(Self {
            pitch_class,
            octave,
            pitch_number: (octave + 1) * 12 + pitch_class.chromatic_index(),
        })
    }

    /// Build a note from a raw pitch number. Total over all integers.
    pub fn from_pitch_number(pitch_number: i32) -> Self {
        Self {
            pitch_class: PitchClass::from_chromatic_index(pitch_number),
            octave: pitch_number.div_euclid(12) - 1,
            pitch_number,
        }
    }

    pub fn pitch_class(&self) -> PitchClass {
        self.pitch_class
    }

    pub fn name(&self) -> &'static str {
        self.pitch_class.label()
    }

    pub fn octave(&self) -> i32 {
        self.octave
    }

    pub fn pitch_number(&self) -> i32 {
        self.pitch_number
    }

    /// Whether the octave lies in `MIN_OCTAVE..=MAX_OCTAVE`
    pub fn is_playable(&self) -> bool {
        (MIN_OCTAVE..=MAX_OCTAVE).contains(&self.octave)
    }

    /// The note `interval.semitones` above this one. Never fails; callers
    /// check range admissibility beforehand. Saturates at `i32::MAX`.
    pub fn add_interval(&self, interval: &Interval) -> Note {
        Note::from_pitch_number(self.pitch_number.saturating_add(interval.semitones))
    }

    /// Frequency in Hz (A4 = 440 Hz)
    pub fn frequency(&self) -> f64 {
        440.0 * 2.0_f64.powf((self.pitch_number - 69) as f64 / 12.0)
    }
}

impl PartialOrd for Note {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Note {
    fn cmp(&self, other: &Self) -> Ordering {
        self.pitch_number.cmp(&other.pitch_number)
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.pitch_class, self.octave)
    }
}

impl FromStr for Note {
    type Err = EarTrainerError;

    /// Parse an instrument identifier such as `C4`, `F#3` or `B-1`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let label_len = match trimmed.as_bytes() {
            [_, b'#', ..] => 2,
            [_, ..] => 1,
            [] => return Err(EarTrainerError::InvalidNote(s.to_string())),
        };
        // a multi-byte first character cannot start a pitch class
        if !trimmed.is_char_boundary(label_len) {
            return Err(EarTrainerError::InvalidPitchClass(trimmed.to_string()));
        }
        let (label, octave) = trimmed.split_at(label_len);
        let pitch_class: PitchClass = label.parse()?;
        let octave: i32 = octave
            .parse()
            .map_err(|_| EarTrainerError::InvalidNote(s.to_string()))?;
        Note::new(pitch_class, octave)
    }
}

impl TryFrom<String> for Note {
    type Error = EarTrainerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Note> for String {
    fn from(note: Note) -> Self {
        note.to_string()
    }
}

/// Semantic identity of an interval in the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum IntervalKind {
    MinorSecond,
    MajorSecond,
}

/// A fixed musical distance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Interval {
    pub kind: IntervalKind,
    pub name: &'static str,
    pub semitones: i32,
}

impl Interval {
    /// Catalog entry for a kind
    pub const fn of(kind: IntervalKind) -> Self {
        match kind {
            IntervalKind::MinorSecond => Interval {
                kind,
                name: "Minor Second",
                semitones: 1,
            },
            IntervalKind::MajorSecond => Interval {
                kind,
                name: "Major Second",
                semitones: 2,
            },
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} semitones)", self.name, self.semitones)
    }
}

/// Every interval the exercise knows, smallest first
pub const INTERVALS: [Interval; 2] = [
    Interval::of(IntervalKind::MinorSecond),
    Interval::of(IntervalKind::MajorSecond),
];

/// Lowest note offered by the range selector (C2)
pub const DEFAULT_MIN_NOTE: Note = Note {
    pitch_class: PitchClass::C,
    octave: 2,
    pitch_number: 36,
};

/// Highest note offered by the range selector (B5)
pub const DEFAULT_MAX_NOTE: Note = Note {
    pitch_class: PitchClass::B,
    octave: 5,
    pitch_number: 83,
};

/// Notes the range selector offers, C2 through B5 ascending
pub fn selectable_notes() -> Vec<Note> {
    (DEFAULT_MIN_NOTE.pitch_number..=DEFAULT_MAX_NOTE.pitch_number)
        .map(Note::from_pitch_number)
        .collect()
}

/// Selectable minimum notes that keep `min <= max`
pub fn selectable_min_notes(max: Note) -> Vec<Note> {
    selectable_notes().into_iter().filter(|n| *n <= max).collect()
}

/// Selectable maximum notes that keep `min <= max`
pub fn selectable_max_notes(min: Note) -> Vec<Note> {
    selectable_notes().into_iter().filter(|n| *n >= min).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_middle_c_pitch_number() {
        let c4 = Note::from_name("C", 4).unwrap();
        assert_eq!(c4.pitch_number(), 60);
        assert_eq!(Note::from_name("A", 4).unwrap().pitch_number(), 69);
        assert_eq!(Note::from_name("C", -1).unwrap().pitch_number(), 0);
    }

    #[test]
    fn test_invalid_pitch_class() {
        assert_eq!(
            Note::from_name("Db", 4),
            Err(EarTrainerError::InvalidPitchClass("Db".to_string()))
        );
        assert!(Note::from_name("c", 4).is_err());
        assert!(Note::from_name("", 4).is_err());
    }

    #[test]
    fn test_from_pitch_number() {
        let note = Note::from_pitch_number(61);
        assert_eq!(note.name(), "C#");
        assert_eq!(note.octave(), 4);

        let b3 = Note::from_pitch_number(59);
        assert_eq!(b3.pitch_class(), PitchClass::B);
        assert_eq!(b3.octave(), 3);
    }

    #[test]
    fn test_from_pitch_number_negative() {
        // floor(-1 / 12) - 1 = -2, and -1 mod 12 = 11
        let note = Note::from_pitch_number(-1);
        assert_eq!(note.pitch_class(), PitchClass::B);
        assert_eq!(note.octave(), -2);
        assert_eq!(note.to_string(), "B-2");
    }

    #[test]
    fn test_pitch_number_bijection() {
        for n in 0..=131 {
            let note = Note::from_pitch_number(n);
            let rebuilt = Note::from_name(note.name(), note.octave()).unwrap();
            assert_eq!(rebuilt.pitch_number(), n);
            assert_eq!(rebuilt, note);
        }
    }

    #[test]
    fn test_octave_bounds() {
        assert_eq!(Note::from_name("C", 10), Err(EarTrainerError::OctaveOutOfRange(10)));
        assert_eq!(Note::from_name("B", -2), Err(EarTrainerError::OctaveOutOfRange(-2)));
        assert_eq!(Note::from_name("B", 9).unwrap().pitch_number(), 131);
        assert_eq!(
            "C999999999".parse::<Note>(),
            Err(EarTrainerError::OctaveOutOfRange(999_999_999))
        );
        assert!("B-10000000".parse::<Note>().is_err());
        assert!(matches!("C99999999999".parse::<Note>(), Err(EarTrainerError::InvalidNote(_))));
        assert!(!Note::from_pitch_number(-1).is_playable());
        assert!(Note::from_pitch_number(0).is_playable());
    }

    #[test]
    fn test_add_interval_saturates() {
        let top = Note::from_pitch_number(i32::MAX);
        let above = top.add_interval(&Interval::of(IntervalKind::MajorSecond));
        assert_eq!(above.pitch_number(), i32::MAX);
    }

    #[test]
    fn test_add_interval() {
        let b4 = Note::from_name("B", 4).unwrap();
        let minor = Interval::of(IntervalKind::MinorSecond);
        let major = Interval::of(IntervalKind::MajorSecond);
        assert_eq!(b4.add_interval(&minor).to_string(), "C5");
        assert_eq!(b4.add_interval(&major).to_string(), "C#5");
    }

    #[test]
    fn test_note_identifier_round_trip() {
        for id in ["C4", "C#4", "A#0", "B-1", "G#5", "B9"] {
            let note: Note = id.parse().unwrap();
            assert_eq!(note.to_string(), id);
        }
    }

    #[test]
    fn test_note_identifier_errors() {
        assert!(matches!("H4".parse::<Note>(), Err(EarTrainerError::InvalidPitchClass(_))));
        assert!(matches!("C".parse::<Note>(), Err(EarTrainerError::InvalidNote(_))));
        assert!(matches!("C#x".parse::<Note>(), Err(EarTrainerError::InvalidNote(_))));
        assert!(matches!("".parse::<Note>(), Err(EarTrainerError::InvalidNote(_))));
        assert!("é4".parse::<Note>().is_err());
    }

    #[test]
    fn test_a4_frequency() {
        let a4: Note = "A4".parse().unwrap();
        assert!((a4.frequency() - 440.0).abs() < 1e-9);
        let a5: Note = "A5".parse().unwrap();
        assert!((a5.frequency() - 880.0).abs() < 1e-9);
    }

    #[test]
    fn test_interval_catalog() {
        assert_eq!(INTERVALS.len(), 2);
        assert!(INTERVALS.windows(2).all(|w| w[0].semitones < w[1].semitones));
        for interval in INTERVALS {
            assert_eq!(Interval::of(interval.kind), interval);
        }
        assert_eq!(
            Interval::of(IntervalKind::MajorSecond).to_string(),
            "Major Second (2 semitones)"
        );
    }

    #[test]
    fn test_selectable_notes() {
        let notes = selectable_notes();
        assert_eq!(notes.len(), 48);
        assert_eq!(notes[0], DEFAULT_MIN_NOTE);
        assert_eq!(notes[47], DEFAULT_MAX_NOTE);
        assert_eq!(DEFAULT_MIN_NOTE, Note::from_name("C", 2).unwrap());
        assert_eq!(DEFAULT_MAX_NOTE, Note::from_name("B", 5).unwrap());

        let e4: Note = "E4".parse().unwrap();
        assert!(selectable_max_notes(e4).iter().all(|n| *n >= e4));
        assert!(selectable_min_notes(e4).iter().all(|n| *n <= e4));
        assert_eq!(
            selectable_max_notes(e4).len() + selectable_min_notes(e4).len(),
            49
        );
    }

    #[test]
    fn test_note_serde_as_identifier() {
        let note: Note = serde_yaml::from_str("F#3").unwrap();
        assert_eq!(note.pitch_number(), 54);
        let yaml = serde_yaml::to_string(&note).unwrap();
        assert!(yaml.contains("F#3"));
        let back: Note = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(back, note);
        assert!(serde_yaml::from_str::<Note>("Gb3").is_err());
    }
}
