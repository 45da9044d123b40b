//! # Range Validity
//!
//! Decides which base notes can carry an interval without leaving the
//! selected pitch range, and whether a range can produce a round at all.
//!
//! ## Rules
//! - A base note admits an interval when `base + semitones <= max`. The
//!   minimum is not consulted; base notes are drawn from inside the range.
//! - A range can produce a round when every interval in the round has at
//!   least one valid base note and the valid base notes add up to at least 2,
//!   since the two pairs of a round must start on different pitches.
//!
//! An empty list of base notes is a normal answer, not an error. Callers are
//! expected to check [`can_generate_round`] whenever the range changes and
//! disable play when it is false.

use serde::{Deserialize, Serialize};

use crate::error::EarTrainerError;
use crate::note::{Interval, IntervalKind, Note};

/// Interval types compared within one round.
///
/// `INTERVALS` lists every interval the crate can name; this is the pair a
/// round puts against each other. Each entry must appear in `INTERVALS` and
/// the two must differ in size so a round never ties.
pub const ROUND_INTERVALS: [IntervalKind; 2] = [IntervalKind::MinorSecond, IntervalKind::MajorSecond];

/// Inclusive pitch range with `min <= max`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawRange")]
pub struct NoteRange {
    min: Note,
    max: Note,
}

#[derive(Deserialize)]
struct RawRange {
    min: Note,
    max: Note,
}

impl TryFrom<RawRange> for NoteRange {
    type Error = EarTrainerError;

    fn try_from(raw: RawRange) -> Result<Self, Self::Error> {
        NoteRange::new(raw.min, raw.max)
    }
}

impl NoteRange {
    /// # Errors
    /// - [`EarTrainerError::OctaveOutOfRange`] when either bound is not playable
    /// - [`EarTrainerError::InvalidRange`] when `min` lies above `max`. The
    ///   bounds are never swapped.
    pub fn new(min: Note, max: Note) -> Result<Self, EarTrainerError> {
        for bound in [min, max] {
            if !bound.is_playable() {
                return Err(EarTrainerError::OctaveOutOfRange(bound.octave()));
            }
        }
        if min > max {
            return Err(EarTrainerError::InvalidRange {
                min: min.to_string(),
                max: max.to_string(),
            });
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> Note {
        self.min
    }

    pub fn max(&self) -> Note {
        self.max
    }

    pub fn with_min(&self, min: Note) -> Result<Self, EarTrainerError> {
        Self::new(min, self.max)
    }

    pub fn with_max(&self, max: Note) -> Result<Self, EarTrainerError> {
        Self::new(self.min, max)
    }

    pub fn contains(&self, note: &Note) -> bool {
        self.min <= *note && *note <= self.max
    }

    pub fn notes(&self) -> Vec<Note> {
        all_notes_in_range(&self.min, &self.max)
    }

    pub fn valid_base_notes(&self, interval: &Interval) -> Vec<Note> {
        valid_base_notes(&self.min, &self.max, interval)
    }

    pub fn can_generate_round(&self) -> bool {
        can_generate_round(&self.min, &self.max)
    }
}

/// Every note from `min` to `max` inclusive, ascending. Empty if `min > max`.
///
/// The result holds one note per semitone; [`NoteRange`] keeps that bounded.
pub fn all_notes_in_range(min: &Note, max: &Note) -> Vec<Note> {
    (min.pitch_number()..=max.pitch_number())
        .map(Note::from_pitch_number)
        .collect()
}

/// Whether `note + interval` stays at or below `max`
pub fn can_place_interval(note: &Note, interval: &Interval, max: &Note) -> bool {
    i64::from(note.pitch_number()) + i64::from(interval.semitones) <= i64::from(max.pitch_number())
}

/// Notes in `[min, max]` from which `interval` can be played without
/// exceeding `max`
pub fn valid_base_notes(min: &Note, max: &Note, interval: &Interval) -> Vec<Note> {
    all_notes_in_range(min, max)
        .into_iter()
        .filter(|note| can_place_interval(note, interval, max))
        .collect()
}

/// Whether the range `[min, max]` admits a round of [`ROUND_INTERVALS`].
///
/// This is a necessary condition only: a range that passes can still fail a
/// single generation attempt when the first pair takes the only base note
/// left for the second interval.
pub fn can_generate_round(min: &Note, max: &Note) -> bool {
    let counts: Vec<usize> = ROUND_INTERVALS
        .iter()
        .map(|kind| valid_base_notes(min, max, &Interval::of(*kind)).len())
        .collect();
    counts.iter().all(|count| *count >= 1) && counts.iter().sum::<usize>() >= 2
}
