//! # Round Generation
//!
//! Builds one comparison round: a minor second and a major second placed in
//! random order, each on a random valid base note, with distinct base pitches.
//!
//! ## Steps
//! 1. A coin flip decides which interval type comes first.
//! 2. The first pair draws uniformly from the valid base notes of its interval.
//! 3. The second pair draws uniformly from the valid base notes of the other
//!    interval, excluding the first pair's base pitch.
//! 4. `larger_of` names the pair with more semitones.
//!
//! There is no retry: if either draw has no candidates the attempt fails with
//! [`EarTrainerError::RoundUngenerable`]. Retrying is the session's decision.
//!
//! ## Randomness
//! All draws go through [`RandomSource`], which every `rand::Rng` implements,
//! so tests can pass a seeded `StdRng`.

use std::fmt;

use log::debug;
use serde::Serialize;

use crate::error::EarTrainerError;
use crate::note::{Interval, IntervalKind, Note};
use crate::range::{NoteRange, ROUND_INTERVALS};

/// Uniform random choices used by the generator
pub trait RandomSource {
    /// Fair coin
    fn coin_flip(&mut self) -> bool;

    /// Uniform index in `0..len`; `len` is never zero
    fn pick_index(&mut self, len: usize) -> usize;
}

impl<R: rand::Rng + ?Sized> RandomSource for R {
    fn coin_flip(&mut self) -> bool {
        self.gen_bool(0.5)
    }

    fn pick_index(&mut self, len: usize) -> usize {
        self.gen_range(0..len)
    }
}

/// One playable example: a base note and the note an interval above it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntervalPair {
    base_note: Note,
    interval: Interval,
    second_note: Note,
}

impl IntervalPair {
    pub fn new(base_note: Note, interval: Interval) -> Self {
        Self {
            base_note,
            interval,
            second_note: base_note.add_interval(&interval),
        }
    }

    pub fn base_note(&self) -> Note {
        self.base_note
    }

    pub fn interval(&self) -> Interval {
        self.interval
    }

    pub fn second_note(&self) -> Note {
        self.second_note
    }
}

impl fmt::Display for IntervalPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {} ({})", self.base_note, self.second_note, self.interval)
    }
}

/// Which of the two pairs in a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Choice {
    First,
    Second,
}

impl Choice {
    pub fn number(self) -> u8 {
        match self {
            Choice::First => 1,
            Choice::Second => 2,
        }
    }

    pub fn ordinal(self) -> &'static str {
        match self {
            Choice::First => "first",
            Choice::Second => "second",
        }
    }
}

impl TryFrom<u8> for Choice {
    type Error = EarTrainerError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Choice::First),
            2 => Ok(Choice::Second),
            other => Err(EarTrainerError::InvalidGuess(other)),
        }
    }
}

/// Identity of a round, used to auto-play each distinct round once
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RoundKey {
    pub pair1_base: i32,
    pub pair1_semitones: i32,
    pub pair2_base: i32,
    pub pair2_semitones: i32,
}

/// Two interval pairs to compare and the answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Round {
    pair1: IntervalPair,
    pair2: IntervalPair,
    larger_of: Choice,
}

impl Round {
    pub fn pair1(&self) -> &IntervalPair {
        &self.pair1
    }

    pub fn pair2(&self) -> &IntervalPair {
        &self.pair2
    }

    pub fn pair(&self, choice: Choice) -> &IntervalPair {
        match choice {
            Choice::First => &self.pair1,
            Choice::Second => &self.pair2,
        }
    }

    pub fn larger_of(&self) -> Choice {
        self.larger_of
    }

    pub fn is_correct(&self, guess: Choice) -> bool {
        guess == self.larger_of
    }

    pub fn key(&self) -> RoundKey {
        RoundKey {
            pair1_base: self.pair1.base_note.pitch_number(),
            pair1_semitones: self.pair1.interval.semitones,
            pair2_base: self.pair2.base_note.pitch_number(),
            pair2_semitones: self.pair2.interval.semitones,
        }
    }

    /// (base, second) notes of both pairs in playing order
    pub fn note_pairs(&self) -> [(Note, Note); 2] {
        [
            (self.pair1.base_note, self.pair1.second_note),
            (self.pair2.base_note, self.pair2.second_note),
        ]
    }
}

/// Build one pair for `kind`, drawing the base note uniformly from the valid
/// base notes of the range minus `exclude`.
pub fn generate_pair<R: RandomSource + ?Sized>(
    range: &NoteRange,
    kind: IntervalKind,
    exclude: Option<&Note>,
    rng: &mut R,
) -> Result<IntervalPair, EarTrainerError> {
    let interval = Interval::of(kind);
    let candidates: Vec<Note> = range
        .valid_base_notes(&interval)
        .into_iter()
        .filter(|note| exclude.map_or(true, |ex| ex.pitch_number() != note.pitch_number()))
        .collect();

    if candidates.is_empty() {
        debug!("no base note left for {} in {}..={}", interval.name, range.min(), range.max());
        return Err(EarTrainerError::RoundUngenerable {
            interval: interval.name.to_string(),
        });
    }

    let base = candidates[rng.pick_index(candidates.len())];
    Ok(IntervalPair::new(base, interval))
}

/// Generate a round from the range in a single attempt.
///
/// # Errors
/// [`EarTrainerError::RoundUngenerable`] when either pair has no candidate
/// base note. Never returns a partially built round.
pub fn generate_round<R: RandomSource + ?Sized>(
    range: &NoteRange,
    rng: &mut R,
) -> Result<Round, EarTrainerError> {
    let [a, b] = ROUND_INTERVALS;
    let (first, second) = if rng.coin_flip() { (a, b) } else { (b, a) };

    let pair1 = generate_pair(range, first, None, rng)?;
    let pair2 = generate_pair(range, second, Some(&pair1.base_note), rng)?;

    let larger_of = if pair1.interval.semitones > pair2.interval.semitones {
        Choice::First
    } else {
        Choice::Second
    };

    debug!("generated round: 1) {} 2) {}", pair1, pair2);
    Ok(Round {
        pair1,
        pair2,
        larger_of,
    })
}
