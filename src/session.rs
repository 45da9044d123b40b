//! # Game Session
//!
//! Owns everything a front end needs between rounds: the selected range and
//! tempo, the current round, the score, and the feedback for the last guess.
//!
//! ## Round Lifecycle
//! ```text
//! (no round) --new_round--> active --guess--> answered --new_round--> active ...
//!      ^                                          |
//!      +---- set_min_note / set_max_note / reset_score
//! ```
//!
//! Changing either end of the range discards the current round. Rounds are
//! only generated when [`GameSession::can_generate`] holds; a single failed
//! draw is retried with fresh random choices up to
//! [`MAX_GENERATION_ATTEMPTS`] times before the failure is returned.
//!
//! The session does not play audio. [`GameSession::take_autoplay`] hands out
//! each distinct round once so a front end can play it automatically without
//! repeating it on redraw.

use log::{info, warn};
use serde::Serialize;

use crate::config::SessionConfig;
use crate::error::EarTrainerError;
use crate::generator::{generate_round, Choice, RandomSource, Round, RoundKey};
use crate::note::Note;
use crate::playback::PlaybackTiming;
use crate::range::NoteRange;

/// Fresh draws attempted by [`GameSession::new_round`] before giving up
pub const MAX_GENERATION_ATTEMPTS: usize = 16;

/// Shown instead of the play controls when the range cannot produce a round
pub const RANGE_TOO_NARROW_MESSAGE: &str =
    "The selected note range is too narrow to generate different intervals with different base notes. Please expand the range.";

/// Result of answering a round
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GuessOutcome {
    pub correct: bool,
    pub larger_of: Choice,
    pub feedback: String,
}

#[derive(Debug, Clone)]
pub struct GameSession {
    range: NoteRange,
    tempo_bpm: u32,
    timing: PlaybackTiming,
    velocity: f32,
    round: Option<Round>,
    feedback: Option<String>,
    score: u32,
    total_questions: u32,
    last_autoplayed: Option<RoundKey>,
}

impl GameSession {
    pub fn new(config: &SessionConfig) -> Result<Self, EarTrainerError> {
        config.validate()?;
        Ok(Self {
            range: NoteRange::new(config.min_note, config.max_note)?,
            tempo_bpm: config.tempo_bpm,
            timing: PlaybackTiming::from_bpm(config.tempo_bpm)?,
            velocity: config.velocity,
            round: None,
            feedback: None,
            score: 0,
            total_questions: 0,
            last_autoplayed: None,
        })
    }

    pub fn range(&self) -> &NoteRange {
        &self.range
    }

    pub fn tempo_bpm(&self) -> u32 {
        self.tempo_bpm
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn timing(&self) -> PlaybackTiming {
        self.timing
    }

    pub fn round(&self) -> Option<&Round> {
        self.round.as_ref()
    }

    pub fn feedback(&self) -> Option<&str> {
        self.feedback.as_deref()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn total_questions(&self) -> u32 {
        self.total_questions
    }

    /// Rounded percentage of correct answers, `None` before the first answer
    pub fn accuracy_percent(&self) -> Option<u32> {
        if self.total_questions == 0 {
            return None;
        }
        Some((self.score as f64 * 100.0 / self.total_questions as f64).round() as u32)
    }

    /// A round is waiting for a guess
    pub fn is_active(&self) -> bool {
        self.round.is_some() && self.feedback.is_none()
    }

    pub fn can_generate(&self) -> bool {
        self.range.can_generate_round()
    }

    /// Corrective message while the range cannot produce a round
    pub fn range_warning(&self) -> Option<&'static str> {
        if self.can_generate() {
            None
        } else {
            Some(RANGE_TOO_NARROW_MESSAGE)
        }
    }

    pub fn set_min_note(&mut self, note: Note) -> Result<(), EarTrainerError> {
        self.range = self.range.with_min(note)?;
        info!("range changed to {}..={}", self.range.min(), self.range.max());
        self.discard_round();
        Ok(())
    }

    pub fn set_max_note(&mut self, note: Note) -> Result<(), EarTrainerError> {
        self.range = self.range.with_max(note)?;
        info!("range changed to {}..={}", self.range.min(), self.range.max());
        self.discard_round();
        Ok(())
    }

    pub fn set_tempo(&mut self, bpm: u32) -> Result<(), EarTrainerError> {
        self.timing = PlaybackTiming::from_bpm(bpm)?;
        self.tempo_bpm = bpm;
        Ok(())
    }

    /// Replace the current round with a freshly generated one.
    ///
    /// # Errors
    /// - [`EarTrainerError::RangeTooNarrow`] when the range cannot produce a round
    /// - [`EarTrainerError::RoundUngenerable`] when every attempt failed
    pub fn new_round<R: RandomSource + ?Sized>(
        &mut self,
        rng: &mut R,
    ) -> Result<&Round, EarTrainerError> {
        if !self.can_generate() {
            return Err(EarTrainerError::RangeTooNarrow);
        }

        let mut last_err = EarTrainerError::RangeTooNarrow;
        for attempt in 1..=MAX_GENERATION_ATTEMPTS {
            match generate_round(&self.range, rng) {
                Ok(round) => {
                    self.feedback = None;
                    let round: &Round = self.round.insert(round);
                    return Ok(round);
                }
                Err(e) => {
                    warn!("round generation attempt {} failed: {}", attempt, e);
                    last_err = e;
                }
            }
        }
        Err(last_err)
    }

    /// The current round if it has not been handed out for auto-play yet
    pub fn take_autoplay(&mut self) -> Option<Round> {
        let round = self.round?;
        let key = round.key();
        if self.last_autoplayed == Some(key) {
            return None;
        }
        self.last_autoplayed = Some(key);
        Some(round)
    }

    /// Answer the current round.
    ///
    /// # Errors
    /// - [`EarTrainerError::NoActiveRound`] before any round is generated
    /// - [`EarTrainerError::AlreadyAnswered`] when the round already has feedback
    pub fn guess(&mut self, guess: Choice) -> Result<GuessOutcome, EarTrainerError> {
        let round = self.round.ok_or(EarTrainerError::NoActiveRound)?;
        if self.feedback.is_some() {
            return Err(EarTrainerError::AlreadyAnswered);
        }

        let larger_of = round.larger_of();
        let correct = round.is_correct(guess);
        self.total_questions += 1;
        if correct {
            self.score += 1;
        }

        let feedback = if correct {
            format!("Correct! The {} interval was larger.", larger_of.ordinal())
        } else {
            format!(
                "Incorrect. The {} interval ({}) was larger.",
                larger_of.ordinal(),
                round.pair(larger_of).interval()
            )
        };
        info!(
            "guess {} was {} ({}/{})",
            guess.number(),
            if correct { "correct" } else { "incorrect" },
            self.score,
            self.total_questions
        );
        self.feedback = Some(feedback.clone());

        Ok(GuessOutcome {
            correct,
            larger_of,
            feedback,
        })
    }

    /// Clear the score along with the current round
    pub fn reset_score(&mut self) {
        self.score = 0;
        self.total_questions = 0;
        self.discard_round();
    }

    fn discard_round(&mut self) {
        self.round = None;
        self.feedback = None;
    }
}
