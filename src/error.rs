//! # Error Types
//!
//! All fallible operations in the crate return [`EarTrainerError`].
//!
//! ## Error Types
//! - `InvalidPitchClass` / `InvalidNote` / `OctaveOutOfRange` - a note label could not be constructed
//! - `InvalidRange` - a range whose minimum lies above its maximum
//! - `RoundUngenerable` / `RangeTooNarrow` - no valid round under the current range
//! - `InvalidTempo` / `InvalidTempoInput` / `InvalidGuess` / `NoActiveRound` / `AlreadyAnswered` - session misuse
//! - `Config` / `Instrument` - collaborator failures
//!
//! Re-entrant playback is not an error; see [`crate::playback::PlaybackOutcome`].

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EarTrainerError {
    /// Pitch-class label outside the 12-symbol catalog.
    ///
    /// # Example
    /// ```
    /// # use ear_trainer::EarTrainerError;
    /// let err = EarTrainerError::InvalidPitchClass("H".to_string());
    /// assert_eq!(err.to_string(), "Invalid pitch class 'H' (expected one of C, C#, D, D#, E, F, F#, G, G#, A, A#, B)");
    /// ```
    #[error("Invalid pitch class '{0}' (expected one of C, C#, D, D#, E, F, F#, G, G#, A, A#, B)")]
    InvalidPitchClass(String),

    /// Octave outside the nameable range.
    #[error("Octave {0} is outside the supported range -1 to 9")]
    OctaveOutOfRange(i32),

    /// Tempo text that is not a whole number of beats per minute.
    #[error("Invalid tempo '{0}' (expected beats per minute, e.g. 100)")]
    InvalidTempoInput(String),

    /// Note identifier that is not `{pitchClass}{octave}`.
    #[error("Invalid note '{0}' (expected a pitch class followed by an octave, e.g. C#4)")]
    InvalidNote(String),

    /// Range whose minimum note lies above its maximum note.
    #[error("Invalid range: minimum note {min} is above maximum note {max}")]
    InvalidRange { min: String, max: String },

    /// No admissible base note was left for the named interval.
    #[error("Cannot generate a round: no valid base note for {interval} in the current range")]
    RoundUngenerable { interval: String },

    /// The range does not admit both interval types with distinct base notes.
    #[error("The selected note range is too narrow to generate different intervals with different base notes")]
    RangeTooNarrow,

    #[error("Tempo {0} BPM is outside the supported range")]
    InvalidTempo(u32),

    #[error("Invalid guess {0} (expected 1 or 2)")]
    InvalidGuess(u8),

    #[error("No round is in progress")]
    NoActiveRound,

    #[error("This round has already been answered")]
    AlreadyAnswered,

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Instrument error: {0}")]
    Instrument(String),
}
