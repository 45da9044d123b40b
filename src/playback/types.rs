//! Playback timing and outcome types

use serde::Serialize;

use crate::error::EarTrainerError;

/// Slowest tempo the tempo control offers
pub const MIN_BPM: u32 = 40;
/// Fastest tempo the tempo control offers
pub const MAX_BPM: u32 = 200;
pub const DEFAULT_BPM: u32 = 100;

/// Note-on velocity used when none is configured (0.0 - 1.0)
pub const DEFAULT_VELOCITY: f32 = 0.8;

/// Millisecond timing consumed by the sequencer
///
/// # Fields
/// - `note_duration_ms`: how long each note sounds
/// - `gap_between_notes_ms`: wait between the two notes of one interval
/// - `gap_between_intervals_ms`: wait between one interval's end and the next one's start
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackTiming {
    pub note_duration_ms: u64,
    pub gap_between_notes_ms: u64,
    pub gap_between_intervals_ms: u64,
}

impl PlaybackTiming {
    /// Map a tempo to note and gap durations.
    ///
    /// `beat = 60000 / bpm`; a note lasts one beat, the gap inside an interval
    /// a quarter beat, and the gap between intervals two beats, each rounded
    /// to the nearest millisecond.
    ///
    /// # Errors
    /// [`EarTrainerError::InvalidTempo`] outside `MIN_BPM..=MAX_BPM`.
    pub fn from_bpm(bpm: u32) -> Result<Self, EarTrainerError> {
        if !(MIN_BPM..=MAX_BPM).contains(&bpm) {
            return Err(EarTrainerError::InvalidTempo(bpm));
        }
        let beat_ms = 60_000.0 / bpm as f64;
        Ok(Self {
            note_duration_ms: beat_ms.round() as u64,
            gap_between_notes_ms: (0.25 * beat_ms).round() as u64,
            gap_between_intervals_ms: (2.0 * beat_ms).round() as u64,
        })
    }
}

/// Parse tempo text such as `"120"` and check it against the BPM bounds.
///
/// # Errors
/// - [`EarTrainerError::InvalidTempoInput`] when the text is not a whole number
/// - [`EarTrainerError::InvalidTempo`] outside `MIN_BPM..=MAX_BPM`
pub fn parse_bpm(input: &str) -> Result<u32, EarTrainerError> {
    let trimmed = input.trim();
    let bpm: u32 = trimmed
        .parse()
        .map_err(|_| EarTrainerError::InvalidTempoInput(trimmed.to_string()))?;
    PlaybackTiming::from_bpm(bpm)?;
    Ok(bpm)
}

/// What a play call did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PlaybackOutcome {
    /// Played to completion
    Played,
    /// Another playback was in progress; nothing happened
    Busy,
    /// The instrument is still loading; nothing happened
    NotReady,
}
