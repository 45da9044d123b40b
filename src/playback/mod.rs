//! # Playback Module
//!
//! Plays notes, intervals and whole rounds through an [`Instrument`] with
//! tempo-derived timing.
//!
//! ## Sub-modules
//! - `types` - [`PlaybackTiming`] (tempo mapping) and [`PlaybackOutcome`]
//! - `instrument` - the [`Instrument`] capability and [`ConsoleInstrument`] (log output only)
//! - `sequencer` - [`Sequencer`], the `Idle -> Playing -> Idle` state machine
//!
//! ## Timing Contract
//! For one interval the base note starts at `t = 0`, the second note at
//! `t = note + gap_between_notes`, and the call returns once the second note
//! has sounded for `note`. A sequence waits `gap_between_intervals` between
//! the end of one pair and the start of the next, then one `note` of tail
//! after the last pair.
//!
//! ```text
//! bpm 120: note = 500ms, gap = 125ms, interval gap = 1000ms
//!
//! 0      500 625   1125        2125 2625 2750  3250  3750
//! |base1 |gap|second1|  gap    |base2|gap|second2| tail |
//! ```
//!
//! ## Mutual Exclusion
//! Only one playback may be active per sequencer. Starting another while one
//! is in progress returns [`PlaybackOutcome::Busy`] immediately, with no
//! sound and no queueing. Dropping an in-flight playback future stops the
//! instrument and returns the sequencer to idle.
//!
//! ## Example
//! ```rust
//! use ear_trainer::playback::PlaybackTiming;
//!
//! let timing = PlaybackTiming::from_bpm(120).unwrap();
//! assert_eq!(timing.note_duration_ms, 500);
//! assert_eq!(timing.gap_between_notes_ms, 125);
//! assert_eq!(timing.gap_between_intervals_ms, 1000);
//! ```

mod instrument;
mod sequencer;
mod types;


pub use instrument::{ConsoleInstrument, Instrument};
pub use sequencer::Sequencer;
pub use types::{
    parse_bpm, PlaybackOutcome, PlaybackTiming, DEFAULT_BPM, DEFAULT_VELOCITY, MAX_BPM, MIN_BPM,
};
