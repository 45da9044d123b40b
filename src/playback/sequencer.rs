//! Playback sequencer
//!
//! Turns notes, intervals and rounds into timed note-on calls on an
//! [`Instrument`], suspending the caller for the length of the playback.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use log::{debug, warn};

use super::instrument::Instrument;
use super::types::{PlaybackOutcome, PlaybackTiming, DEFAULT_VELOCITY};
use crate::error::EarTrainerError;
use crate::generator::{IntervalPair, Round};
use crate::note::Note;

/// Owns an instrument and the `Idle`/`Playing` flag guarding it
pub struct Sequencer<I: Instrument> {
    instrument: I,
    velocity: f32,
    playing: AtomicBool,
}

/// Holds the sequencer in `Playing`; dropping it returns to `Idle`
struct PlayingGuard<'a, I: Instrument> {
    sequencer: &'a Sequencer<I>,
    completed: bool,
}

impl<I: Instrument> PlayingGuard<'_, I> {
    fn complete(mut self) {
        self.completed = true;
    }
}

impl<I: Instrument> Drop for PlayingGuard<'_, I> {
    fn drop(&mut self) {
        if !self.completed {
            debug!("playback aborted, stopping instrument");
            self.sequencer.instrument.stop();
        }
        self.sequencer.playing.store(false, Ordering::Release);
    }
}

impl<I: Instrument> Sequencer<I> {
    pub fn new(instrument: I) -> Self {
        Self {
            instrument,
            velocity: DEFAULT_VELOCITY,
            playing: AtomicBool::new(false),
        }
    }

    /// Note-on velocity, clamped to 0.0 - 1.0
    pub fn with_velocity(mut self, velocity: f32) -> Self {
        self.velocity = velocity.clamp(0.0, 1.0);
        self
    }

    pub fn instrument(&self) -> &I {
        &self.instrument
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn is_playing(&self) -> bool {
        self.playing.load(Ordering::Acquire)
    }

    pub fn is_ready(&self) -> bool {
        !self.instrument.is_loading()
    }

    fn try_begin(&self) -> Result<PlayingGuard<'_, I>, PlaybackOutcome> {
        if self.instrument.is_loading() {
            debug!("instrument still loading, ignoring play request");
            return Err(PlaybackOutcome::NotReady);
        }
        if self
            .playing
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            debug!("playback already in progress, ignoring play request");
            return Err(PlaybackOutcome::Busy);
        }
        Ok(PlayingGuard {
            sequencer: self,
            completed: false,
        })
    }

    /// Start `note` and suspend for `duration_ms`
    async fn sound(&self, note: &Note, duration_ms: u64) -> Result<(), EarTrainerError> {
        let duration = Duration::from_millis(duration_ms);
        let id = note.to_string();
        debug!("note on {} for {}ms", id, duration_ms);
        if let Err(e) = self.instrument.start(&id, self.velocity, Some(duration)) {
            warn!("instrument failed to start {}: {}", id, e);
            return Err(e);
        }
        tokio::time::sleep(duration).await;
        Ok(())
    }

    async fn rest(&self, duration_ms: u64) {
        if duration_ms > 0 {
            tokio::time::sleep(Duration::from_millis(duration_ms)).await;
        }
    }

    /// Play one note, returning after it has sounded for `duration_ms`
    pub async fn play_note(
        &self,
        note: &Note,
        duration_ms: u64,
    ) -> Result<PlaybackOutcome, EarTrainerError> {
        let guard = match self.try_begin() {
            Ok(guard) => guard,
            Err(outcome) => return Ok(outcome),
        };
        self.sound(note, duration_ms).await?;
        guard.complete();
        Ok(PlaybackOutcome::Played)
    }

    /// Play `base` then `second`, starting `second` at
    /// `note_duration_ms + gap_ms` and returning once it has sounded for
    /// `note_duration_ms`
    pub async fn play_interval(
        &self,
        base: &Note,
        second: &Note,
        note_duration_ms: u64,
        gap_ms: u64,
    ) -> Result<PlaybackOutcome, EarTrainerError> {
        let guard = match self.try_begin() {
            Ok(guard) => guard,
            Err(outcome) => return Ok(outcome),
        };
        self.sound(base, note_duration_ms).await?;
        self.rest(gap_ms).await;
        self.sound(second, note_duration_ms).await?;
        guard.complete();
        Ok(PlaybackOutcome::Played)
    }

    /// Play (base, second) pairs back to back, then wait one note of tail
    pub async fn play_sequence(
        &self,
        pairs: &[(Note, Note)],
        timing: &PlaybackTiming,
    ) -> Result<PlaybackOutcome, EarTrainerError> {
        let guard = match self.try_begin() {
            Ok(guard) => guard,
            Err(outcome) => return Ok(outcome),
        };
        for (i, (base, second)) in pairs.iter().enumerate() {
            if i > 0 {
                self.rest(timing.gap_between_intervals_ms).await;
            }
            self.sound(base, timing.note_duration_ms).await?;
            self.rest(timing.gap_between_notes_ms).await;
            self.sound(second, timing.note_duration_ms).await?;
        }
        self.rest(timing.note_duration_ms).await;
        guard.complete();
        Ok(PlaybackOutcome::Played)
    }

    /// Play a single interval pair
    pub async fn play_pair(
        &self,
        pair: &IntervalPair,
        timing: &PlaybackTiming,
    ) -> Result<PlaybackOutcome, EarTrainerError> {
        self.play_interval(
            &pair.base_note(),
            &pair.second_note(),
            timing.note_duration_ms,
            timing.gap_between_notes_ms,
        )
        .await
    }

    /// Play both pairs of a round in order
    pub async fn play_round(
        &self,
        round: &Round,
        timing: &PlaybackTiming,
    ) -> Result<PlaybackOutcome, EarTrainerError> {
        self.play_sequence(&round.note_pairs(), timing).await
    }
}
