//! Sound-producing collaborators
//!
//! The sequencer only needs a note-on primitive, a stop, and a readiness
//! flag. How a backend turns `"C#4"` into sound is its own business.

use std::time::Duration;

use log::info;

use crate::error::EarTrainerError;

/// A sound source addressable by note identifiers such as `"C#4"`
pub trait Instrument: Send + Sync {
    /// True while samples or synthesis resources are still being prepared.
    /// Play calls are refused until this turns false.
    fn is_loading(&self) -> bool;

    /// Start sounding `note` at `velocity` (0.0 - 1.0). With a duration the
    /// instrument releases the note itself; this call must not block for it.
    fn start(&self, note: &str, velocity: f32, duration: Option<Duration>)
        -> Result<(), EarTrainerError>;

    /// Silence everything currently sounding
    fn stop(&self);
}

/// Reports each note through the `log` facade; always ready
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleInstrument;

impl Instrument for ConsoleInstrument {
    fn is_loading(&self) -> bool {
        false
    }

    fn start(
        &self,
        note: &str,
        velocity: f32,
        duration: Option<Duration>,
    ) -> Result<(), EarTrainerError> {
        info!("note on {} velocity {:.2} duration {:?}", note, velocity, duration);
        Ok(())
    }

    fn stop(&self) {
        info!("all notes off");
    }
}
