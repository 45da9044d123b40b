//! # ear_trainer
//!
//! Interval ear-training: two intervals, a minor second and a major second,
//! are generated inside a pitch range and played one after the other; the
//! learner says which one was larger.
//!
//! ## Modules
//! - `note` - notes, pitch classes and the interval catalog
//! - `range` - which base notes fit an interval inside a range
//! - `generator` - random rounds of two interval pairs
//! - `playback` - tempo mapping and the non-reentrant playback sequencer
//! - `session` - range/tempo/score state for a front end
//! - `config` - YAML session configuration
//!
//! ## Example
//! ```rust
//! use ear_trainer::{generate_round, NoteRange};
//! use rand::SeedableRng;
//!
//! let range = NoteRange::new("C4".parse()?, "B4".parse()?)?;
//! assert!(range.can_generate_round());
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(1);
//! let round = generate_round(&range, &mut rng)?;
//! assert_ne!(round.pair1().base_note(), round.pair2().base_note());
//! # Ok::<(), ear_trainer::EarTrainerError>(())
//! ```

pub mod config;
pub mod error;
pub mod generator;
pub mod note;
pub mod playback;
pub mod range;
pub mod session;

pub use config::SessionConfig;
pub use error::EarTrainerError;
pub use generator::{generate_pair, generate_round, Choice, IntervalPair, RandomSource, Round, RoundKey};
pub use note::{Interval, IntervalKind, Note, PitchClass, INTERVALS};
pub use range::{all_notes_in_range, can_generate_round, can_place_interval, valid_base_notes, NoteRange};
pub use session::{GameSession, GuessOutcome};
