//! Integration tests for the ear trainer
//!
//! Exercises a full round from range selection through playback and guessing.

use std::sync::Mutex;
use std::time::Duration;

use ear_trainer::playback::{Instrument, PlaybackOutcome, PlaybackTiming, Sequencer};
use ear_trainer::{
    can_generate_round, generate_round, valid_base_notes, Choice, EarTrainerError, GameSession,
    Interval, IntervalKind, Note, NoteRange, SessionConfig, INTERVALS,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[derive(Default)]
struct CountingInstrument {
    notes: Mutex<Vec<String>>,
}

impl Instrument for CountingInstrument {
    fn is_loading(&self) -> bool {
        false
    }

    fn start(&self, note: &str, _velocity: f32, _duration: Option<Duration>) -> Result<(), EarTrainerError> {
        self.notes.lock().unwrap().push(note.to_string());
        Ok(())
    }

    fn stop(&self) {}
}

fn note(id: &str) -> Note {
    id.parse().unwrap()
}

#[test]
fn test_c4_to_d4_fixture() {
    let min = note("C4");
    let max = note("D4");
    let minor = valid_base_notes(&min, &max, &Interval::of(IntervalKind::MinorSecond));
    let major = valid_base_notes(&min, &max, &Interval::of(IntervalKind::MajorSecond));
    assert_eq!(minor, vec![note("C4"), note("C#4")]);
    assert_eq!(major, vec![note("C4")]);
    assert!(can_generate_round(&min, &max));
    assert!(!can_generate_round(&min, &min));
    assert!(!can_generate_round(&note("C2"), &note("C2")));
}

#[test]
fn test_valid_base_notes_property_across_ranges() {
    let catalog = ear_trainer::note::selectable_notes();
    for (i, min) in catalog.iter().enumerate().step_by(5) {
        for max in catalog[i..].iter().step_by(3) {
            for interval in INTERVALS {
                for base in valid_base_notes(min, max, &interval) {
                    assert!(min.pitch_number() <= base.pitch_number());
                    assert!(base.pitch_number() <= max.pitch_number());
                    assert!(base.pitch_number() + interval.semitones <= max.pitch_number());
                }
            }
        }
    }
}

#[test]
fn test_thousand_rounds_have_distinct_base_notes() {
    let range = NoteRange::new(note("C4"), note("B4")).unwrap();
    let mut rng = StdRng::seed_from_u64(2024);
    for _ in 0..1000 {
        let round = generate_round(&range, &mut rng).unwrap();
        assert_ne!(
            round.pair1().base_note().pitch_number(),
            round.pair2().base_note().pitch_number()
        );
        let larger = round.pair(round.larger_of()).interval();
        assert_eq!(larger.kind, IntervalKind::MajorSecond);
    }
}

#[test]
fn test_round_serializes_for_presentation() {
    let range = NoteRange::new(note("C4"), note("B4")).unwrap();
    let round = generate_round(&range, &mut StdRng::seed_from_u64(5)).unwrap();
    let yaml = serde_yaml::to_string(&round).unwrap();
    assert!(yaml.contains("pair1:"));
    assert!(yaml.contains("baseNote:"));
    assert!(yaml.contains("largerOf:"));
    assert!(yaml.contains("semitones:"));
}

#[tokio::test(start_paused = true)]
async fn test_full_round_flow() {
    let config = SessionConfig::from_yaml_str("min-note: C3\nmax-note: C4\ntempo-bpm: 120\n").unwrap();
    let mut session = GameSession::new(&config).unwrap();
    let sequencer = Sequencer::new(CountingInstrument::default());
    let mut rng = StdRng::seed_from_u64(77);

    session.new_round(&mut rng).unwrap();
    let round = session.take_autoplay().unwrap();
    assert!(session.take_autoplay().is_none());

    let timing = session.timing();
    assert_eq!(timing, PlaybackTiming::from_bpm(120).unwrap());
    let outcome = sequencer.play_round(&round, &timing).await.unwrap();
    assert_eq!(outcome, PlaybackOutcome::Played);
    assert_eq!(sequencer.instrument().notes.lock().unwrap().len(), 4);

    let outcome = session.guess(round.larger_of()).unwrap();
    assert!(outcome.correct);
    assert_eq!(session.score(), 1);
    assert_eq!(session.accuracy_percent(), Some(100));
}

#[tokio::test(start_paused = true)]
async fn test_overlapping_replays_are_ignored() {
    let sequencer = Sequencer::new(CountingInstrument::default());
    let range = NoteRange::new(note("C3"), note("C4")).unwrap();
    let round = generate_round(&range, &mut StdRng::seed_from_u64(3)).unwrap();
    let timing = PlaybackTiming::from_bpm(200).unwrap();

    let (both, first_only, second_only) = tokio::join!(
        sequencer.play_round(&round, &timing),
        sequencer.play_pair(round.pair(Choice::First), &timing),
        sequencer.play_pair(round.pair(Choice::Second), &timing),
    );
    assert_eq!(both.unwrap(), PlaybackOutcome::Played);
    assert_eq!(first_only.unwrap(), PlaybackOutcome::Busy);
    assert_eq!(second_only.unwrap(), PlaybackOutcome::Busy);
    assert_eq!(sequencer.instrument().notes.lock().unwrap().len(), 4);
    assert!(!sequencer.is_playing());
}

#[test]
fn test_narrow_range_session_reports_warning() {
    let config = SessionConfig::from_yaml_str("min-note: A4\nmax-note: A#4\n").unwrap();
    let mut session = GameSession::new(&config).unwrap();
    assert!(session.range_warning().is_some());
    assert_eq!(
        session.new_round(&mut StdRng::seed_from_u64(0)).unwrap_err(),
        EarTrainerError::RangeTooNarrow
    );
}
