use std::path::PathBuf;
use std::process;
use std::time::Duration;

use clap::Parser;
use log::error;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::io::{AsyncBufReadExt, BufReader};

use ear_trainer::playback::{parse_bpm, ConsoleInstrument, Instrument, Sequencer};
use ear_trainer::{Choice, EarTrainerError, GameSession, Note, SessionConfig};

/// Interval ear training: which of two intervals is larger?
#[derive(Parser, Debug)]
#[command(name = "ear-trainer", version, about)]
struct Args {
    /// YAML session configuration
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Lowest note of the range, e.g. C3
    #[arg(long)]
    min: Option<Note>,

    /// Highest note of the range, e.g. B4
    #[arg(long)]
    max: Option<Note>,

    /// Tempo in beats per minute (40-200)
    #[arg(short, long)]
    tempo: Option<u32>,

    /// Seed for reproducible rounds
    #[arg(long)]
    seed: Option<u64>,
}

/// Echoes each note to the terminal on top of the logging instrument
struct TerminalInstrument(ConsoleInstrument);

impl Instrument for TerminalInstrument {
    fn is_loading(&self) -> bool {
        self.0.is_loading()
    }

    fn start(
        &self,
        note: &str,
        velocity: f32,
        duration: Option<Duration>,
    ) -> Result<(), EarTrainerError> {
        self.0.start(note, velocity, duration)?;
        println!("  ♪ {}", note);
        Ok(())
    }

    fn stop(&self) {
        self.0.stop();
    }
}

const HELP: &str = "\
Commands:
  1 / 2       the first / second interval was larger
  r           replay both intervals
  a / b       replay the first / second interval only
  n           next question
  min NOTE    set the lowest note (e.g. min C3)
  max NOTE    set the highest note
  tempo BPM   set the tempo
  s           reset score
  h           help
  q           quit";

fn build_session(args: &Args) -> Result<GameSession, EarTrainerError> {
    let mut config = match &args.config {
        Some(path) => SessionConfig::load(path)?,
        None => SessionConfig::default(),
    };
    if let Some(min) = args.min {
        config.min_note = min;
    }
    if let Some(max) = args.max {
        config.max_note = max;
    }
    if let Some(tempo) = args.tempo {
        config.tempo_bpm = tempo;
    }
    GameSession::new(&config)
}

fn print_status(session: &GameSession) {
    let range = session.range();
    print!(
        "Range {}..{} at {} BPM. Score: {}/{}",
        range.min(),
        range.max(),
        session.tempo_bpm(),
        session.score(),
        session.total_questions()
    );
    match session.accuracy_percent() {
        Some(percent) => println!(" ({}%)", percent),
        None => println!(),
    }
    if let Some(warning) = session.range_warning() {
        println!("Warning: {}", warning);
    }
}

fn print_round(session: &GameSession) {
    if let Some(round) = session.round() {
        println!("Which interval is larger?");
        println!("  First interval:  {}", round.pair1().interval());
        println!("  Second interval: {}", round.pair2().interval());
    }
}

async fn next_question(
    session: &mut GameSession,
    sequencer: &Sequencer<TerminalInstrument>,
    rng: &mut StdRng,
) -> Result<(), EarTrainerError> {
    session.new_round(rng)?;
    print_round(session);
    if let Some(round) = session.take_autoplay() {
        sequencer.play_round(&round, &session.timing()).await?;
    }
    Ok(())
}

async fn handle_command(
    line: &str,
    session: &mut GameSession,
    sequencer: &Sequencer<TerminalInstrument>,
    rng: &mut StdRng,
) -> Result<bool, EarTrainerError> {
    let mut words = line.split_whitespace();
    let command = words.next().unwrap_or("");
    let argument = words.next();
    let timing = session.timing();

    match (command, argument) {
        ("q", _) | ("quit", _) => return Ok(false),
        ("h", _) | ("help", _) => println!("{}", HELP),
        ("1", _) | ("2", _) => {
            let guess = Choice::try_from(command.parse::<u8>().unwrap_or(0))?;
            let outcome = session.guess(guess)?;
            println!("{}", outcome.feedback);
            print_status(session);
            println!("Press n for the next question.");
        }
        ("n", _) | ("next", _) => next_question(session, sequencer, rng).await?,
        ("r", _) => match session.round() {
            Some(round) => {
                let round = *round;
                sequencer.play_round(&round, &timing).await?;
            }
            None => println!("No question yet, press n to start."),
        },
        ("a", _) | ("b", _) => {
            let choice = if command == "a" { Choice::First } else { Choice::Second };
            match session.round() {
                Some(round) => {
                    let pair = *round.pair(choice);
                    sequencer.play_pair(&pair, &timing).await?;
                }
                None => println!("No question yet, press n to start."),
            }
        }
        ("min", Some(note)) => {
            session.set_min_note(note.parse()?)?;
            print_status(session);
        }
        ("max", Some(note)) => {
            session.set_max_note(note.parse()?)?;
            print_status(session);
        }
        ("tempo", Some(bpm)) => {
            session.set_tempo(parse_bpm(bpm)?)?;
            print_status(session);
        }
        ("s", _) | ("reset", _) => {
            session.reset_score();
            print_status(session);
        }
        ("", _) => {}
        _ => println!("Unknown command '{}'. Type h for help.", line.trim()),
    }
    Ok(true)
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    let mut session = match build_session(&args) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let sequencer =
        Sequencer::new(TerminalInstrument(ConsoleInstrument)).with_velocity(session.velocity());

    println!("Ear Trainer - Interval Recognition");
    print_status(&session);
    println!("{}", HELP);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                error!("failed to read input: {}", e);
                break;
            }
        };
        match handle_command(&line, &mut session, &sequencer, &mut rng).await {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) => println!("{}", e),
        }
    }
}
