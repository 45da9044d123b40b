//! # Session Configuration
//!
//! Optional YAML file with the starting range, tempo and note velocity.
//! Every key may be omitted.
//!
//! ```yaml
//! min-note: C3
//! max-note: B4
//! tempo-bpm: 90
//! velocity: 0.7
//! ```
//!
//! Notes use instrument identifiers (`C#4`, not `Db4`). Values are checked
//! after parsing: the range must be ordered, the tempo within
//! `MIN_BPM..=MAX_BPM` and the velocity in `(0, 1]`.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::EarTrainerError;
use crate::note::{Note, DEFAULT_MAX_NOTE, DEFAULT_MIN_NOTE};
use crate::playback::{PlaybackTiming, DEFAULT_BPM, DEFAULT_VELOCITY};
use crate::range::NoteRange;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct SessionConfig {
    pub min_note: Note,
    pub max_note: Note,
    pub tempo_bpm: u32,
    pub velocity: f32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            min_note: DEFAULT_MIN_NOTE,
            max_note: DEFAULT_MAX_NOTE,
            tempo_bpm: DEFAULT_BPM,
            velocity: DEFAULT_VELOCITY,
        }
    }
}

impl SessionConfig {
    /// Parse and validate YAML configuration text
    pub fn from_yaml_str(content: &str) -> Result<Self, EarTrainerError> {
        // an empty document means all defaults
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: SessionConfig =
            serde_yaml::from_str(content).map_err(|e| EarTrainerError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a YAML configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, EarTrainerError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            EarTrainerError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_yaml_str(&content)
    }

    pub fn validate(&self) -> Result<(), EarTrainerError> {
        NoteRange::new(self.min_note, self.max_note)?;
        PlaybackTiming::from_bpm(self.tempo_bpm)?;
        if !(self.velocity > 0.0 && self.velocity <= 1.0) {
            return Err(EarTrainerError::Config(format!(
                "velocity must be in (0, 1], got {}",
                self.velocity
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = SessionConfig::default();
        assert_eq!(config.min_note.to_string(), "C2");
        assert_eq!(config.max_note.to_string(), "B5");
        assert_eq!(config.tempo_bpm, 100);
        assert!(config.validate().is_ok());
        assert_eq!(SessionConfig::from_yaml_str("").unwrap(), config);
    }

    #[test]
    fn test_parse_full_config() {
        let config = SessionConfig::from_yaml_str(
            "min-note: C3\nmax-note: B4\ntempo-bpm: 90\nvelocity: 0.5\n",
        )
        .unwrap();
        assert_eq!(config.min_note.pitch_number(), 48);
        assert_eq!(config.max_note.pitch_number(), 71);
        assert_eq!(config.tempo_bpm, 90);
        assert_eq!(config.velocity, 0.5);
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = SessionConfig::from_yaml_str("tempo-bpm: 60\n").unwrap();
        assert_eq!(config.tempo_bpm, 60);
        assert_eq!(config.min_note, DEFAULT_MIN_NOTE);
        assert_eq!(config.velocity, DEFAULT_VELOCITY);
    }

    #[test]
    fn test_invalid_configs() {
        assert!(matches!(
            SessionConfig::from_yaml_str("min-note: Db3\n"),
            Err(EarTrainerError::Config(_))
        ));
        assert!(matches!(
            SessionConfig::from_yaml_str("min-note: C5\nmax-note: C4\n"),
            Err(EarTrainerError::InvalidRange { .. })
        ));
        assert_eq!(
            SessionConfig::from_yaml_str("tempo-bpm: 300\n"),
            Err(EarTrainerError::InvalidTempo(300))
        );
        assert!(matches!(
            SessionConfig::from_yaml_str("velocity: 0\n"),
            Err(EarTrainerError::Config(_))
        ));
        assert!(matches!(
            SessionConfig::from_yaml_str("tempo: 90\n"),
            Err(EarTrainerError::Config(_))
        ));
    }

    #[test]
    fn test_huge_octaves_are_rejected() {
        assert!(matches!(
            SessionConfig::from_yaml_str("max-note: B999999999\n"),
            Err(EarTrainerError::Config(_))
        ));
        assert!(SessionConfig::from_yaml_str("min-note: B-10000000\n").is_err());
        let widest = SessionConfig::from_yaml_str("min-note: C-1\nmax-note: B9\n").unwrap();
        assert_eq!(widest.max_note.pitch_number(), 131);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "min-note: E3").unwrap();
        writeln!(file, "max-note: E4").unwrap();
        let config = SessionConfig::load(file.path()).unwrap();
        assert_eq!(config.min_note.to_string(), "E3");
        assert_eq!(config.max_note.to_string(), "E4");

        let missing = SessionConfig::load("/nonexistent/ear-trainer.yaml");
        assert!(matches!(missing, Err(EarTrainerError::Config(_))));
    }
}
