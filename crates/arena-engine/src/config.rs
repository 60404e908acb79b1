//! Configuration
//!
//! Everything the reactions need to know about the page: which selectors to
//! bind, where the sounds live, how many keystroke cues exist and where the
//! keyboard shortcut goes. Loaded from TOML; every field has a default.

use std::path::Path;

use arena_media::AudioCue;
use serde::Deserialize;

use crate::{EngineError, EngineResult};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ArenaConfig {
    /// Directory prefix of the sound files
    pub sounds_dir: String,
    /// Number of `vintage-keyboard-{n}.wav` cues
    pub keystroke_cues: u32,
    /// Target of the Alt+Shift+N shortcut
    pub nyan_url: String,
    /// Fixed RNG seed; entropy when absent
    pub rng_seed: Option<u64>,
    pub selectors: SelectorConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SelectorConfig {
    pub fighter: String,
    pub text_input: String,
    pub form: String,
    pub application_form: String,
    pub applicant_preview: String,
    pub paragraph: String,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            sounds_dir: "sounds".to_string(),
            keystroke_cues: 5,
            nyan_url: "http://nyan.cat".to_string(),
            rng_seed: None,
            selectors: SelectorConfig::default(),
        }
    }
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            fighter: ".doggo.fighter".to_string(),
            text_input: "input".to_string(),
            form: "form".to_string(),
            application_form: "#application-form".to_string(),
            applicant_preview: "#applicant-preview .doggo.blank".to_string(),
            paragraph: "p".to_string(),
        }
    }
}

impl ArenaConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(source: &str) -> EngineResult<Self> {
        let config: Self =
            toml::from_str(source).map_err(|err| EngineError::Config(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read a TOML file
    pub fn load(path: impl AsRef<Path>) -> EngineResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)?;
        tracing::debug!(path = %path.display(), "loading arena config");
        Self::from_toml_str(&source)
    }

    pub fn validate(&self) -> EngineResult<()> {
        if self.keystroke_cues == 0 {
            return Err(EngineError::Config(
                "keystroke_cues must be at least 1".to_string(),
            ));
        }
        if self.nyan_url.trim().is_empty() {
            return Err(EngineError::Config("nyan_url must not be empty".to_string()));
        }
        Ok(())
    }

    /// Cue naming rooted at `sounds_dir`
    pub fn cues(&self) -> AudioCue {
        AudioCue::new(self.sounds_dir.as_str())
    }

    /// Same config with a fixed seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_page() {
        let config = ArenaConfig::default();
        assert_eq!(config.keystroke_cues, 5);
        assert_eq!(config.nyan_url, "http://nyan.cat");
        assert_eq!(config.selectors.applicant_preview, "#applicant-preview .doggo.blank");
        assert_eq!(config.cues().explosion(), "sounds/small-explosion.wav");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = ArenaConfig::from_toml_str(
            r#"
            sounds_dir = "assets/sfx"
            rng_seed = 42

            [selectors]
            fighter = ".fighter"
            "#,
        )
        .unwrap();
        assert_eq!(config.sounds_dir, "assets/sfx");
        assert_eq!(config.rng_seed, Some(42));
        assert_eq!(config.selectors.fighter, ".fighter");
        assert_eq!(config.selectors.form, "form");
        assert_eq!(config.keystroke_cues, 5);
    }

    #[test]
    fn test_zero_cues_rejected() {
        let err = ArenaConfig::from_toml_str("keystroke_cues = 0").unwrap_err();
        assert!(matches!(err, EngineError::Config(_)));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = ArenaConfig::from_toml_str("volume = 11").unwrap_err();
        assert!(matches!(err, EngineError::Config(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = ArenaConfig::load("/definitely/not/here/arena.toml").unwrap_err();
        assert!(matches!(err, EngineError::Io(_)));
    }
}
