//! Audio cues

use rand::Rng;

use crate::MediaError;

/// Sound file naming for the page's cues
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioCue {
    dir: String,
}

impl AudioCue {
    /// Cues under `dir` (no trailing slash needed)
    pub fn new(dir: impl Into<String>) -> Self {
        let dir = dir.into();
        Self {
            dir: dir.trim_end_matches('/').to_string(),
        }
    }

    /// `{dir}/vintage-keyboard-{n}.wav`
    pub fn keystroke(&self, n: u32) -> String {
        self.path(&format!("vintage-keyboard-{n}.wav"))
    }

    /// `{dir}/small-explosion.wav`
    pub fn explosion(&self) -> String {
        self.path("small-explosion.wav")
    }

    fn path(&self, file: &str) -> String {
        if self.dir.is_empty() {
            file.to_string()
        } else {
            format!("{}/{}", self.dir, file)
        }
    }
}

impl Default for AudioCue {
    fn default() -> Self {
        Self::new("sounds")
    }
}

/// Uniform cue index in `[1, n]`
pub fn random_cue_index<R: Rng + ?Sized>(rng: &mut R, n: u32) -> Result<u32, MediaError> {
    if n == 0 {
        return Err(MediaError::NoCues);
    }
    Ok(rng.random_range(1..=n))
}
