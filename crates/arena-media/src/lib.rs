//! Arena Media
//!
//! Audio playback for the arena page:
//! - `AudioPlayer`: fire-and-forget playback capability
//! - `AudioCue`: the page's sound file naming
//! - `RecordingPlayer` / `NullPlayer`: headless players

mod cue;
mod player;

pub use cue::{random_cue_index, AudioCue};
pub use player::{AudioPlayer, NullPlayer, RecordingPlayer};

/// Media error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MediaError {
    #[error("No audio cues to choose from")]
    NoCues,

    #[error("Audio unavailable: {0}")]
    Unavailable(String),
}
