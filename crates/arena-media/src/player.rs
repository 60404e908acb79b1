//! Audio players
//!
//! Playback is best-effort: `play` returns immediately and nobody waits for
//! the sound to finish. The caller decides what to do with an error, which
//! for the page means logging it.

use std::cell::RefCell;
use std::rc::Rc;

use crate::MediaError;

/// Fire-and-forget audio playback
pub trait AudioPlayer {
    /// Start playing `src`
    fn play(&mut self, src: &str) -> Result<(), MediaError>;
}

/// Player that remembers what it was asked to play
///
/// Clones share the same log, so a test can keep one handle and give the
/// other to the page.
#[derive(Debug, Clone, Default)]
pub struct RecordingPlayer {
    played: Rc<RefCell<Vec<String>>>,
}

impl RecordingPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sources played so far, oldest first
    pub fn played(&self) -> Vec<String> {
        self.played.borrow().clone()
    }

    pub fn count(&self) -> usize {
        self.played.borrow().len()
    }

    pub fn clear(&self) {
        self.played.borrow_mut().clear();
    }
}

impl AudioPlayer for RecordingPlayer {
    fn play(&mut self, src: &str) -> Result<(), MediaError> {
        tracing::trace!(src, "recording audio cue");
        self.played.borrow_mut().push(src.to_string());
        Ok(())
    }
}

/// Player with no audio device
#[derive(Debug, Clone, Copy, Default)]
pub struct NullPlayer;

impl AudioPlayer for NullPlayer {
    fn play(&mut self, src: &str) -> Result<(), MediaError> {
        Err(MediaError::Unavailable(src.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_handles_share_log() {
        let handle = RecordingPlayer::new();
        let mut player: Box<dyn AudioPlayer> = Box::new(handle.clone());

        player.play("sounds/small-explosion.wav").unwrap();
        player.play("sounds/vintage-keyboard-2.wav").unwrap();

        assert_eq!(
            handle.played(),
            vec!["sounds/small-explosion.wav", "sounds/vintage-keyboard-2.wav"]
        );
        handle.clear();
        assert_eq!(handle.count(), 0);
    }

    #[test]
    fn test_null_player_reports_unavailable() {
        let mut player = NullPlayer;
        assert_eq!(
            player.play("sounds/small-explosion.wav"),
            Err(MediaError::Unavailable("sounds/small-explosion.wav".into()))
        );
    }
}
