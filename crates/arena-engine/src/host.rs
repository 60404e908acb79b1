//! Host collaborators
//!
//! What the page reaches outside the DOM for: audio playback and navigation.

use std::cell::RefCell;
use std::rc::Rc;

use arena_media::{AudioPlayer, NullPlayer};
use url::Url;

/// Receives page navigation requests
pub trait Navigator {
    fn navigate(&mut self, url: &Url);
}

/// Navigator that records requests
///
/// Clones share the same history.
#[derive(Debug, Clone, Default)]
pub struct RecordingNavigator {
    history: Rc<RefCell<Vec<Url>>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requested URLs, oldest first
    pub fn requests(&self) -> Vec<String> {
        self.history.borrow().iter().map(Url::to_string).collect()
    }

    /// Last requested URL (the current location)
    pub fn current(&self) -> Option<Url> {
        self.history.borrow().last().cloned()
    }

    pub fn count(&self) -> usize {
        self.history.borrow().len()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&mut self, url: &Url) {
        self.history.borrow_mut().push(url.clone());
    }
}

/// Collaborators of a page
pub struct Host {
    pub audio: Box<dyn AudioPlayer>,
    pub navigator: Box<dyn Navigator>,
}

impl Host {
    pub fn new(audio: impl AudioPlayer + 'static, navigator: impl Navigator + 'static) -> Self {
        Self {
            audio: Box::new(audio),
            navigator: Box::new(navigator),
        }
    }
}

impl Default for Host {
    /// No audio device; navigation recorded and dropped
    fn default() -> Self {
        Self::new(NullPlayer, RecordingNavigator::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_navigator() {
        let handle = RecordingNavigator::new();
        let mut host = Host::new(NullPlayer, handle.clone());

        host.navigator
            .navigate(&Url::parse("http://nyan.cat").unwrap());

        assert_eq!(handle.requests(), vec!["http://nyan.cat/"]);
        assert_eq!(handle.current().map(|u| u.host_str().map(String::from)), Some(Some("nyan.cat".into())));
    }
}
