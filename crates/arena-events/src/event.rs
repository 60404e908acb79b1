//! Event
//!
//! The record handed to listeners while an event propagates.

use arena_dom::NodeId;

use crate::{EventType, Key, Modifiers};

/// Mouse buttons
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MouseButton {
    #[default]
    Primary,
    Auxiliary,
    Secondary,
}

/// Metadata supplied by the host when it fires an event
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventInit {
    pub client_x: i32,
    pub client_y: i32,
    pub button: MouseButton,
    pub modifiers: Modifiers,
    pub key: Option<Key>,
    /// Milliseconds since page creation; the page clock fills it when None
    pub timestamp: Option<f64>,
}

impl EventInit {
    /// Pointer position
    pub fn at(x: i32, y: i32) -> Self {
        Self {
            client_x: x,
            client_y: y,
            ..Self::default()
        }
    }

    /// Key press
    pub fn key(key: Key, modifiers: Modifiers) -> Self {
        Self {
            key: Some(key),
            modifiers,
            ..Self::default()
        }
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn with_timestamp(mut self, timestamp: f64) -> Self {
        self.timestamp = Some(timestamp);
        self
    }
}

/// DOM event
///
/// `target` is the node the event was fired at; `current_target` is the node
/// whose listener is running, and moves up the tree while the event bubbles.
#[derive(Debug, Clone)]
pub struct Event {
    pub event_type: EventType,
    pub target: NodeId,
    pub current_target: NodeId,
    pub client_x: i32,
    pub client_y: i32,
    pub button: MouseButton,
    pub modifiers: Modifiers,
    pub key: Option<Key>,
    pub timestamp: f64,
    pub bubbles: bool,
    pub cancelable: bool,
    default_prevented: bool,
    propagation_stopped: bool,
}

impl Event {
    /// Create an event of `event_type` fired at `target`
    pub fn new(event_type: EventType, target: NodeId, init: EventInit) -> Self {
        Self {
            bubbles: event_type.bubbles(),
            cancelable: event_type.cancelable(),
            event_type,
            target,
            current_target: target,
            client_x: init.client_x,
            client_y: init.client_y,
            button: init.button,
            modifiers: init.modifiers,
            key: init.key,
            timestamp: init.timestamp.unwrap_or(0.0),
            default_prevented: false,
            propagation_stopped: false,
        }
    }

    /// Mouse event at client coordinates
    pub fn mouse(event_type: EventType, target: NodeId, x: i32, y: i32) -> Self {
        Self::new(event_type, target, EventInit::at(x, y))
    }

    /// Keyboard event
    pub fn keyboard(event_type: EventType, target: NodeId, key: Key, modifiers: Modifiers) -> Self {
        Self::new(event_type, target, EventInit::key(key, modifiers))
    }

    /// Prevent default action (ignored unless cancelable)
    pub fn prevent_default(&mut self) {
        if self.cancelable {
            self.default_prevented = true;
        }
    }

    /// Stop propagation after the current node's listeners
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }

    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }

    /// Client coordinates
    pub fn coordinates(&self) -> (i32, i32) {
        (self.client_x, self.client_y)
    }
}
