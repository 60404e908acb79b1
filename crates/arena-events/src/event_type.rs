//! Event types

use std::fmt;

/// Event type identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EventType {
    Click,
    DblClick,
    MouseDown,
    MouseUp,
    MouseMove,
    MouseEnter,
    MouseLeave,
    KeyDown,
    KeyUp,
    Input,
    Change,
    Submit,
    DomContentLoaded,
    Custom(String),
}

impl EventType {
    /// Parse a DOM event name
    pub fn parse(name: &str) -> Self {
        match name {
            "click" => Self::Click,
            "dblclick" => Self::DblClick,
            "mousedown" => Self::MouseDown,
            "mouseup" => Self::MouseUp,
            "mousemove" => Self::MouseMove,
            "mouseenter" => Self::MouseEnter,
            "mouseleave" => Self::MouseLeave,
            "keydown" => Self::KeyDown,
            "keyup" => Self::KeyUp,
            "input" => Self::Input,
            "change" => Self::Change,
            "submit" => Self::Submit,
            "DOMContentLoaded" => Self::DomContentLoaded,
            other => Self::Custom(other.to_string()),
        }
    }

    /// DOM event name
    pub fn as_str(&self) -> &str {
        match self {
            Self::Click => "click",
            Self::DblClick => "dblclick",
            Self::MouseDown => "mousedown",
            Self::MouseUp => "mouseup",
            Self::MouseMove => "mousemove",
            Self::MouseEnter => "mouseenter",
            Self::MouseLeave => "mouseleave",
            Self::KeyDown => "keydown",
            Self::KeyUp => "keyup",
            Self::Input => "input",
            Self::Change => "change",
            Self::Submit => "submit",
            Self::DomContentLoaded => "DOMContentLoaded",
            Self::Custom(name) => name,
        }
    }

    /// Check if this event type can bubble
    pub fn bubbles(&self) -> bool {
        !matches!(self, Self::MouseEnter | Self::MouseLeave)
    }

    /// Check if `prevent_default` has any effect
    pub fn cancelable(&self) -> bool {
        matches!(
            self,
            Self::Click
                | Self::DblClick
                | Self::MouseDown
                | Self::MouseUp
                | Self::MouseMove
                | Self::KeyDown
                | Self::KeyUp
                | Self::Submit
        )
    }
}

impl From<&str> for EventType {
    fn from(name: &str) -> Self {
        Self::parse(name)
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_type_bubbles() {
        assert!(EventType::Click.bubbles());
        assert!(EventType::Submit.bubbles());
        assert!(!EventType::MouseEnter.bubbles());
        assert!(!EventType::MouseLeave.bubbles());
    }

    #[test]
    fn test_parse_round_trips_names() {
        for name in ["dblclick", "mousemove", "keydown", "submit", "DOMContentLoaded"] {
            assert_eq!(EventType::parse(name).as_str(), name);
        }
        assert_eq!(EventType::parse("howl"), EventType::Custom("howl".into()));
    }

    #[test]
    fn test_cancelable() {
        assert!(EventType::Submit.cancelable());
        assert!(!EventType::Input.cancelable());
        assert!(!EventType::MouseEnter.cancelable());
    }
}
