//! Keyboard model
//!
//! Semantic key values and modifier flags. Shortcuts compare against the key
//! identifier, never against legacy numeric key codes.

/// Key value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    // Printable characters
    Character(char),

    // Function keys
    F(u8),

    // Navigation
    ArrowUp, ArrowDown, ArrowLeft, ArrowRight,
    Home, End, PageUp, PageDown,

    // Editing
    Backspace, Delete, Insert,
    Enter, Tab, Escape,

    // Modifiers (when pressed on their own)
    Shift, Control, Alt, Meta,

    // Whitespace
    Space,

    // Other
    Unidentified(String),
}

impl Key {
    /// Parse from a DOM `key` string
    pub fn parse(s: &str) -> Self {
        match s {
            "ArrowUp" => Self::ArrowUp,
            "ArrowDown" => Self::ArrowDown,
            "ArrowLeft" => Self::ArrowLeft,
            "ArrowRight" => Self::ArrowRight,
            "Home" => Self::Home,
            "End" => Self::End,
            "PageUp" => Self::PageUp,
            "PageDown" => Self::PageDown,
            "Backspace" => Self::Backspace,
            "Delete" => Self::Delete,
            "Insert" => Self::Insert,
            "Enter" => Self::Enter,
            "Tab" => Self::Tab,
            "Escape" => Self::Escape,
            "Shift" => Self::Shift,
            "Control" => Self::Control,
            "Alt" => Self::Alt,
            "Meta" => Self::Meta,
            " " | "Space" => Self::Space,
            _ => {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Self::Character(c),
                    _ => match s.strip_prefix('F').and_then(|n| n.parse::<u8>().ok()) {
                        Some(n @ 1..=24) => Self::F(n),
                        _ => Self::Unidentified(s.to_string()),
                    },
                }
            }
        }
    }

    /// Convert to key value string
    pub fn to_key_string(&self) -> String {
        match self {
            Self::Character(c) => c.to_string(),
            Self::F(n) => format!("F{n}"),
            Self::Space => " ".to_string(),
            Self::Unidentified(s) => s.clone(),
            named => format!("{named:?}"),
        }
    }

    /// Case-insensitive letter comparison (`n` matches `Key::Character('N')`)
    pub fn matches_letter(&self, letter: char) -> bool {
        match self {
            Self::Character(c) => c.to_lowercase().eq(letter.to_lowercase()),
            _ => false,
        }
    }
}

/// Key modifiers held while an event fired
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool, // Cmd on Mac, Win on Windows
}

impl Modifiers {
    /// Check if any modifier is pressed
    pub fn any(&self) -> bool {
        self.shift || self.ctrl || self.alt || self.meta
    }

    /// Create from booleans
    pub fn from_flags(shift: bool, ctrl: bool, alt: bool, meta: bool) -> Self {
        Self { shift, ctrl, alt, meta }
    }

    /// Alt+Shift and nothing required beyond that
    pub fn alt_shift() -> Self {
        Self { shift: true, alt: true, ..Self::default() }
    }
}
