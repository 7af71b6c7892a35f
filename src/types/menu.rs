use serde::{Deserialize, Serialize};

use super::dom::ElementId;

/// Off-canvas menu state.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum MenuState {
    #[default]
    Closed,
    Open,
}

/// Keys the menu reacts to. Everything else is `Other`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Tab,
    Escape,
    Other(String),
}

impl Key {
    /// Maps a DOM `KeyboardEvent.key` value.
    pub fn from_dom(key: &str) -> Self {
        match key {
            "Tab" => Key::Tab,
            "Escape" | "Esc" => Key::Escape,
            other => Key::Other(other.to_string()),
        }
    }
}

/// A keydown as delivered by the host page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub shift: bool,
    /// Element the event was dispatched to, if the host knows it.
    pub target: Option<ElementId>,
}

impl KeyEvent {
    pub fn new(key: Key, shift: bool, target: Option<ElementId>) -> Self {
        Self { key, shift, target }
    }

    pub fn tab(target: Option<ElementId>) -> Self {
        Self::new(Key::Tab, false, target)
    }

    pub fn shift_tab(target: Option<ElementId>) -> Self {
        Self::new(Key::Tab, true, target)
    }

    pub fn escape() -> Self {
        Self::new(Key::Escape, false, None)
    }
}

/// What the host must do with the native event after the engine handled it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct KeyOutcome {
    pub prevent_default: bool,
}

impl KeyOutcome {
    pub const DEFAULT: KeyOutcome = KeyOutcome { prevent_default: false };
    pub const PREVENTED: KeyOutcome = KeyOutcome { prevent_default: true };
}
