//! Input events delivered by a host document to its listeners.

use serde::{Deserialize, Serialize};
use std::fmt;

/// DOM event types a menu button listens for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    /// Pointer activation (or keyboard activation synthesized by the host)
    Click,
    /// Key pressed
    KeyDown,
}

impl EventType {
    /// DOM event name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Click => "click",
            Self::KeyDown => "keydown",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Keyboard key identifiers.
///
/// The menu button routes `Down`, `Up`, `Escape` and `Tab`. `Enter`,
/// `Space`, `Home` and `End` are resolved so hosts and handlers can tell
/// them apart, but no menu button handler acts on them. Everything else is
/// [`Key::Unidentified`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    /// Down arrow
    Down,
    /// Up arrow
    Up,
    /// Escape key
    Escape,
    /// Tab key
    Tab,
    /// Enter key
    Enter,
    /// Space key
    Space,
    /// Home key
    Home,
    /// End key
    End,
    /// Any other key
    Unidentified,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value to a key.
    ///
    /// Accepts the standard names as well as the legacy IE/Edge spellings
    /// (`"Down"`, `"Esc"`, ...).
    #[must_use]
    pub fn from_dom_key(key: &str) -> Self {
        match key {
            "ArrowDown" | "Down" => Self::Down,
            "ArrowUp" | "Up" => Self::Up,
            "Escape" | "Esc" => Self::Escape,
            "Tab" => Self::Tab,
            "Enter" => Self::Enter,
            " " | "Spacebar" => Self::Space,
            "Home" => Self::Home,
            "End" => Self::End,
            _ => Self::Unidentified,
        }
    }

    /// Map a legacy numeric `keyCode` to a key.
    #[must_use]
    pub const fn from_key_code(code: u32) -> Self {
        match code {
            40 => Self::Down,
            38 => Self::Up,
            27 => Self::Escape,
            9 => Self::Tab,
            13 => Self::Enter,
            32 => Self::Space,
            36 => Self::Home,
            35 => Self::End,
            _ => Self::Unidentified,
        }
    }

    /// Legacy numeric `keyCode`, if the key has one.
    #[must_use]
    pub const fn key_code(self) -> Option<u32> {
        match self {
            Self::Down => Some(40),
            Self::Up => Some(38),
            Self::Escape => Some(27),
            Self::Tab => Some(9),
            Self::Enter => Some(13),
            Self::Space => Some(32),
            Self::Home => Some(36),
            Self::End => Some(35),
            Self::Unidentified => None,
        }
    }
}

/// An input event in flight.
///
/// Listeners receive it mutably so they can cancel the host's default action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputEvent {
    event_type: EventType,
    key: Option<Key>,
    default_prevented: bool,
}

impl InputEvent {
    /// Create a click event.
    #[must_use]
    pub const fn click() -> Self {
        Self {
            event_type: EventType::Click,
            key: None,
            default_prevented: false,
        }
    }

    /// Create a keydown event.
    #[must_use]
    pub const fn key_down(key: Key) -> Self {
        Self {
            event_type: EventType::KeyDown,
            key: Some(key),
            default_prevented: false,
        }
    }

    /// Event type.
    #[must_use]
    pub const fn event_type(&self) -> EventType {
        self.event_type
    }

    /// Key for keyboard events.
    #[must_use]
    pub const fn key(&self) -> Option<Key> {
        self.key
    }

    /// Cancel the host's default action (scrolling, focus traversal).
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    /// Whether a listener cancelled the default action.
    #[must_use]
    pub const fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_event_type_names() {
        assert_eq!(EventType::Click.as_str(), "click");
        assert_eq!(EventType::KeyDown.to_string(), "keydown");
    }

    #[test]
    fn test_from_dom_key_standard_names() {
        assert_eq!(Key::from_dom_key("ArrowDown"), Key::Down);
        assert_eq!(Key::from_dom_key("ArrowUp"), Key::Up);
        assert_eq!(Key::from_dom_key("Escape"), Key::Escape);
        assert_eq!(Key::from_dom_key("Tab"), Key::Tab);
        assert_eq!(Key::from_dom_key(" "), Key::Space);
    }

    #[test]
    fn test_from_dom_key_legacy_names() {
        assert_eq!(Key::from_dom_key("Down"), Key::Down);
        assert_eq!(Key::from_dom_key("Up"), Key::Up);
        assert_eq!(Key::from_dom_key("Esc"), Key::Escape);
        assert_eq!(Key::from_dom_key("Spacebar"), Key::Space);
    }

    #[test]
    fn test_from_dom_key_unknown() {
        assert_eq!(Key::from_dom_key("a"), Key::Unidentified);
        assert_eq!(Key::from_dom_key(""), Key::Unidentified);
    }

    #[test]
    fn test_from_key_code() {
        assert_eq!(Key::from_key_code(40), Key::Down);
        assert_eq!(Key::from_key_code(38), Key::Up);
        assert_eq!(Key::from_key_code(27), Key::Escape);
        assert_eq!(Key::from_key_code(9), Key::Tab);
        assert_eq!(Key::from_key_code(65), Key::Unidentified);
    }

    #[test]
    fn test_input_event_prevent_default() {
        let mut event = InputEvent::key_down(Key::Down);
        assert!(!event.is_default_prevented());
        event.prevent_default();
        assert!(event.is_default_prevented());
    }

    #[test]
    fn test_click_has_no_key() {
        let event = InputEvent::click();
        assert_eq!(event.event_type(), EventType::Click);
        assert_eq!(event.key(), None);
    }

    proptest! {
        #[test]
        fn prop_key_code_consistent(code in 0u32..256) {
            let key = Key::from_key_code(code);
            if let Some(back) = key.key_code() {
                prop_assert_eq!(back, code);
            } else {
                prop_assert_eq!(key, Key::Unidentified);
            }
        }
    }
}
