//! Browser event conversion.

use menubutton::Key;

/// Resolve a keyboard event's key from its `key` string, falling back to
/// the legacy `keyCode` for browsers that report neither name form.
pub fn resolve_key(key: &str, key_code: u32) -> Key {
    match Key::from_dom_key(key) {
        Key::Unidentified => Key::from_key_code(key_code),
        key => key,
    }
}

#[cfg(target_arch = "wasm32")]
pub use self::wasm::to_input_event;

#[cfg(target_arch = "wasm32")]
mod wasm {
    use super::resolve_key;
    use menubutton::{EventType, InputEvent, Key};
    use wasm_bindgen::JsCast;
    use web_sys::KeyboardEvent;

    /// Convert a DOM event delivered to a listener registered for `event_type`.
    pub fn to_input_event(event: &web_sys::Event, event_type: EventType) -> InputEvent {
        match event_type {
            EventType::Click => InputEvent::click(),
            EventType::KeyDown => {
                let key = event
                    .dyn_ref::<KeyboardEvent>()
                    .map_or(Key::Unidentified, keyboard_key);
                InputEvent::key_down(key)
            }
        }
    }

    #[allow(deprecated)]
    fn keyboard_key(event: &KeyboardEvent) -> Key {
        resolve_key(&event.key(), event.key_code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_key_prefers_name() {
        assert_eq!(resolve_key("ArrowDown", 0), Key::Down);
        assert_eq!(resolve_key("Esc", 0), Key::Escape);
        assert_eq!(resolve_key("Tab", 38), Key::Tab);
    }

    #[test]
    fn test_resolve_key_falls_back_to_code() {
        assert_eq!(resolve_key("", 40), Key::Down);
        assert_eq!(resolve_key("Unidentified", 38), Key::Up);
        assert_eq!(resolve_key("", 27), Key::Escape);
        assert_eq!(resolve_key("", 9), Key::Tab);
    }

    #[test]
    fn test_resolve_key_unknown() {
        assert_eq!(resolve_key("F5", 116), Key::Unidentified);
    }
}
