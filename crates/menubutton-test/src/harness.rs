//! Interaction harness over an in-memory [`Document`].

use menubutton_core::{aria, Document, Host, InputEvent, Key, NodeId};
use std::rc::Rc;
use tracing::trace;

/// Drives user input into a document and asserts on what it leaves behind.
#[derive(Debug)]
pub struct Harness {
    document: Rc<Document>,
    last_event: Option<InputEvent>,
}

impl Harness {
    /// Create a harness over `document`.
    pub fn new(document: Rc<Document>) -> Self {
        Self {
            document,
            last_event: None,
        }
    }

    /// The driven document.
    pub fn document(&self) -> &Rc<Document> {
        &self.document
    }

    // === Event Simulation ===

    /// Click `target`.
    pub fn click(&mut self, target: NodeId) -> &mut Self {
        trace!(node = %target, "harness click");
        self.last_event = Some(self.document.click(target));
        self
    }

    /// Press `key` on `target`.
    pub fn press(&mut self, target: NodeId, key: Key) -> &mut Self {
        trace!(node = %target, ?key, "harness key press");
        self.last_event = Some(self.document.key_down(target, key));
        self
    }

    /// Press `key` on whatever element has focus. No-op when nothing does.
    pub fn press_focused(&mut self, key: Key) -> &mut Self {
        if let Some(target) = self.document.active_element() {
            self.press(target, key);
        }
        self
    }

    /// Focus `target` directly.
    pub fn focus(&mut self, target: NodeId) -> &mut Self {
        self.document.focus(&target);
        self
    }

    /// Event from the most recent click or key press.
    pub fn last_event(&self) -> Option<&InputEvent> {
        self.last_event.as_ref()
    }

    /// Whether the most recent event had its default action cancelled.
    pub fn last_default_prevented(&self) -> bool {
        self.last_event
            .as_ref()
            .is_some_and(InputEvent::is_default_prevented)
    }

    /// Element with focus.
    pub fn focused(&self) -> Option<NodeId> {
        self.document.active_element()
    }

    // === Assertions ===

    /// Assert the trigger's `aria-expanded` state.
    pub fn assert_expanded(&self, trigger: NodeId, expected: bool) -> &Self {
        let value = self.document.get_attribute(&trigger, aria::ARIA_EXPANDED);
        assert_eq!(
            aria::decode_bool(value.as_deref()),
            expected,
            "expected {trigger} aria-expanded={expected}, found {value:?}"
        );
        self
    }

    /// Assert whether `node` carries `hidden`.
    pub fn assert_hidden(&self, node: NodeId, expected: bool) -> &Self {
        assert_eq!(
            self.document.is_hidden(&node),
            expected,
            "expected {node} hidden={expected}"
        );
        self
    }

    /// Assert `node` has focus.
    pub fn assert_focused(&self, node: NodeId) -> &Self {
        assert_eq!(
            self.focused(),
            Some(node),
            "expected focus on {node}, found {:?}",
            self.focused()
        );
        self
    }

    /// Assert the trigger reads expanded exactly when the menu is visible.
    pub fn assert_in_sync(&self, trigger: NodeId, menu: NodeId) -> &Self {
        let expanded =
            aria::decode_bool(self.document.get_attribute(&trigger, aria::ARIA_EXPANDED).as_deref());
        let visible = !self.document.is_hidden(&menu);
        assert_eq!(
            expanded, visible,
            "{trigger} aria-expanded={expanded} but {menu} visible={visible}"
        );
        self
    }

    /// Assert whether the most recent event's default action was cancelled.
    pub fn assert_default_prevented(&self, expected: bool) -> &Self {
        assert_eq!(
            self.last_default_prevented(),
            expected,
            "expected default_prevented={expected}"
        );
        self
    }
}
