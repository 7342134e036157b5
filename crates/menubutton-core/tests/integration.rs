//! Integration tests for menubutton-core.
//!
//! Exercise the in-memory document through the `Host` contract only.

use menubutton_core::{
    aria, AriaRole, Document, EventType, Host, InputEvent, Key, MenuButtonConfig, NodeId,
};
use std::cell::RefCell;
use std::rc::Rc;

fn find<H: Host>(host: &H, id: &str, selector: &str) -> Vec<H::Element> {
    host.get_element_by_id(id)
        .map(|menu| host.query_selector_all(&menu, selector))
        .unwrap_or_default()
}

// =============================================================================
// Host Contract Tests
// =============================================================================

#[test]
fn test_generic_lookup_through_host() {
    let doc = Document::new();
    let menu = doc.append_element(doc.body(), "ul");
    doc.set_attribute(&menu, "id", "nav");
    let group = doc.append_element(menu, "li");
    let nested = doc.append_element(group, "button");
    let direct = doc.append_element(menu, "button");

    assert_eq!(find(&doc, "nav", "button"), vec![nested, direct]);
    assert!(find(&doc, "missing", "button").is_empty());
}

#[test]
fn test_default_selector_matches_buttons_only() {
    let doc = Document::new();
    let menu = doc.append_element(doc.body(), "div");
    doc.set_attribute(&menu, "id", "m");
    let item = doc.append_element(menu, "button");
    doc.append_element(menu, "a");

    let config = MenuButtonConfig::default();
    assert_eq!(find(&doc, "m", &config.item_selector), vec![item]);
}

#[test]
fn test_hidden_menu_blocks_focus() {
    let doc = Document::new();
    let menu = doc.append_element(doc.body(), "div");
    let item = doc.append_element(menu, "button");
    doc.set_hidden(&menu, true);

    doc.focus(&item);
    assert_eq!(doc.active_element(), None);

    doc.set_hidden(&menu, false);
    doc.focus(&item);
    assert_eq!(doc.active_element(), Some(item));
}

#[test]
fn test_aria_values_round_trip_through_attributes() {
    let doc = Document::new();
    let trigger = doc.append_element(doc.body(), "button");

    doc.set_attribute(&trigger, aria::ARIA_EXPANDED, aria::encode_bool(true));
    let read = doc.get_attribute(&trigger, aria::ARIA_EXPANDED);
    assert!(aria::decode_bool(read.as_deref()));

    doc.set_attribute(&trigger, aria::ROLE, AriaRole::Menu.as_str());
    let role = doc.get_attribute(&trigger, aria::ROLE);
    assert_eq!(role.as_deref().and_then(AriaRole::parse), Some(AriaRole::Menu));
}

// =============================================================================
// Dispatch Tests
// =============================================================================

#[test]
fn test_listeners_see_key_and_can_cancel() {
    let doc = Rc::new(Document::new());
    let button = doc.append_element(doc.body(), "button");
    let seen: Rc<RefCell<Vec<Option<Key>>>> = Rc::new(RefCell::new(Vec::new()));

    let log = Rc::clone(&seen);
    doc.add_event_listener(
        &button,
        EventType::KeyDown,
        Box::new(move |event: &mut InputEvent| {
            log.borrow_mut().push(event.key());
            if event.key() == Some(Key::Escape) {
                event.prevent_default();
            }
        }),
    );

    assert!(!doc.key_down(button, Key::Down).is_default_prevented());
    assert!(doc.key_down(button, Key::Escape).is_default_prevented());
    assert!(!doc.click(button).is_default_prevented());
    assert_eq!(*seen.borrow(), vec![Some(Key::Down), Some(Key::Escape)]);
}

#[test]
fn test_listener_may_mutate_document_during_dispatch() {
    let doc = Rc::new(Document::new());
    let button = doc.append_element(doc.body(), "button");
    let weak = Rc::downgrade(&doc);

    doc.add_event_listener(
        &button,
        EventType::Click,
        Box::new(move |_: &mut InputEvent| {
            if let Some(doc) = weak.upgrade() {
                let target: NodeId = doc.append_element(doc.body(), "span");
                doc.set_attribute(&target, "data-added", "yes");
                doc.add_event_listener(&target, EventType::Click, Box::new(|_: &mut InputEvent| {}));
            }
        }),
    );

    doc.click(button);
    doc.click(button);

    assert_eq!(doc.children(doc.body()).len(), 3);
}
