//! Host document contract.
//!
//! A menu button never owns the elements it drives. Element lookup,
//! attribute storage, focus delivery and event dispatch all belong to the
//! host: a browser document in WASM, or the in-memory
//! [`Document`](crate::Document) natively and in tests.
//!
//! Every method takes `&self`. Hosts are shared between the controller and
//! the listeners it installs, and listeners mutate the document while the
//! host is dispatching, so implementations use interior mutability the way
//! browser DOM handles do.

use crate::event::{EventType, InputEvent};
use std::fmt;

/// Listener installed on a host element.
pub type Listener = Box<dyn Fn(&mut InputEvent)>;

/// The DOM operations a menu button needs from its host.
pub trait Host {
    /// Handle to an element in this host.
    type Element: Clone + PartialEq + fmt::Debug + 'static;

    /// Read an attribute.
    fn get_attribute(&self, element: &Self::Element, name: &str) -> Option<String>;

    /// Write an attribute, replacing any previous value.
    fn set_attribute(&self, element: &Self::Element, name: &str, value: &str);

    /// Remove an attribute if present.
    fn remove_attribute(&self, element: &Self::Element, name: &str);

    /// Read the `hidden` property.
    fn is_hidden(&self, element: &Self::Element) -> bool;

    /// Write the `hidden` property.
    fn set_hidden(&self, element: &Self::Element, hidden: bool);

    /// Move focus to an element.
    fn focus(&self, element: &Self::Element);

    /// Currently focused element, if any.
    fn active_element(&self) -> Option<Self::Element>;

    /// Resolve an id against the document.
    fn get_element_by_id(&self, id: &str) -> Option<Self::Element>;

    /// Descendants of `root` matching `selector`, in document order.
    fn query_selector_all(&self, root: &Self::Element, selector: &str) -> Vec<Self::Element>;

    /// Install a listener for `event_type` on `target`.
    ///
    /// Listeners for the same target and type run in installation order.
    fn add_event_listener(&self, target: &Self::Element, event_type: EventType, listener: Listener);
}
