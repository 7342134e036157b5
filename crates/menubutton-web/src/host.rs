//! [`Host`] over the live browser DOM.

use crate::events::to_input_event;
use menubutton::{EventType, Host, Listener};
use std::cell::RefCell;
use std::fmt;
use tracing::warn;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{window, Document, Element, HtmlElement};

struct Registration {
    target: Element,
    event_type: EventType,
    closure: Closure<dyn FnMut(web_sys::Event)>,
}

/// Browser document host.
///
/// Owns the closures backing every listener it installs. Dropping the host
/// detaches them from their elements.
pub struct WebHost {
    document: Document,
    registrations: RefCell<Vec<Registration>>,
}

impl Drop for WebHost {
    fn drop(&mut self) {
        for reg in self.registrations.get_mut().drain(..) {
            let _ = reg.target.remove_event_listener_with_callback(
                reg.event_type.as_str(),
                reg.closure.as_ref().unchecked_ref(),
            );
        }
    }
}

impl fmt::Debug for WebHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebHost")
            .field("listeners", &self.registrations.borrow().len())
            .finish_non_exhaustive()
    }
}

impl WebHost {
    /// Host over the window's document.
    pub fn new() -> Result<Self, JsValue> {
        let document = window()
            .ok_or("No window")?
            .document()
            .ok_or("No document")?;
        Ok(Self::from_document(document))
    }

    /// Host over an explicit document.
    pub fn from_document(document: Document) -> Self {
        Self {
            document,
            registrations: RefCell::new(Vec::new()),
        }
    }

    /// Underlying document.
    pub fn document(&self) -> &Document {
        &self.document
    }
}

impl Host for WebHost {
    type Element = Element;

    fn get_attribute(&self, element: &Element, name: &str) -> Option<String> {
        element.get_attribute(name)
    }

    fn set_attribute(&self, element: &Element, name: &str, value: &str) {
        if let Err(err) = element.set_attribute(name, value) {
            warn!(name, ?err, "set_attribute failed");
        }
    }

    fn remove_attribute(&self, element: &Element, name: &str) {
        if let Err(err) = element.remove_attribute(name) {
            warn!(name, ?err, "remove_attribute failed");
        }
    }

    fn is_hidden(&self, element: &Element) -> bool {
        element
            .dyn_ref::<HtmlElement>()
            .map_or_else(|| element.has_attribute("hidden"), HtmlElement::hidden)
    }

    fn set_hidden(&self, element: &Element, hidden: bool) {
        match element.dyn_ref::<HtmlElement>() {
            Some(html) => html.set_hidden(hidden),
            None if hidden => self.set_attribute(element, "hidden", ""),
            None => self.remove_attribute(element, "hidden"),
        }
    }

    fn focus(&self, element: &Element) {
        if let Some(html) = element.dyn_ref::<HtmlElement>() {
            if let Err(err) = html.focus() {
                warn!(?err, "focus failed");
            }
        }
    }

    fn active_element(&self) -> Option<Element> {
        self.document.active_element()
    }

    fn get_element_by_id(&self, id: &str) -> Option<Element> {
        if id.is_empty() {
            return None;
        }
        self.document.get_element_by_id(id)
    }

    fn query_selector_all(&self, root: &Element, selector: &str) -> Vec<Element> {
        let list = match root.query_selector_all(selector) {
            Ok(list) => list,
            Err(err) => {
                warn!(selector, ?err, "invalid selector");
                return Vec::new();
            }
        };
        (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }

    fn add_event_listener(&self, element: &Element, event_type: EventType, listener: Listener) {
        let closure = Closure::<dyn FnMut(web_sys::Event)>::new(move |event: web_sys::Event| {
            let mut input = to_input_event(&event, event_type);
            listener(&mut input);
            if input.is_default_prevented() {
                event.prevent_default();
            }
        });
        if let Err(err) = element
            .add_event_listener_with_callback(event_type.as_str(), closure.as_ref().unchecked_ref())
        {
            warn!(event = %event_type, ?err, "add_event_listener failed");
            return;
        }
        self.registrations.borrow_mut().push(Registration {
            target: element.clone(),
            event_type,
            closure,
        });
    }
}
