#![cfg_attr(test, allow(clippy::unwrap_used))]
#![allow(clippy::module_name_repetitions, clippy::doc_markdown)]
//! Accessible menu button.
//!
//! A [`MenuButton`] binds a trigger element to the menu it names, applies
//! the `menu`/`menuitem` roles, and drives open/close state and focus from
//! clicks and arrow, Escape and Tab keys.
//!
//! # Example
//!
//! ```
//! use menubutton::{Document, Host, MenuButton};
//! use std::rc::Rc;
//!
//! let doc = Rc::new(Document::new());
//! let trigger = doc.append_element(doc.body(), "button");
//! doc.set_attribute(&trigger, "data-inclusive-menu-opens", "file-menu");
//! let menu = doc.append_element(doc.body(), "div");
//! doc.set_attribute(&menu, "id", "file-menu");
//! let save = doc.append_element(menu, "button");
//!
//! let button = MenuButton::new(Rc::clone(&doc), trigger).unwrap();
//! button.open();
//! assert!(button.is_open());
//! assert_eq!(doc.active_element(), Some(save));
//! ```

mod controller;
mod notify;

pub use controller::{MenuButton, WeakMenuButton};
pub use notify::{EventKind, Handler, ListenerRegistry, MenuEvent, UnknownEventKind};

pub use menubutton_core::{
    aria, AriaRole, ConfigError, Document, EventType, Host, InputEvent, Key, MenuButtonConfig,
    MenuButtonError, NodeId,
};
