//! In-memory host document.
//!
//! Arena-backed element tree used natively and by every test. It follows
//! the browser semantics a menu button relies on:
//!
//! - `hidden` is reflected as the `hidden` attribute
//! - `getElementById` only sees elements connected to the document
//! - focusing an element inside a hidden subtree does nothing
//! - listeners run synchronously in installation order, with no capture or
//!   bubbling phase
//!
//! # Example
//!
//! ```
//! use menubutton_core::{Document, Host};
//!
//! let doc = Document::new();
//! let menu = doc.append_element(doc.body(), "div");
//! doc.set_attribute(&menu, "id", "actions");
//! assert_eq!(doc.get_element_by_id("actions"), Some(menu));
//! ```

use crate::aria::{HIDDEN, ID};
use crate::event::{EventType, InputEvent, Key};
use crate::host::{Host, Listener};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;
use tracing::{trace, warn};

/// Element identifier (index into the arena).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    /// The `<body>` element every document starts with.
    pub const ROOT: Self = Self(0);

    fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#node{}", self.0)
    }
}

#[derive(Debug)]
struct Node {
    tag: String,
    attributes: Vec<(String, String)>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Node {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attributes: Vec::new(),
            parent: None,
            children: Vec::new(),
        }
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }
}

type SharedListener = Rc<dyn Fn(&mut InputEvent)>;

/// In-memory document implementing [`Host`].
pub struct Document {
    nodes: RefCell<Vec<Node>>,
    listeners: RefCell<HashMap<(NodeId, EventType), Vec<SharedListener>>>,
    active: Cell<Option<NodeId>>,
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("nodes", &self.nodes.borrow().len())
            .field("active", &self.active.get())
            .finish_non_exhaustive()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create a document holding only a `<body>` element.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: RefCell::new(vec![Node::new("body")]),
            listeners: RefCell::new(HashMap::new()),
            active: Cell::new(None),
        }
    }

    /// The `<body>` element.
    #[must_use]
    pub const fn body(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Create a detached element.
    pub fn create_element(&self, tag: &str) -> NodeId {
        let mut nodes = self.nodes.borrow_mut();
        let id = NodeId(nodes.len() as u32);
        nodes.push(Node::new(tag));
        id
    }

    /// Append `child` as the last child of `parent`, detaching it first.
    pub fn append_child(&self, parent: NodeId, child: NodeId) {
        let mut nodes = self.nodes.borrow_mut();
        if parent.index() >= nodes.len() || child.index() >= nodes.len() || parent == child {
            warn!(%parent, %child, "append_child ignored: invalid nodes");
            return;
        }
        if let Some(old_parent) = nodes[child.index()].parent.take() {
            nodes[old_parent.index()].children.retain(|&c| c != child);
        }
        nodes[child.index()].parent = Some(parent);
        nodes[parent.index()].children.push(child);
    }

    /// Create an element and append it to `parent`.
    pub fn append_element(&self, parent: NodeId, tag: &str) -> NodeId {
        let child = self.create_element(tag);
        self.append_child(parent, child);
        child
    }

    /// Detach an element from its parent.
    pub fn remove(&self, node: NodeId) {
        let mut nodes = self.nodes.borrow_mut();
        let Some(parent) = nodes.get_mut(node.index()).and_then(|n| n.parent.take()) else {
            return;
        };
        nodes[parent.index()].children.retain(|&c| c != node);
    }

    /// Lowercase tag name.
    #[must_use]
    pub fn tag_name(&self, node: NodeId) -> Option<String> {
        self.nodes.borrow().get(node.index()).map(|n| n.tag.clone())
    }

    /// Parent element.
    #[must_use]
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.borrow().get(node.index()).and_then(|n| n.parent)
    }

    /// Child elements in order.
    #[must_use]
    pub fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.nodes
            .borrow()
            .get(node.index())
            .map(|n| n.children.clone())
            .unwrap_or_default()
    }

    /// Whether the attribute is present.
    #[must_use]
    pub fn has_attribute(&self, node: NodeId, name: &str) -> bool {
        self.nodes
            .borrow()
            .get(node.index())
            .is_some_and(|n| n.attribute(name).is_some())
    }

    /// Whether the element is attached to the document tree.
    #[must_use]
    pub fn is_connected(&self, node: NodeId) -> bool {
        self.ancestors_inclusive(node).last().copied() == Some(NodeId::ROOT)
    }

    /// Whether the element or any ancestor is hidden.
    #[must_use]
    pub fn is_in_hidden_subtree(&self, node: NodeId) -> bool {
        self.ancestors_inclusive(node)
            .into_iter()
            .any(|n| self.has_attribute(n, HIDDEN))
    }

    /// Clear focus.
    pub fn blur(&self) {
        self.active.set(None);
    }

    /// Number of listeners installed for `event_type` on `target`.
    #[must_use]
    pub fn listener_count(&self, target: NodeId, event_type: EventType) -> usize {
        self.listeners
            .borrow()
            .get(&(target, event_type))
            .map_or(0, Vec::len)
    }

    /// Dispatch an event to `target`'s listeners.
    ///
    /// Returns `false` if a listener cancelled the default action. The
    /// listener list is snapshotted first so listeners may freely mutate the
    /// document or install more listeners.
    pub fn dispatch(&self, target: NodeId, event: &mut InputEvent) -> bool {
        let snapshot: Vec<SharedListener> = self
            .listeners
            .borrow()
            .get(&(target, event.event_type()))
            .cloned()
            .unwrap_or_default();
        trace!(node = %target, event = %event.event_type(), listeners = snapshot.len(), "dispatch");
        for listener in snapshot {
            listener(event);
        }
        !event.is_default_prevented()
    }

    /// Dispatch a click on `target`, returning the event after dispatch.
    pub fn click(&self, target: NodeId) -> InputEvent {
        let mut event = InputEvent::click();
        self.dispatch(target, &mut event);
        event
    }

    /// Dispatch a keydown on `target`, returning the event after dispatch.
    pub fn key_down(&self, target: NodeId, key: Key) -> InputEvent {
        let mut event = InputEvent::key_down(key);
        self.dispatch(target, &mut event);
        event
    }

    fn ancestors_inclusive(&self, node: NodeId) -> Vec<NodeId> {
        let nodes = self.nodes.borrow();
        let mut chain = Vec::new();
        let mut current = Some(node);
        while let Some(id) = current {
            let Some(n) = nodes.get(id.index()) else {
                break;
            };
            chain.push(id);
            current = n.parent;
        }
        chain
    }

    fn descendants(&self, root: NodeId) -> Vec<NodeId> {
        let nodes = self.nodes.borrow();
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = nodes
            .get(root.index())
            .map(|n| n.children.iter().rev().copied().collect())
            .unwrap_or_default();
        while let Some(id) = stack.pop() {
            out.push(id);
            if let Some(n) = nodes.get(id.index()) {
                stack.extend(n.children.iter().rev().copied());
            }
        }
        out
    }

    fn matches(&self, node: NodeId, selector: &SimpleSelector) -> bool {
        let nodes = self.nodes.borrow();
        let Some(n) = nodes.get(node.index()) else {
            return false;
        };
        match selector {
            SimpleSelector::Universal => true,
            SimpleSelector::Tag(tag) => n.tag.eq_ignore_ascii_case(tag),
            SimpleSelector::Id(id) => n.attribute(ID) == Some(id.as_str()),
            SimpleSelector::Class(class) => n
                .attribute("class")
                .is_some_and(|c| c.split_whitespace().any(|token| token == class)),
            SimpleSelector::Attribute { name, value } => match (n.attribute(name), value) {
                (Some(_), None) => true,
                (Some(actual), Some(expected)) => actual == expected,
                (None, _) => false,
            },
        }
    }
}

impl Host for Document {
    type Element = NodeId;

    fn get_attribute(&self, element: &NodeId, name: &str) -> Option<String> {
        self.nodes
            .borrow()
            .get(element.index())
            .and_then(|n| n.attribute(name).map(str::to_string))
    }

    fn set_attribute(&self, element: &NodeId, name: &str, value: &str) {
        let mut nodes = self.nodes.borrow_mut();
        let Some(node) = nodes.get_mut(element.index()) else {
            return;
        };
        if let Some(slot) = node.attributes.iter_mut().find(|(n, _)| n == name) {
            slot.1 = value.to_string();
        } else {
            node.attributes.push((name.to_string(), value.to_string()));
        }
    }

    fn remove_attribute(&self, element: &NodeId, name: &str) {
        if let Some(node) = self.nodes.borrow_mut().get_mut(element.index()) {
            node.attributes.retain(|(n, _)| n != name);
        }
    }

    fn is_hidden(&self, element: &NodeId) -> bool {
        self.has_attribute(*element, HIDDEN)
    }

    fn set_hidden(&self, element: &NodeId, hidden: bool) {
        if hidden {
            self.set_attribute(element, HIDDEN, "");
        } else {
            self.remove_attribute(element, HIDDEN);
        }
    }

    fn focus(&self, element: &NodeId) {
        if !self.is_connected(*element) || self.is_in_hidden_subtree(*element) {
            trace!(target_node = %element, "focus ignored: element not focusable");
            return;
        }
        self.active.set(Some(*element));
    }

    fn active_element(&self) -> Option<NodeId> {
        self.active.get()
    }

    fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        if id.is_empty() {
            return None;
        }
        let selector = SimpleSelector::Id(id.to_string());
        self.descendants(NodeId::ROOT)
            .into_iter()
            .find(|&n| self.matches(n, &selector))
    }

    fn query_selector_all(&self, root: &NodeId, selector: &str) -> Vec<NodeId> {
        let Some(parsed) = SimpleSelector::parse(selector) else {
            warn!(selector, "unsupported selector");
            return Vec::new();
        };
        self.descendants(*root)
            .into_iter()
            .filter(|&n| self.matches(n, &parsed))
            .collect()
    }

    fn add_event_listener(&self, target: &NodeId, event_type: EventType, listener: Listener) {
        self.listeners
            .borrow_mut()
            .entry((*target, event_type))
            .or_default()
            .push(Rc::from(listener));
    }
}

/// Single-component selector understood by [`Document`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimpleSelector {
    /// `*`
    Universal,
    /// `button`
    Tag(String),
    /// `#id`
    Id(String),
    /// `.class`
    Class(String),
    /// `[name]` or `[name=value]`
    Attribute {
        /// Attribute name
        name: String,
        /// Required value, if any
        value: Option<String>,
    },
}

impl SimpleSelector {
    /// Parse a selector string.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.is_empty() {
            return None;
        }

        if s == "*" {
            Some(Self::Universal)
        } else if let Some(id) = s.strip_prefix('#') {
            Self::identifier(id).map(Self::Id)
        } else if let Some(class) = s.strip_prefix('.') {
            Self::identifier(class).map(Self::Class)
        } else if let Some(inner) = s.strip_prefix('[').and_then(|r| r.strip_suffix(']')) {
            match inner.split_once('=') {
                Some((name, value)) => {
                    let value = value.trim().trim_matches(|c: char| c == '"' || c == '\'');
                    Some(Self::Attribute {
                        name: Self::identifier(name.trim())?,
                        value: Some(value.to_string()),
                    })
                }
                None => Some(Self::Attribute {
                    name: Self::identifier(inner.trim())?,
                    value: None,
                }),
            }
        } else {
            Self::identifier(s).map(|tag| Self::Tag(tag.to_ascii_lowercase()))
        }
    }

    fn identifier(s: &str) -> Option<String> {
        let valid = !s.is_empty()
            && s
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        valid.then(|| s.to_string())
    }
}
