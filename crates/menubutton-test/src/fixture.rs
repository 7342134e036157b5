//! Menu button fixtures.
//!
//! A fixture is a fresh [`Document`] holding a trigger button, the menu it
//! references and a control after the menu for focus traversal checks.
//!
//! # Example
//!
//! ```
//! use menubutton_test::MenuFixture;
//!
//! let fixture = MenuFixture::new().items(2).build();
//! assert_eq!(fixture.items.len(), 2);
//!
//! let yaml = MenuFixture::from_yaml("menu_id: tools\nitems: 4\n").unwrap();
//! assert_eq!(yaml.build().items.len(), 4);
//! ```

use menubutton_core::{Document, Host, NodeId, DEFAULT_ITEM_SELECTOR, DEFAULT_OPENS_ATTRIBUTE};
use serde::{Deserialize, Serialize};
use std::rc::Rc;
use thiserror::Error;

/// Error loading a fixture description.
#[derive(Debug, Error)]
pub enum FixtureError {
    /// YAML parsing error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
    /// Description is structurally valid but unusable
    #[error("invalid fixture format: {0}")]
    InvalidFormat(String),
}

/// Description of a trigger/menu document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuFixture {
    /// `id` of the menu element
    pub menu_id: String,
    /// Id the trigger references; `None` references `menu_id`
    pub reference: Option<String>,
    /// Attribute on the trigger naming the menu
    pub opens_attribute: String,
    /// Whether the menu element is created at all
    pub with_menu: bool,
    /// Number of items
    pub items: usize,
    /// Tag used for items
    pub item_tag: String,
    /// Non-item children appended to the menu after the items
    pub extra_children: Vec<String>,
}

impl Default for MenuFixture {
    fn default() -> Self {
        Self {
            menu_id: "menu".to_string(),
            reference: None,
            opens_attribute: DEFAULT_OPENS_ATTRIBUTE.to_string(),
            with_menu: true,
            items: 3,
            item_tag: DEFAULT_ITEM_SELECTOR.to_string(),
            extra_children: Vec::new(),
        }
    }
}

impl MenuFixture {
    /// Three `button` items in a menu with id `menu`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a description from YAML.
    ///
    /// # Errors
    ///
    /// Returns an error on malformed YAML or an empty menu id.
    pub fn from_yaml(yaml: &str) -> Result<Self, FixtureError> {
        let fixture: Self = serde_yaml_ng::from_str(yaml)?;
        if fixture.menu_id.trim().is_empty() {
            return Err(FixtureError::InvalidFormat("menu_id is empty".to_string()));
        }
        Ok(fixture)
    }

    /// Set the menu id.
    pub fn menu_id(mut self, id: impl Into<String>) -> Self {
        self.menu_id = id.into();
        self
    }

    /// Make the trigger reference a different id.
    pub fn references(mut self, id: impl Into<String>) -> Self {
        self.reference = Some(id.into());
        self
    }

    /// Set the attribute naming the menu.
    pub fn opens_attribute(mut self, name: impl Into<String>) -> Self {
        self.opens_attribute = name.into();
        self
    }

    /// Leave the menu out of the document.
    pub fn without_menu(mut self) -> Self {
        self.with_menu = false;
        self
    }

    /// Set the item count.
    pub fn items(mut self, count: usize) -> Self {
        self.items = count;
        self
    }

    /// Set the item tag.
    pub fn item_tag(mut self, tag: impl Into<String>) -> Self {
        self.item_tag = tag.into();
        self
    }

    /// Append a non-item child to the menu.
    pub fn extra_child(mut self, tag: impl Into<String>) -> Self {
        self.extra_children.push(tag.into());
        self
    }

    /// Build the document.
    pub fn build(&self) -> Fixture {
        let document = Rc::new(Document::new());
        let body = document.body();

        let trigger = document.append_element(body, "button");
        let reference = self.reference.as_deref().unwrap_or(&self.menu_id);
        document.set_attribute(&trigger, &self.opens_attribute, reference);

        let mut items = Vec::with_capacity(self.items);
        let mut extras = Vec::new();
        let menu = self.with_menu.then(|| {
            let menu = document.append_element(body, "div");
            document.set_attribute(&menu, "id", &self.menu_id);
            for _ in 0..self.items {
                items.push(document.append_element(menu, &self.item_tag));
            }
            for tag in &self.extra_children {
                extras.push(document.append_element(menu, tag));
            }
            menu
        });

        let after = document.append_element(body, "a");
        document.set_attribute(&after, "href", "#after");

        Fixture {
            document,
            trigger,
            menu,
            items,
            extras,
            after,
        }
    }
}

/// A built fixture.
#[derive(Debug, Clone)]
pub struct Fixture {
    /// The document
    pub document: Rc<Document>,
    /// Trigger button
    pub trigger: NodeId,
    /// Menu element, unless built `without_menu`
    pub menu: Option<NodeId>,
    /// Items in document order
    pub items: Vec<NodeId>,
    /// Non-item menu children
    pub extras: Vec<NodeId>,
    /// Link following the menu
    pub after: NodeId,
}

impl Fixture {
    /// Menu element.
    ///
    /// # Panics
    ///
    /// Panics if the fixture was built without a menu.
    pub fn menu(&self) -> NodeId {
        self.menu.expect("fixture built without a menu")
    }

    /// Shared handle to the document.
    pub fn host(&self) -> Rc<Document> {
        Rc::clone(&self.document)
    }
}
