//! ARIA vocabulary used by the menu button pattern.
//!
//! Attribute names and values are written to the host document verbatim;
//! assistive technology reads them back, so the strings here are exact.

use serde::{Deserialize, Serialize};
use std::fmt;

/// `aria-haspopup` attribute.
pub const ARIA_HASPOPUP: &str = "aria-haspopup";
/// `aria-expanded` attribute.
pub const ARIA_EXPANDED: &str = "aria-expanded";
/// `role` attribute.
pub const ROLE: &str = "role";
/// `tabindex` attribute.
pub const TABINDEX: &str = "tabindex";
/// `hidden` attribute (reflected by the `hidden` property).
pub const HIDDEN: &str = "hidden";
/// `id` attribute.
pub const ID: &str = "id";

/// Tab index that removes an element from sequential focus order.
pub const TABINDEX_PROGRAMMATIC: &str = "-1";

/// ARIA roles assigned by the menu button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AriaRole {
    /// Container of menu items
    Menu,
    /// Selectable entry in a menu
    #[serde(rename = "menuitem")]
    MenuItem,
}

impl AriaRole {
    /// Attribute value for this role.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Menu => "menu",
            Self::MenuItem => "menuitem",
        }
    }

    /// Parse a `role` attribute value.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "menu" => Some(Self::Menu),
            "menuitem" => Some(Self::MenuItem),
            _ => None,
        }
    }
}

impl fmt::Display for AriaRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Encode a boolean ARIA state (`"true"` / `"false"`).
#[must_use]
pub const fn encode_bool(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

/// Decode a boolean ARIA state.
///
/// Only the literal `"true"` is true; a missing or malformed value is false.
#[must_use]
pub fn decode_bool(value: Option<&str>) -> bool {
    value == Some("true")
}
