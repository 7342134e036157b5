//! Menu button configuration.
//!
//! # Example
//!
//! ```
//! use menubutton_core::MenuButtonConfig;
//!
//! let config = MenuButtonConfig::from_yaml("item_selector: \"[role=menuitem]\"").unwrap_or_default();
//! assert_eq!(config.opens_attribute, "data-inclusive-menu-opens");
//! ```

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Default trigger attribute naming the controlled menu's id.
pub const DEFAULT_OPENS_ATTRIBUTE: &str = "data-inclusive-menu-opens";

/// Default selector enumerating menu items.
pub const DEFAULT_ITEM_SELECTOR: &str = "button";

/// How a menu button finds its menu and items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuButtonConfig {
    /// Trigger attribute holding the menu id
    pub opens_attribute: String,
    /// Selector for items inside the menu
    pub item_selector: String,
}

impl Default for MenuButtonConfig {
    fn default() -> Self {
        Self {
            opens_attribute: DEFAULT_OPENS_ATTRIBUTE.to_string(),
            item_selector: DEFAULT_ITEM_SELECTOR.to_string(),
        }
    }
}

impl MenuButtonConfig {
    /// Create the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the trigger attribute naming the menu id.
    #[must_use]
    pub fn opens_attribute(mut self, name: impl Into<String>) -> Self {
        self.opens_attribute = name.into();
        self
    }

    /// Set the item selector.
    #[must_use]
    pub fn item_selector(mut self, selector: impl Into<String>) -> Self {
        self.item_selector = selector.into();
        self
    }

    /// Parse from YAML. Missing fields keep their defaults.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml_ng::from_str(yaml)?;
        config.validate()
    }

    /// Parse from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()
    }

    fn validate(self) -> Result<Self, ConfigError> {
        if self.opens_attribute.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "opens_attribute".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        if self.item_selector.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "item_selector".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        Ok(self)
    }
}
