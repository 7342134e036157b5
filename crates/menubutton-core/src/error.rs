//! Error types for menu button construction and configuration.

use thiserror::Error;

/// Construction-time failures of a menu button.
///
/// Both variants are fatal: the controller is not created and no listeners
/// are installed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MenuButtonError {
    /// The id named by the trigger does not resolve in the document.
    #[error("#{id} menu missing")]
    MissingMenu {
        /// Referenced menu id
        id: String,
    },

    /// The menu exists but has no item children.
    #[error("the #{id} menu has no menu items")]
    EmptyMenu {
        /// Menu id
        id: String,
    },
}

impl MenuButtonError {
    /// Id of the menu the error refers to.
    #[must_use]
    pub fn menu_id(&self) -> &str {
        match self {
            Self::MissingMenu { id } | Self::EmptyMenu { id } => id,
        }
    }
}

/// Errors raised while loading a [`MenuButtonConfig`](crate::MenuButtonConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// YAML parsing error.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// JSON parsing error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A field parsed but holds an unusable value.
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue {
        /// Field name
        field: String,
        /// Error message
        message: String,
    },
}
