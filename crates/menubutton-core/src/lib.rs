#![cfg_attr(test, allow(clippy::unwrap_used))]
#![allow(clippy::doc_markdown, clippy::cast_possible_truncation)]
//! Core types for accessible menu buttons.
//!
//! This crate provides the pieces a menu button controller is built from:
//! - Host contract: [`Host`], the DOM operations the controller relies on
//! - In-memory host: [`Document`], used natively and in tests
//! - Input events: [`InputEvent`], [`EventType`], [`Key`]
//! - ARIA vocabulary: [`aria`]
//! - Configuration and errors: [`MenuButtonConfig`], [`MenuButtonError`]

pub mod aria;
mod config;
mod document;
mod error;
mod event;
mod host;

pub use aria::AriaRole;
pub use config::{MenuButtonConfig, DEFAULT_ITEM_SELECTOR, DEFAULT_OPENS_ATTRIBUTE};
pub use document::{Document, NodeId, SimpleSelector};
pub use error::{ConfigError, MenuButtonError};
pub use event::{EventType, InputEvent, Key};
pub use host::{Host, Listener};
