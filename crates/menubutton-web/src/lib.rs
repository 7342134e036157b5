#![allow(clippy::doc_markdown)]
//! Browser bindings for the accessible menu button.
//!
//! Exposes `MenuButton` to JavaScript and a [`Host`](menubutton::Host)
//! implementation over the live DOM. Everything but key resolution is
//! compiled for `wasm32` only.
//!
//! ```js
//! import { MenuButton } from "menubutton-web";
//!
//! const button = new MenuButton(document.querySelector("[data-inclusive-menu-opens]"));
//! button.on("choose", (item) => console.log(item.textContent));
//! ```

pub mod events;

#[cfg(target_arch = "wasm32")]
mod bindings;
#[cfg(target_arch = "wasm32")]
mod host;

#[cfg(target_arch = "wasm32")]
pub use bindings::JsMenuButton;
#[cfg(target_arch = "wasm32")]
pub use host::WebHost;
