//! JavaScript export.

use crate::host::WebHost;
use menubutton::{EventKind, MenuButton, MenuButtonConfig, MenuEvent};
use std::rc::Rc;
use tracing::warn;
use wasm_bindgen::prelude::*;
use web_sys::Element;

/// Menu button exported to JavaScript as `MenuButton`.
///
/// State-changing methods return a handle to the same controller so calls
/// can be chained.
#[wasm_bindgen(js_name = MenuButton)]
#[derive(Clone)]
pub struct JsMenuButton {
    inner: MenuButton<WebHost>,
}

#[wasm_bindgen(js_class = MenuButton)]
impl JsMenuButton {
    /// Bind to `button` with default options.
    #[wasm_bindgen(constructor)]
    pub fn new(button: Element) -> Result<JsMenuButton, JsValue> {
        Self::build(button, &MenuButtonConfig::default())
    }

    /// Bind to `button` with JSON options, e.g.
    /// `{"opens_attribute": "data-menu", "item_selector": "li"}`.
    #[wasm_bindgen(js_name = withOptions)]
    pub fn with_options(button: Element, options: &str) -> Result<JsMenuButton, JsValue> {
        let config = MenuButtonConfig::from_json(options).map_err(|e| js_error(&e))?;
        Self::build(button, &config)
    }

    /// Open the menu.
    pub fn open(&self) -> JsMenuButton {
        self.inner.open();
        self.clone()
    }

    /// Close the menu.
    pub fn close(&self) -> JsMenuButton {
        self.inner.close();
        self.clone()
    }

    /// Toggle the menu.
    pub fn toggle(&self) -> JsMenuButton {
        self.inner.toggle();
        self.clone()
    }

    /// Fire `choose` with `item`.
    pub fn select(&self, item: Element) -> JsMenuButton {
        self.inner.select(&item);
        self.clone()
    }

    /// Subscribe `callback` to `"open"`, `"close"` or `"choose"`.
    ///
    /// `choose` callbacks receive the chosen element.
    pub fn on(&self, kind: &str, callback: js_sys::Function) -> Result<JsMenuButton, JsValue> {
        let kind: EventKind = kind.parse().map_err(|e| js_error(&e))?;
        self.inner.on(kind, move |event: &MenuEvent<Element>| {
            let arg = event
                .item()
                .map_or(JsValue::UNDEFINED, |item| JsValue::from(item.clone()));
            if let Err(err) = callback.call1(&JsValue::NULL, &arg) {
                warn!(%kind, ?err, "menu subscriber threw");
            }
        });
        Ok(self.clone())
    }

    /// Whether the menu is open.
    #[wasm_bindgen(js_name = isOpen)]
    pub fn is_open(&self) -> bool {
        self.inner.is_open()
    }

    /// The menu element.
    #[wasm_bindgen(getter)]
    pub fn menu(&self) -> Element {
        self.inner.menu().clone()
    }
}

impl JsMenuButton {
    fn build(button: Element, config: &MenuButtonConfig) -> Result<Self, JsValue> {
        console_error_panic_hook::set_once();
        let host = Rc::new(WebHost::new()?);
        MenuButton::with_config(host, button, config)
            .map(|inner| Self { inner })
            .map_err(|e| js_error(&e))
    }

    /// Controller behind this handle.
    pub fn controller(&self) -> &MenuButton<WebHost> {
        &self.inner
    }
}

fn js_error(err: &dyn std::error::Error) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}
