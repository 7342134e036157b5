//! The menu button controller.
//!
//! Wires ARIA semantics onto a trigger and the menu it names, then routes
//! clicks and key presses on both to open/close transitions and focus
//! moves. State lives in the host document: `aria-expanded` on the trigger
//! is read back on every toggle, so external writes to it are authoritative.

use crate::notify::{EventKind, Handler, ListenerRegistry, MenuEvent};
use menubutton_core::aria::{self, ARIA_EXPANDED, ARIA_HASPOPUP, ROLE, TABINDEX, TABINDEX_PROGRAMMATIC};
use menubutton_core::{AriaRole, EventType, Host, InputEvent, Key, MenuButtonConfig, MenuButtonError};
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};
use tracing::{debug, trace};

struct Inner<H: Host> {
    host: Rc<H>,
    trigger: H::Element,
    menu: H::Element,
    menu_id: String,
    items: Vec<H::Element>,
    first_item: H::Element,
    last_item: H::Element,
    listeners: RefCell<ListenerRegistry<H::Element>>,
}

/// Accessible menu button bound to one trigger/menu pair.
///
/// Cloning is cheap and yields another handle to the same controller.
/// Listeners installed on the host hold only a weak handle: once every
/// `MenuButton` handle is dropped they stop reacting.
pub struct MenuButton<H: Host> {
    inner: Rc<Inner<H>>,
}

/// Non-owning handle to a [`MenuButton`].
///
/// Use it to call back into the controller from a notification handler
/// without keeping the controller alive from inside itself.
pub struct WeakMenuButton<H: Host> {
    inner: Weak<Inner<H>>,
}

impl<H: Host> Clone for MenuButton<H> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<H: Host> Clone for WeakMenuButton<H> {
    fn clone(&self) -> Self {
        Self {
            inner: Weak::clone(&self.inner),
        }
    }
}

impl<H: Host> WeakMenuButton<H> {
    /// Recover the controller if it is still alive.
    #[must_use]
    pub fn upgrade(&self) -> Option<MenuButton<H>> {
        self.inner.upgrade().map(|inner| MenuButton { inner })
    }
}

impl<H: Host> fmt::Debug for MenuButton<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MenuButton")
            .field("trigger", &self.inner.trigger)
            .field("menu_id", &self.inner.menu_id)
            .field("items", &self.inner.items.len())
            .field("listeners", &*self.inner.listeners.borrow())
            .finish_non_exhaustive()
    }
}

impl<H: Host + 'static> MenuButton<H> {
    /// Bind a menu button to `trigger` using the default configuration.
    ///
    /// The trigger names its menu through `data-inclusive-menu-opens`; items
    /// are the menu's `button` descendants.
    ///
    /// # Errors
    ///
    /// [`MenuButtonError::MissingMenu`] if the named id does not resolve,
    /// [`MenuButtonError::EmptyMenu`] if the menu has no items. Nothing in
    /// the document is modified when construction fails.
    pub fn new(host: Rc<H>, trigger: H::Element) -> Result<Self, MenuButtonError> {
        Self::with_config(host, trigger, &MenuButtonConfig::default())
    }

    /// Bind a menu button to `trigger` with an explicit configuration.
    ///
    /// # Errors
    ///
    /// Same as [`MenuButton::new`].
    pub fn with_config(
        host: Rc<H>,
        trigger: H::Element,
        config: &MenuButtonConfig,
    ) -> Result<Self, MenuButtonError> {
        let menu_id = host
            .get_attribute(&trigger, &config.opens_attribute)
            .unwrap_or_default();

        let Some(menu) = host.get_element_by_id(&menu_id) else {
            debug!(menu = %menu_id, attribute = %config.opens_attribute, "menu missing");
            return Err(MenuButtonError::MissingMenu { id: menu_id });
        };

        let items = host.query_selector_all(&menu, &config.item_selector);
        let (Some(first_item), Some(last_item)) = (items.first().cloned(), items.last().cloned())
        else {
            debug!(menu = %menu_id, selector = %config.item_selector, "menu has no items");
            return Err(MenuButtonError::EmptyMenu { id: menu_id });
        };

        host.set_attribute(&trigger, ARIA_HASPOPUP, aria::encode_bool(true));
        host.set_attribute(&trigger, ARIA_EXPANDED, aria::encode_bool(false));
        host.set_attribute(&menu, ROLE, AriaRole::Menu.as_str());
        host.set_hidden(&menu, true);
        for item in &items {
            host.set_attribute(item, ROLE, AriaRole::MenuItem.as_str());
            host.set_attribute(item, TABINDEX, TABINDEX_PROGRAMMATIC);
        }

        let button = Self {
            inner: Rc::new(Inner {
                host,
                trigger,
                menu,
                menu_id,
                items,
                first_item,
                last_item,
                listeners: RefCell::new(ListenerRegistry::new()),
            }),
        };
        button.install_listeners();

        debug!(menu = %button.inner.menu_id, items = button.inner.items.len(), "menu button ready");
        Ok(button)
    }

    /// Open the menu and focus its first item. Fires `open`.
    ///
    /// Not guarded: calling it on an open menu repeats every effect.
    pub fn open(&self) -> &Self {
        let inner = &*self.inner;
        inner.host.set_attribute(&inner.trigger, ARIA_EXPANDED, aria::encode_bool(true));
        inner.host.set_hidden(&inner.menu, false);
        inner.host.focus(&inner.first_item);
        debug!(menu = %inner.menu_id, "menu opened");
        self.fire(&MenuEvent::Open);
        self
    }

    /// Close the menu. Fires `close`. Focus is left where it is.
    ///
    /// Not guarded: calling it on a closed menu still fires `close`.
    pub fn close(&self) -> &Self {
        let inner = &*self.inner;
        inner.host.set_attribute(&inner.trigger, ARIA_EXPANDED, aria::encode_bool(false));
        inner.host.set_hidden(&inner.menu, true);
        debug!(menu = %inner.menu_id, "menu closed");
        self.fire(&MenuEvent::Close);
        self
    }

    /// Close if `aria-expanded` currently reads `"true"`, open otherwise.
    pub fn toggle(&self) -> &Self {
        if self.is_open() {
            self.close()
        } else {
            self.open()
        }
    }

    /// Fire `choose` with `item`.
    ///
    /// Does not close the menu or move focus; the item click handler
    /// sequences those itself.
    pub fn select(&self, item: &H::Element) -> &Self {
        debug!(menu = %self.inner.menu_id, ?item, "menu item chosen");
        self.fire(&MenuEvent::Choose(item.clone()));
        self
    }

    /// Subscribe to a notification kind.
    ///
    /// Handlers run synchronously, in registration order, each time the
    /// notification fires. There is no unsubscribe.
    pub fn on<F>(&self, kind: EventKind, handler: F) -> &Self
    where
        F: Fn(&MenuEvent<H::Element>) + 'static,
    {
        let handler: Handler<H::Element> = Rc::new(handler);
        self.inner.listeners.borrow_mut().register(kind, handler);
        self
    }

    /// Subscribe to `open`.
    pub fn on_open<F>(&self, handler: F) -> &Self
    where
        F: Fn() + 'static,
    {
        self.on(EventKind::Open, move |_| handler())
    }

    /// Subscribe to `close`.
    pub fn on_close<F>(&self, handler: F) -> &Self
    where
        F: Fn() + 'static,
    {
        self.on(EventKind::Close, move |_| handler())
    }

    /// Subscribe to `choose`, receiving the chosen item.
    pub fn on_choose<F>(&self, handler: F) -> &Self
    where
        F: Fn(&H::Element) + 'static,
    {
        self.on(EventKind::Choose, move |event| {
            if let Some(item) = event.item() {
                handler(item);
            }
        })
    }

    /// Whether the trigger's `aria-expanded` reads `"true"`.
    #[must_use]
    pub fn is_open(&self) -> bool {
        let expanded = self.inner.host.get_attribute(&self.inner.trigger, ARIA_EXPANDED);
        aria::decode_bool(expanded.as_deref())
    }

    /// Host document.
    #[must_use]
    pub fn host(&self) -> &Rc<H> {
        &self.inner.host
    }

    /// Trigger element.
    #[must_use]
    pub fn trigger(&self) -> &H::Element {
        &self.inner.trigger
    }

    /// Menu element.
    #[must_use]
    pub fn menu(&self) -> &H::Element {
        &self.inner.menu
    }

    /// Id the trigger referenced.
    #[must_use]
    pub fn menu_id(&self) -> &str {
        &self.inner.menu_id
    }

    /// Menu items in document order.
    #[must_use]
    pub fn items(&self) -> &[H::Element] {
        &self.inner.items
    }

    /// First menu item.
    #[must_use]
    pub fn first_item(&self) -> &H::Element {
        &self.inner.first_item
    }

    /// Last menu item.
    #[must_use]
    pub fn last_item(&self) -> &H::Element {
        &self.inner.last_item
    }

    /// Number of subscribers for `kind`.
    #[must_use]
    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.inner.listeners.borrow().len(kind)
    }

    /// Weak handle to this controller.
    #[must_use]
    pub fn downgrade(&self) -> WeakMenuButton<H> {
        WeakMenuButton {
            inner: Rc::downgrade(&self.inner),
        }
    }

    fn fire(&self, event: &MenuEvent<H::Element>) {
        // Snapshot so handlers can subscribe or re-enter without a live borrow.
        let handlers = self.inner.listeners.borrow().handlers(event.kind());
        for handler in handlers {
            handler(event);
        }
    }

    fn install_listeners(&self) {
        let host = &self.inner.host;

        for (index, item) in self.inner.items.iter().enumerate() {
            let weak = self.downgrade();
            host.add_event_listener(
                item,
                EventType::KeyDown,
                Box::new(move |event: &mut InputEvent| {
                    if let Some(button) = weak.upgrade() {
                        button.handle_item_key(index, event);
                    }
                }),
            );

            let weak = self.downgrade();
            host.add_event_listener(
                item,
                EventType::Click,
                Box::new(move |_: &mut InputEvent| {
                    if let Some(button) = weak.upgrade() {
                        button.handle_item_click(index);
                    }
                }),
            );
        }

        let weak = self.downgrade();
        host.add_event_listener(
            &self.inner.trigger,
            EventType::KeyDown,
            Box::new(move |event: &mut InputEvent| {
                if let Some(button) = weak.upgrade() {
                    button.handle_trigger_key(event);
                }
            }),
        );

        let weak = self.downgrade();
        host.add_event_listener(
            &self.inner.trigger,
            EventType::Click,
            Box::new(move |_: &mut InputEvent| {
                if let Some(button) = weak.upgrade() {
                    button.toggle();
                }
            }),
        );
    }

    fn next_item(&self, index: usize) -> &H::Element {
        self.inner
            .items
            .get(index + 1)
            .unwrap_or(&self.inner.first_item)
    }

    fn previous_item(&self, index: usize) -> &H::Element {
        index
            .checked_sub(1)
            .and_then(|i| self.inner.items.get(i))
            .unwrap_or(&self.inner.last_item)
    }

    fn handle_item_key(&self, index: usize, event: &mut InputEvent) {
        let Some(key) = event.key() else {
            return;
        };
        trace!(menu = %self.inner.menu_id, index, ?key, "item keydown");

        match key {
            Key::Down => {
                event.prevent_default();
                self.inner.host.focus(self.next_item(index));
            }
            Key::Up => {
                event.prevent_default();
                self.inner.host.focus(self.previous_item(index));
            }
            Key::Escape => {
                event.prevent_default();
                self.toggle();
                self.inner.host.focus(&self.inner.trigger);
            }
            // Default focus traversal proceeds.
            Key::Tab => {
                self.toggle();
            }
            _ => {}
        }
    }

    fn handle_item_click(&self, index: usize) {
        let Some(item) = self.inner.items.get(index).cloned() else {
            return;
        };
        self.select(&item);
        self.close();
        self.inner.host.focus(&self.inner.trigger);
    }

    fn handle_trigger_key(&self, event: &mut InputEvent) {
        let Some(key) = event.key() else {
            return;
        };
        trace!(menu = %self.inner.menu_id, ?key, "trigger keydown");

        match key {
            Key::Down => {
                if self.inner.host.is_hidden(&self.inner.menu) {
                    self.toggle();
                } else {
                    self.inner.host.focus(&self.inner.first_item);
                }
            }
            Key::Up => {
                self.close();
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use menubutton_core::{Document, NodeId};
    use std::cell::Cell;

    struct Setup {
        doc: Rc<Document>,
        trigger: NodeId,
        menu: NodeId,
        items: Vec<NodeId>,
    }

    fn setup(item_count: usize) -> Setup {
        let doc = Rc::new(Document::new());
        let trigger = doc.append_element(doc.body(), "button");
        doc.set_attribute(&trigger, "data-inclusive-menu-opens", "actions");
        let menu = doc.append_element(doc.body(), "div");
        doc.set_attribute(&menu, "id", "actions");
        let items = (0..item_count)
            .map(|_| doc.append_element(menu, "button"))
            .collect();
        Setup {
            doc,
            trigger,
            menu,
            items,
        }
    }

    fn build(s: &Setup) -> MenuButton<Document> {
        MenuButton::new(Rc::clone(&s.doc), s.trigger).unwrap()
    }

    // =========================================================================
    // Construction Tests
    // =========================================================================

    #[test]
    fn test_new_applies_semantics() {
        let s = setup(3);
        let button = build(&s);

        assert_eq!(s.doc.get_attribute(&s.trigger, "aria-haspopup").as_deref(), Some("true"));
        assert_eq!(s.doc.get_attribute(&s.trigger, "aria-expanded").as_deref(), Some("false"));
        assert_eq!(s.doc.get_attribute(&s.menu, "role").as_deref(), Some("menu"));
        assert!(s.doc.is_hidden(&s.menu));
        for item in &s.items {
            assert_eq!(s.doc.get_attribute(item, "role").as_deref(), Some("menuitem"));
            assert_eq!(s.doc.get_attribute(item, "tabindex").as_deref(), Some("-1"));
        }
        assert_eq!(button.menu_id(), "actions");
        assert_eq!(button.items(), s.items.as_slice());
        assert_eq!(button.first_item(), &s.items[0]);
        assert_eq!(button.last_item(), &s.items[2]);
        assert!(!button.is_open());
    }

    #[test]
    fn test_new_installs_one_listener_per_event() {
        let s = setup(2);
        let _button = build(&s);
        for target in std::iter::once(&s.trigger).chain(&s.items) {
            assert_eq!(s.doc.listener_count(*target, EventType::Click), 1);
            assert_eq!(s.doc.listener_count(*target, EventType::KeyDown), 1);
        }
    }

    #[test]
    fn test_missing_menu_leaves_document_untouched() {
        let s = setup(2);
        s.doc.set_attribute(&s.trigger, "data-inclusive-menu-opens", "nowhere");

        let err = MenuButton::new(Rc::clone(&s.doc), s.trigger).unwrap_err();

        assert_eq!(err, MenuButtonError::MissingMenu { id: "nowhere".to_string() });
        assert_eq!(s.doc.get_attribute(&s.trigger, "aria-expanded"), None);
        assert_eq!(s.doc.listener_count(s.trigger, EventType::Click), 0);
    }

    #[test]
    fn test_missing_attribute_is_missing_menu() {
        let doc = Rc::new(Document::new());
        let trigger = doc.append_element(doc.body(), "button");
        let err = MenuButton::new(Rc::clone(&doc), trigger).unwrap_err();
        assert_eq!(err, MenuButtonError::MissingMenu { id: String::new() });
    }

    #[test]
    fn test_empty_menu() {
        let s = setup(0);
        let err = MenuButton::new(Rc::clone(&s.doc), s.trigger).unwrap_err();
        assert_eq!(err, MenuButtonError::EmptyMenu { id: "actions".to_string() });
        assert_eq!(s.doc.get_attribute(&s.menu, "role"), None);
        assert!(!s.doc.is_hidden(&s.menu));
    }

    #[test]
    fn test_with_config_custom_attribute_and_selector() {
        let doc = Rc::new(Document::new());
        let trigger = doc.append_element(doc.body(), "button");
        doc.set_attribute(&trigger, "data-controls", "list");
        let menu = doc.append_element(doc.body(), "ul");
        doc.set_attribute(&menu, "id", "list");
        let a = doc.append_element(menu, "li");
        let b = doc.append_element(menu, "li");
        doc.append_element(menu, "button");

        let config = MenuButtonConfig::new()
            .opens_attribute("data-controls")
            .item_selector("li");
        let button = MenuButton::with_config(Rc::clone(&doc), trigger, &config).unwrap();

        assert_eq!(button.items(), &[a, b]);
    }

    // =========================================================================
    // Operation Tests
    // =========================================================================

    #[test]
    fn test_open_close_toggle() {
        let s = setup(3);
        let button = build(&s);

        button.open();
        assert!(button.is_open());
        assert!(!s.doc.is_hidden(&s.menu));
        assert_eq!(s.doc.active_element(), Some(s.items[0]));

        button.close();
        assert!(!button.is_open());
        assert!(s.doc.is_hidden(&s.menu));

        button.toggle();
        assert!(button.is_open());
        button.toggle();
        assert!(!button.is_open());
    }

    #[test]
    fn test_chaining() {
        let s = setup(1);
        let button = build(&s);
        let opened = Rc::new(Cell::new(0));
        let o = Rc::clone(&opened);

        button.on_open(move || o.set(o.get() + 1)).open().close().open();

        assert_eq!(opened.get(), 2);
        assert!(button.is_open());
    }

    #[test]
    fn test_toggle_reads_external_attribute() {
        let s = setup(2);
        let button = build(&s);

        s.doc.set_attribute(&s.trigger, "aria-expanded", "true");
        button.toggle();

        assert!(!button.is_open());
        assert!(s.doc.is_hidden(&s.menu));
    }

    #[test]
    fn test_select_only_fires_choose() {
        let s = setup(3);
        let button = build(&s);
        let chosen = Rc::new(RefCell::new(Vec::new()));
        let c = Rc::clone(&chosen);
        button.on_choose(move |item| c.borrow_mut().push(*item));
        button.open();

        button.select(&s.items[1]);

        assert_eq!(*chosen.borrow(), vec![s.items[1]]);
        assert!(button.is_open());
        assert_eq!(s.doc.active_element(), Some(s.items[0]));
    }

    #[test]
    fn test_on_counts_listeners() {
        let s = setup(1);
        let button = build(&s);
        button
            .on(EventKind::Close, |_| {})
            .on(EventKind::Close, |_| {})
            .on_choose(|_| {});
        assert_eq!(button.listener_count(EventKind::Close), 2);
        assert_eq!(button.listener_count(EventKind::Choose), 1);
        assert_eq!(button.listener_count(EventKind::Open), 0);
    }

    #[test]
    fn test_handler_may_reenter_controller() {
        let s = setup(2);
        let button = build(&s);
        let weak = button.downgrade();
        button.on_open(move || {
            if let Some(button) = weak.upgrade() {
                button.close();
            }
        });

        button.open();

        assert!(!button.is_open());
        assert!(s.doc.is_hidden(&s.menu));
    }

    #[test]
    fn test_handler_may_subscribe_during_fire() {
        let s = setup(1);
        let button = build(&s);
        let weak = button.downgrade();
        button.on_open(move || {
            if let Some(button) = weak.upgrade() {
                button.on_open(|| {});
            }
        });

        button.open();
        assert_eq!(button.listener_count(EventKind::Open), 2);
    }

    // =========================================================================
    // Navigation Tests
    // =========================================================================

    #[test]
    fn test_next_and_previous_wrap() {
        let s = setup(3);
        let button = build(&s);
        assert_eq!(button.next_item(0), &s.items[1]);
        assert_eq!(button.next_item(2), &s.items[0]);
        assert_eq!(button.previous_item(0), &s.items[2]);
        assert_eq!(button.previous_item(2), &s.items[1]);
    }

    #[test]
    fn test_single_item_is_its_own_neighbour() {
        let s = setup(1);
        let button = build(&s);
        assert_eq!(button.next_item(0), &s.items[0]);
        assert_eq!(button.previous_item(0), &s.items[0]);
    }

    #[test]
    fn test_dropped_controller_listeners_are_inert() {
        let s = setup(2);
        let button = build(&s);
        drop(button);

        s.doc.click(s.trigger);

        assert_eq!(s.doc.get_attribute(&s.trigger, "aria-expanded").as_deref(), Some("false"));
        assert!(s.doc.is_hidden(&s.menu));
    }

    #[test]
    fn test_debug_output() {
        let s = setup(2);
        let button = build(&s);
        let debug = format!("{button:?}");
        assert!(debug.contains("MenuButton"));
        assert!(debug.contains("actions"));
    }
}
