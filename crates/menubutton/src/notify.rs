//! Lifecycle notifications and their subscriber registry.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

/// Notification kinds a menu button emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    /// Menu opened
    Open,
    /// Menu closed
    Close,
    /// Item chosen
    Choose,
}

impl EventKind {
    /// All kinds, in declaration order.
    pub const ALL: [Self; 3] = [Self::Open, Self::Close, Self::Choose];

    /// Name used by string-keyed subscription APIs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Close => "close",
            Self::Choose => "choose",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown notification kind name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownEventKind(pub String);

impl fmt::Display for UnknownEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown menu event kind: {}", self.0)
    }
}

impl std::error::Error for UnknownEventKind {}

impl FromStr for EventKind {
    type Err = UnknownEventKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(Self::Open),
            "close" => Ok(Self::Close),
            "choose" => Ok(Self::Choose),
            other => Err(UnknownEventKind(other.to_string())),
        }
    }
}

/// A notification delivered to subscribers.
///
/// `E` is the host's element handle; only `Choose` carries one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuEvent<E> {
    /// Menu opened
    Open,
    /// Menu closed
    Close,
    /// Item chosen
    Choose(E),
}

impl<E> MenuEvent<E> {
    /// Kind of this notification.
    #[must_use]
    pub const fn kind(&self) -> EventKind {
        match self {
            Self::Open => EventKind::Open,
            Self::Close => EventKind::Close,
            Self::Choose(_) => EventKind::Choose,
        }
    }

    /// Chosen item, for `Choose`.
    #[must_use]
    pub const fn item(&self) -> Option<&E> {
        match self {
            Self::Choose(item) => Some(item),
            _ => None,
        }
    }
}

/// Subscriber callback.
pub type Handler<E> = Rc<dyn Fn(&MenuEvent<E>)>;

/// Ordered handlers per notification kind.
///
/// Insertion order is invocation order; the same handler may be registered
/// more than once.
pub struct ListenerRegistry<E> {
    handlers: HashMap<EventKind, Vec<Handler<E>>>,
}

impl<E> Default for ListenerRegistry<E> {
    fn default() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }
}

impl<E> fmt::Debug for ListenerRegistry<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for kind in EventKind::ALL {
            map.entry(&kind.as_str(), &self.len(kind));
        }
        map.finish()
    }
}

impl<E> ListenerRegistry<E> {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a handler for `kind`.
    pub fn register(&mut self, kind: EventKind, handler: Handler<E>) {
        self.handlers.entry(kind).or_default().push(handler);
    }

    /// Snapshot of the handlers for `kind`, in registration order.
    #[must_use]
    pub fn handlers(&self, kind: EventKind) -> Vec<Handler<E>> {
        self.handlers.get(&kind).cloned().unwrap_or_default()
    }

    /// Number of handlers for `kind`.
    #[must_use]
    pub fn len(&self, kind: EventKind) -> usize {
        self.handlers.get(&kind).map_or(0, Vec::len)
    }

    /// Whether no handler is registered for any kind.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.values().all(Vec::is_empty)
    }
}
