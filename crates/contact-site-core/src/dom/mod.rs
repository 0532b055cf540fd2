//! Host abstraction
//!
//! The site logic never talks to a browser directly. It sees elements through
//! [`ElementHandle`], wraps every lookup in a [`Slot`] so missing markup turns into a
//! no-op, and registers event handlers through [`Page`].

use std::cell::Cell;

pub mod memory;

/// Scroll animation requested from the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBehavior {
    Smooth,
    Instant,
}

/// Vertical alignment of a scrolled element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBlock {
    Start,
    Nearest,
}

/// A reference to one element of the hosting document.
///
/// Handles are cheap to clone and mutate through `&self`, like DOM nodes do.
pub trait ElementHandle: Clone + 'static {
    fn add_class(&self, class: &str);
    fn remove_class(&self, class: &str);
    fn has_class(&self, class: &str) -> bool;

    /// Flip a class and return whether it is now present
    fn toggle_class(&self, class: &str) -> bool {
        if self.has_class(class) {
            self.remove_class(class);
            false
        } else {
            self.add_class(class);
            true
        }
    }

    fn attribute(&self, name: &str) -> Option<String>;
    fn set_attribute(&self, name: &str, value: &str);
    fn set_text(&self, text: &str);

    /// Current value of an input or textarea, `""` for anything else
    fn value(&self) -> String;
    fn set_value(&self, value: &str);

    /// True when `other` is this element or one of its descendants
    fn contains(&self, other: &Self) -> bool;

    fn scroll_into_view(&self, behavior: ScrollBehavior, block: ScrollBlock);
}

/// Optional element reference. Every operation is a no-op when the element is absent.
#[derive(Debug, Clone, PartialEq)]
pub struct Slot<E>(Option<E>);

impl<E> Default for Slot<E> {
    fn default() -> Self {
        Self(None)
    }
}

impl<E> From<Option<E>> for Slot<E> {
    fn from(element: Option<E>) -> Self {
        Self(element)
    }
}

impl<E> Slot<E> {
    pub fn new(element: Option<E>) -> Self {
        Self(element)
    }

    pub fn empty() -> Self {
        Self(None)
    }

    pub fn is_present(&self) -> bool {
        self.0.is_some()
    }

    pub fn get(&self) -> Option<&E> {
        self.0.as_ref()
    }

    /// Run `f` only when the element exists
    pub fn with<R>(&self, f: impl FnOnce(&E) -> R) -> Option<R> {
        self.0.as_ref().map(f)
    }

    /// Run `f` only when both elements exist
    pub fn with_both<F, R>(&self, other: &Slot<F>, f: impl FnOnce(&E, &F) -> R) -> Option<R> {
        match (&self.0, &other.0) {
            (Some(a), Some(b)) => Some(f(a, b)),
            _ => None,
        }
    }
}

impl<E: ElementHandle> Slot<E> {
    pub fn add_class(&self, class: &str) {
        self.with(|e| e.add_class(class));
    }

    pub fn remove_class(&self, class: &str) {
        self.with(|e| e.remove_class(class));
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.with(|e| e.has_class(class)).unwrap_or(false)
    }

    pub fn toggle_class(&self, class: &str) -> bool {
        self.with(|e| e.toggle_class(class)).unwrap_or(false)
    }

    pub fn set_attribute(&self, name: &str, value: &str) {
        self.with(|e| e.set_attribute(name, value));
    }

    pub fn attribute(&self, name: &str) -> Option<String> {
        self.with(|e| e.attribute(name)).flatten()
    }

    pub fn set_text(&self, text: &str) {
        self.with(|e| e.set_text(text));
    }

    pub fn value(&self) -> String {
        self.with(|e| e.value()).unwrap_or_default()
    }

    pub fn set_value(&self, value: &str) {
        self.with(|e| e.set_value(value));
    }

    pub fn contains(&self, other: &E) -> bool {
        self.with(|e| e.contains(other)).unwrap_or(false)
    }

    pub fn scroll_into_view(&self, behavior: ScrollBehavior, block: ScrollBlock) {
        self.with(|e| e.scroll_into_view(behavior, block));
    }
}

/// UI events the site listens for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Click,
    Submit,
    Blur,
    Input,
}

impl EventKind {
    /// DOM event type name
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Click => "click",
            EventKind::Submit => "submit",
            EventKind::Blur => "blur",
            EventKind::Input => "input",
        }
    }
}

/// Event delivered to a handler
#[derive(Debug)]
pub struct UiEvent<E> {
    pub kind: EventKind,
    pub target: Option<E>,
    default_prevented: Cell<bool>,
}

impl<E> UiEvent<E> {
    pub fn new(kind: EventKind, target: Option<E>) -> Self {
        Self {
            kind,
            target,
            default_prevented: Cell::new(false),
        }
    }

    /// Ask the host to skip its default action once the handler returns
    pub fn prevent_default(&self) {
        self.default_prevented.set(true);
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented.get()
    }
}

pub type Handler<E> = Box<dyn FnMut(&UiEvent<E>)>;

/// Where a handler is attached
#[derive(Debug, Clone)]
pub enum ListenTarget<E> {
    Document,
    Element(E),
}

/// The hosting document: element lookup plus event registration
pub trait Page {
    type Element: ElementHandle;

    fn element_by_id(&self, id: &str) -> Option<Self::Element>;
    fn query(&self, selector: &str) -> Option<Self::Element>;
    fn query_all(&self, selector: &str) -> Vec<Self::Element>;
    fn query_within(&self, root: &Self::Element, selector: &str) -> Vec<Self::Element>;

    fn listen(
        &self,
        target: ListenTarget<Self::Element>,
        kind: EventKind,
        handler: Handler<Self::Element>,
    );

    fn slot_by_id(&self, id: &str) -> Slot<Self::Element> {
        Slot::new(self.element_by_id(id))
    }

    fn slot(&self, selector: &str) -> Slot<Self::Element> {
        Slot::new(self.query(selector))
    }

    /// Register on an element only when it exists
    fn listen_slot(
        &self,
        slot: &Slot<Self::Element>,
        kind: EventKind,
        handler: Handler<Self::Element>,
    ) {
        if let Some(element) = slot.get() {
            self.listen(ListenTarget::Element(element.clone()), kind, handler);
        }
    }
}
