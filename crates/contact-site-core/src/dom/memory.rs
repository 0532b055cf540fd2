//! In-memory host
//!
//! A small element tree with event dispatch, enough to drive the site without a
//! browser. Used by the test suites and by headless embedders.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::{Rc, Weak};

use super::{
    ElementHandle, EventKind, Handler, ListenTarget, Page, ScrollBehavior, ScrollBlock, UiEvent,
};

#[derive(Default)]
struct Node {
    tag: String,
    id: Option<String>,
    classes: Vec<String>,
    attributes: BTreeMap<String, String>,
    text: String,
    value: String,
    parent: Option<Weak<RefCell<Node>>>,
    children: Vec<MemoryElement>,
    scrolls: Vec<(ScrollBehavior, ScrollBlock)>,
}

/// Shared handle to an in-memory element. Equality is identity.
#[derive(Clone)]
pub struct MemoryElement(Rc<RefCell<Node>>);

impl MemoryElement {
    pub fn new(tag: &str) -> Self {
        Self(Rc::new(RefCell::new(Node {
            tag: tag.to_ascii_lowercase(),
            ..Node::default()
        })))
    }

    pub fn with_id(self, id: &str) -> Self {
        self.0.borrow_mut().id = Some(id.to_string());
        self
    }

    pub fn with_class(self, class: &str) -> Self {
        self.add_class(class);
        self
    }

    pub fn with_attr(self, name: &str, value: &str) -> Self {
        self.set_attribute(name, value);
        self
    }

    pub fn with_text(self, text: &str) -> Self {
        self.set_text(text);
        self
    }

    /// Builder form of [`MemoryElement::append`]
    pub fn child(self, child: MemoryElement) -> Self {
        self.append(&child);
        self
    }

    pub fn append(&self, child: &MemoryElement) {
        child.0.borrow_mut().parent = Some(Rc::downgrade(&self.0));
        self.0.borrow_mut().children.push(child.clone());
    }

    pub fn tag(&self) -> String {
        self.0.borrow().tag.clone()
    }

    pub fn id(&self) -> Option<String> {
        self.0.borrow().id.clone()
    }

    pub fn text(&self) -> String {
        self.0.borrow().text.clone()
    }

    pub fn classes(&self) -> Vec<String> {
        self.0.borrow().classes.clone()
    }

    pub fn parent(&self) -> Option<MemoryElement> {
        self.0
            .borrow()
            .parent
            .as_ref()
            .and_then(Weak::upgrade)
            .map(MemoryElement)
    }

    pub fn children(&self) -> Vec<MemoryElement> {
        self.0.borrow().children.clone()
    }

    /// Every scroll request made on this element, oldest first
    pub fn scroll_requests(&self) -> Vec<(ScrollBehavior, ScrollBlock)> {
        self.0.borrow().scrolls.clone()
    }

    fn descendants(&self, out: &mut Vec<MemoryElement>) {
        for child in self.children() {
            out.push(child.clone());
            child.descendants(out);
        }
    }
}

impl PartialEq for MemoryElement {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for MemoryElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let node = self.0.borrow();
        write!(f, "<{}", node.tag)?;
        if let Some(id) = &node.id {
            write!(f, " id=\"{}\"", id)?;
        }
        if !node.classes.is_empty() {
            write!(f, " class=\"{}\"", node.classes.join(" "))?;
        }
        write!(f, ">")
    }
}

impl ElementHandle for MemoryElement {
    fn add_class(&self, class: &str) {
        let mut node = self.0.borrow_mut();
        if !node.classes.iter().any(|c| c == class) {
            node.classes.push(class.to_string());
        }
    }

    fn remove_class(&self, class: &str) {
        self.0.borrow_mut().classes.retain(|c| c != class);
    }

    fn has_class(&self, class: &str) -> bool {
        self.0.borrow().classes.iter().any(|c| c == class)
    }

    fn attribute(&self, name: &str) -> Option<String> {
        let node = self.0.borrow();
        match name {
            "id" => node.id.clone(),
            "class" => Some(node.classes.join(" ")),
            _ => node.attributes.get(name).cloned(),
        }
    }

    fn set_attribute(&self, name: &str, value: &str) {
        let mut node = self.0.borrow_mut();
        match name {
            "id" => node.id = Some(value.to_string()),
            "class" => node.classes = value.split_whitespace().map(str::to_string).collect(),
            _ => {
                node.attributes.insert(name.to_string(), value.to_string());
            }
        }
    }

    fn set_text(&self, text: &str) {
        self.0.borrow_mut().text = text.to_string();
    }

    fn value(&self) -> String {
        let node = self.0.borrow();
        match node.tag.as_str() {
            "input" | "textarea" => node.value.clone(),
            _ => String::new(),
        }
    }

    fn set_value(&self, value: &str) {
        self.0.borrow_mut().value = value.to_string();
    }

    fn contains(&self, other: &Self) -> bool {
        let mut current = Some(other.clone());
        while let Some(element) = current {
            if element == *self {
                return true;
            }
            current = element.parent();
        }
        false
    }

    fn scroll_into_view(&self, behavior: ScrollBehavior, block: ScrollBlock) {
        self.0.borrow_mut().scrolls.push((behavior, block));
    }
}

#[derive(Debug, Clone, PartialEq)]
enum AttrMatch {
    Exists(String),
    Equals(String, String),
    Prefix(String, String),
}

impl AttrMatch {
    fn parse(inner: &str) -> Option<Self> {
        let unquote = |v: &str| v.trim().trim_matches('"').trim_matches('\'').to_string();

        if let Some((name, value)) = inner.split_once("^=") {
            Some(AttrMatch::Prefix(name.trim().to_string(), unquote(value)))
        } else if let Some((name, value)) = inner.split_once('=') {
            Some(AttrMatch::Equals(name.trim().to_string(), unquote(value)))
        } else if !inner.trim().is_empty() {
            Some(AttrMatch::Exists(inner.trim().to_string()))
        } else {
            None
        }
    }

    fn matches(&self, element: &MemoryElement) -> bool {
        match self {
            AttrMatch::Exists(name) => element.attribute(name).is_some(),
            AttrMatch::Equals(name, value) => {
                element.attribute(name).as_deref() == Some(value.as_str())
            }
            AttrMatch::Prefix(name, prefix) => element
                .attribute(name)
                .is_some_and(|v| v.starts_with(prefix.as_str())),
        }
    }
}

/// Compound selector without combinators: `tag#id.class[attr^="v"]`
#[derive(Debug, Default, Clone, PartialEq)]
struct Selector {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<AttrMatch>,
}

impl Selector {
    fn parse(input: &str) -> Option<Self> {
        let is_special = |c: char| matches!(c, '#' | '.' | '[');
        let mut selector = Selector::default();
        let mut rest = input.trim();
        if rest.is_empty() {
            return None;
        }

        let tag_end = rest.find(is_special).unwrap_or(rest.len());
        let tag = &rest[..tag_end];
        if tag.contains(char::is_whitespace) {
            return None;
        }
        if !tag.is_empty() {
            selector.tag = Some(tag.to_ascii_lowercase());
        }
        rest = &rest[tag_end..];

        while let Some(c) = rest.chars().next() {
            match c {
                '#' | '.' => {
                    let body = &rest[1..];
                    let end = body.find(is_special).unwrap_or(body.len());
                    let name = &body[..end];
                    if name.is_empty() || name.contains(char::is_whitespace) {
                        return None;
                    }
                    if c == '#' {
                        selector.id = Some(name.to_string());
                    } else {
                        selector.classes.push(name.to_string());
                    }
                    rest = &body[end..];
                }
                '[' => {
                    let close = rest.find(']')?;
                    selector.attrs.push(AttrMatch::parse(&rest[1..close])?);
                    rest = &rest[close + 1..];
                }
                _ => return None,
            }
        }

        Some(selector)
    }

    fn matches(&self, element: &MemoryElement) -> bool {
        if let Some(tag) = &self.tag {
            if element.tag() != *tag {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if element.id().as_deref() != Some(id.as_str()) {
                return false;
            }
        }
        self.classes.iter().all(|c| element.has_class(c))
            && self.attrs.iter().all(|a| a.matches(element))
    }
}

struct Listener {
    target: ListenTarget<MemoryElement>,
    kind: EventKind,
    handler: Rc<RefCell<Handler<MemoryElement>>>,
}

/// In-memory document rooted at a `<body>` element
#[derive(Clone)]
pub struct MemoryPage {
    body: MemoryElement,
    listeners: Rc<RefCell<Vec<Listener>>>,
}

impl Default for MemoryPage {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryPage {
    pub fn new() -> Self {
        Self {
            body: MemoryElement::new("body"),
            listeners: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn body(&self) -> &MemoryElement {
        &self.body
    }

    /// Append an element (with its subtree) to the body
    pub fn mount(&self, element: MemoryElement) -> MemoryElement {
        self.body.append(&element);
        element
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    /// Deliver an event to `target`, then its ancestors, then the document.
    /// Blur does not bubble.
    pub fn dispatch(&self, kind: EventKind, target: &MemoryElement) -> UiEvent<MemoryElement> {
        let event = UiEvent::new(kind, Some(target.clone()));

        let mut path = vec![target.clone()];
        if kind != EventKind::Blur {
            let mut current = target.parent();
            while let Some(element) = current {
                current = element.parent();
                path.push(element);
            }
        }

        for element in &path {
            self.fire(&event, Some(element));
        }
        if kind != EventKind::Blur {
            self.fire(&event, None);
        }

        event
    }

    pub fn click(&self, target: &MemoryElement) -> UiEvent<MemoryElement> {
        self.dispatch(EventKind::Click, target)
    }

    pub fn submit(&self, form: &MemoryElement) -> UiEvent<MemoryElement> {
        self.dispatch(EventKind::Submit, form)
    }

    pub fn blur(&self, field: &MemoryElement) -> UiEvent<MemoryElement> {
        self.dispatch(EventKind::Blur, field)
    }

    /// Replace the field's value and fire `input`
    pub fn type_into(&self, field: &MemoryElement, value: &str) -> UiEvent<MemoryElement> {
        field.set_value(value);
        self.dispatch(EventKind::Input, field)
    }

    fn fire(&self, event: &UiEvent<MemoryElement>, at: Option<&MemoryElement>) {
        // Collect first so handlers run without the listener list borrowed
        let handlers: Vec<_> = self
            .listeners
            .borrow()
            .iter()
            .filter(|l| l.kind == event.kind)
            .filter(|l| match (&l.target, at) {
                (ListenTarget::Document, None) => true,
                (ListenTarget::Element(e), Some(at)) => e == at,
                _ => false,
            })
            .map(|l| Rc::clone(&l.handler))
            .collect();

        for handler in handlers {
            (&mut *handler.borrow_mut())(event);
        }
    }
}

impl Page for MemoryPage {
    type Element = MemoryElement;

    fn element_by_id(&self, id: &str) -> Option<MemoryElement> {
        let mut all = Vec::new();
        self.body.descendants(&mut all);
        all.into_iter().find(|e| e.id().as_deref() == Some(id))
    }

    fn query(&self, selector: &str) -> Option<MemoryElement> {
        self.query_all(selector).into_iter().next()
    }

    fn query_all(&self, selector: &str) -> Vec<MemoryElement> {
        self.query_within(&self.body, selector)
    }

    fn query_within(&self, root: &MemoryElement, selector: &str) -> Vec<MemoryElement> {
        let Some(selector) = Selector::parse(selector) else {
            tracing::debug!("unsupported selector: {}", selector);
            return Vec::new();
        };
        let mut all = Vec::new();
        root.descendants(&mut all);
        all.retain(|e| selector.matches(e));
        all
    }

    fn listen(
        &self,
        target: ListenTarget<MemoryElement>,
        kind: EventKind,
        handler: Handler<MemoryElement>,
    ) {
        self.listeners.borrow_mut().push(Listener {
            target,
            kind,
            handler: Rc::new(RefCell::new(handler)),
        });
    }
}
