//! `web-sys` implementations of the core host traits

use contact_site_core::dom::{
    ElementHandle, EventKind, Handler, ListenTarget, Page, ScrollBehavior, ScrollBlock, UiEvent,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, Event, EventTarget, HtmlInputElement, HtmlTextAreaElement, Node,
    NodeList, ScrollIntoViewOptions, ScrollLogicalPosition,
};

/// A browser element
#[derive(Debug, Clone, PartialEq)]
pub struct DomElement(pub Element);

impl ElementHandle for DomElement {
    fn add_class(&self, class: &str) {
        let _ = self.0.class_list().add_1(class);
    }

    fn remove_class(&self, class: &str) {
        let _ = self.0.class_list().remove_1(class);
    }

    fn has_class(&self, class: &str) -> bool {
        self.0.class_list().contains(class)
    }

    fn toggle_class(&self, class: &str) -> bool {
        self.0.class_list().toggle(class).unwrap_or(false)
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.0.get_attribute(name)
    }

    fn set_attribute(&self, name: &str, value: &str) {
        if let Err(err) = self.0.set_attribute(name, value) {
            tracing::warn!(?err, name, "set_attribute failed");
        }
    }

    fn set_text(&self, text: &str) {
        self.0.set_text_content(Some(text));
    }

    fn value(&self) -> String {
        if let Some(input) = self.0.dyn_ref::<HtmlInputElement>() {
            input.value()
        } else if let Some(area) = self.0.dyn_ref::<HtmlTextAreaElement>() {
            area.value()
        } else {
            String::new()
        }
    }

    fn set_value(&self, value: &str) {
        if let Some(input) = self.0.dyn_ref::<HtmlInputElement>() {
            input.set_value(value);
        } else if let Some(area) = self.0.dyn_ref::<HtmlTextAreaElement>() {
            area.set_value(value);
        }
    }

    fn contains(&self, other: &Self) -> bool {
        let other: &Node = other.0.as_ref();
        self.0.contains(Some(other))
    }

    fn scroll_into_view(&self, behavior: ScrollBehavior, block: ScrollBlock) {
        let options = ScrollIntoViewOptions::new();
        options.set_behavior(match behavior {
            ScrollBehavior::Smooth => web_sys::ScrollBehavior::Smooth,
            ScrollBehavior::Instant => web_sys::ScrollBehavior::Instant,
        });
        options.set_block(match block {
            ScrollBlock::Start => ScrollLogicalPosition::Start,
            ScrollBlock::Nearest => ScrollLogicalPosition::Nearest,
        });
        self.0.scroll_into_view_with_scroll_into_view_options(&options);
    }
}

/// The browser document
#[derive(Debug, Clone)]
pub struct DomPage {
    document: Document,
}

impl DomPage {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }
}

fn collect_elements(list: Result<NodeList, JsValue>) -> Vec<DomElement> {
    let Ok(list) = list else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .map(DomElement)
        .collect()
}

/// The element an event landed on; text nodes resolve to their parent
fn event_element(event: &Event) -> Option<DomElement> {
    let node = event.target()?.dyn_into::<Node>().ok()?;
    match node.dyn_into::<Element>() {
        Ok(element) => Some(DomElement(element)),
        Err(node) => node.parent_element().map(DomElement),
    }
}

impl Page for DomPage {
    type Element = DomElement;

    fn element_by_id(&self, id: &str) -> Option<DomElement> {
        self.document.get_element_by_id(id).map(DomElement)
    }

    fn query(&self, selector: &str) -> Option<DomElement> {
        self.document
            .query_selector(selector)
            .ok()
            .flatten()
            .map(DomElement)
    }

    fn query_all(&self, selector: &str) -> Vec<DomElement> {
        collect_elements(self.document.query_selector_all(selector))
    }

    fn query_within(&self, root: &DomElement, selector: &str) -> Vec<DomElement> {
        collect_elements(root.0.query_selector_all(selector))
    }

    fn listen(
        &self,
        target: ListenTarget<DomElement>,
        kind: EventKind,
        mut handler: Handler<DomElement>,
    ) {
        let callback = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            let ui = UiEvent::new(kind, event_element(&event));
            handler(&ui);
            if ui.default_prevented() {
                event.prevent_default();
            }
        });

        let target: &EventTarget = match &target {
            ListenTarget::Document => self.document.as_ref(),
            ListenTarget::Element(element) => element.0.as_ref(),
        };
        if let Err(err) =
            target.add_event_listener_with_callback(kind.as_str(), callback.as_ref().unchecked_ref())
        {
            tracing::warn!(?err, event = kind.as_str(), "add_event_listener failed");
        }

        // Listeners live for the whole page
        callback.forget();
    }
}
