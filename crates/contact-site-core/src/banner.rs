//! Success banner shown after an accepted submission

use std::cell::Cell;
use std::rc::Rc;

use crate::dom::{ElementHandle, ScrollBehavior, ScrollBlock, Slot};

/// Clones share the same visibility flag, so a timer can hold one and hide the banner later.
#[derive(Debug, Clone)]
pub struct SuccessBanner<E> {
    element: Slot<E>,
    show_class: String,
    text: Option<String>,
    visible: Rc<Cell<bool>>,
}

impl<E: ElementHandle> SuccessBanner<E> {
    pub fn new(element: Slot<E>, show_class: impl Into<String>, text: Option<String>) -> Self {
        Self {
            element,
            show_class: show_class.into(),
            text,
            visible: Rc::new(Cell::new(false)),
        }
    }

    pub fn show(&self) {
        if !self.element.is_present() {
            return;
        }
        if let Some(text) = &self.text {
            self.element.set_text(text);
        }
        self.element.add_class(&self.show_class);
        self.element
            .scroll_into_view(ScrollBehavior::Smooth, ScrollBlock::Nearest);
        self.visible.set(true);
    }

    pub fn hide(&self) {
        self.element.remove_class(&self.show_class);
        self.visible.set(false);
    }

    pub fn is_visible(&self) -> bool {
        self.visible.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::memory::MemoryElement;

    #[test]
    fn test_show_and_hide() {
        let element = MemoryElement::new("div").with_id("successMessage");
        let banner = SuccessBanner::new(
            Slot::new(Some(element.clone())),
            "show",
            Some("Thanks! We'll be in touch.".to_string()),
        );

        banner.show();
        assert!(banner.is_visible());
        assert!(element.has_class("show"));
        assert_eq!(element.text(), "Thanks! We'll be in touch.");
        assert_eq!(
            element.scroll_requests(),
            vec![(ScrollBehavior::Smooth, ScrollBlock::Nearest)]
        );

        banner.clone().hide();
        assert!(!banner.is_visible());
        assert!(!element.has_class("show"));
    }

    #[test]
    fn test_missing_banner_never_visible() {
        let banner: SuccessBanner<MemoryElement> = SuccessBanner::new(Slot::empty(), "show", None);
        banner.show();
        assert!(!banner.is_visible());
    }
}
