//! Mobile navigation menu toggle

use std::rc::Rc;

use crate::dom::{ElementHandle, EventKind, ListenTarget, Page, Slot};

/// Hamburger toggle plus the navigation panel it opens
#[derive(Debug, Clone)]
pub struct MenuToggle<E> {
    toggle: Slot<E>,
    panel: Slot<E>,
    active_class: String,
}

impl<E: ElementHandle> MenuToggle<E> {
    pub fn new(toggle: Slot<E>, panel: Slot<E>, active_class: impl Into<String>) -> Self {
        Self {
            toggle,
            panel,
            active_class: active_class.into(),
        }
    }

    pub fn is_open(&self) -> bool {
        self.panel.has_class(&self.active_class)
    }

    /// Flip the panel and mirror the new state into `aria-expanded`
    pub fn toggle(&self) -> bool {
        let open = self.panel.toggle_class(&self.active_class);
        self.sync_aria(open);
        tracing::debug!(open, "navigation menu toggled");
        open
    }

    /// Force the panel closed whatever its current state
    pub fn close(&self) {
        self.panel.remove_class(&self.active_class);
        self.sync_aria(false);
    }

    /// Close an open panel when a click lands outside both the toggle and the panel
    pub fn handle_document_click(&self, target: &E) {
        let inside = self.toggle.contains(target) || self.panel.contains(target);
        if !inside && self.is_open() {
            self.close();
            tracing::debug!("navigation menu closed by outside click");
        }
    }

    fn sync_aria(&self, open: bool) {
        self.toggle
            .set_attribute("aria-expanded", if open { "true" } else { "false" });
    }

    /// Register the toggle, link, and outside-click handlers.
    /// Nothing is bound unless both the toggle and the panel exist.
    pub fn bind<P: Page<Element = E>>(self, page: &P) -> Option<Rc<Self>> {
        let (toggle, panel) = self
            .toggle
            .with_both(&self.panel, |t, p| (t.clone(), p.clone()))?;
        let menu = Rc::new(self);

        let on_toggle = Rc::clone(&menu);
        page.listen(
            ListenTarget::Element(toggle),
            EventKind::Click,
            Box::new(move |_| {
                on_toggle.toggle();
            }),
        );

        for link in page.query_within(&panel, "a") {
            let on_link = Rc::clone(&menu);
            page.listen(
                ListenTarget::Element(link),
                EventKind::Click,
                Box::new(move |_| on_link.close()),
            );
        }

        let on_document = Rc::clone(&menu);
        page.listen(
            ListenTarget::Document,
            EventKind::Click,
            Box::new(move |event| {
                if let Some(target) = &event.target {
                    on_document.handle_document_click(target);
                }
            }),
        );

        Some(menu)
    }
}
