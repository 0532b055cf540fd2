//! Smooth scrolling for in-page anchor links

use crate::dom::{ElementHandle, EventKind, ListenTarget, Page, ScrollBehavior, ScrollBlock};

pub struct SmoothScroll;

impl SmoothScroll {
    /// Element id an anchor `href` points at.
    ///
    /// `None` for the bare page-top link `#` and for anything that is not a fragment.
    pub fn fragment_target(href: &str) -> Option<&str> {
        href.strip_prefix('#').filter(|id| !id.is_empty())
    }

    /// Attach a click handler to every link matching `selector`.
    /// Returns the number of links bound.
    pub fn bind<P>(page: &P, selector: &str) -> usize
    where
        P: Page + Clone + 'static,
    {
        let links = page.query_all(selector);
        let count = links.len();

        for link in links {
            let href = link.attribute("href").unwrap_or_default();
            let lookup = page.clone();
            page.listen(
                ListenTarget::Element(link),
                EventKind::Click,
                Box::new(move |event| {
                    let Some(id) = SmoothScroll::fragment_target(&href) else {
                        return;
                    };
                    // Unknown targets keep the browser's default jump
                    if let Some(target) = lookup.element_by_id(id) {
                        event.prevent_default();
                        target.scroll_into_view(ScrollBehavior::Smooth, ScrollBlock::Start);
                        tracing::debug!(target = id, "smooth scroll");
                    }
                }),
            );
        }

        count
    }
}
