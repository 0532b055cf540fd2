//! Copyright year in the page footer

use chrono::{Datelike, Local};

use crate::dom::{ElementHandle, Slot};

#[derive(Debug, Clone)]
pub struct FooterYear<E> {
    element: Slot<E>,
}

impl<E: ElementHandle> FooterYear<E> {
    pub fn new(element: Slot<E>) -> Self {
        Self { element }
    }

    pub fn render(&self, year: i32) {
        self.element.set_text(&year.to_string());
    }

    pub fn render_current(&self) {
        self.render(current_year());
    }
}

pub fn current_year() -> i32 {
    Local::now().year()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::memory::MemoryElement;

    #[test]
    fn test_render_year() {
        let element = MemoryElement::new("span").with_id("currentYear");
        FooterYear::new(Slot::new(Some(element.clone()))).render(2026);
        assert_eq!(element.text(), "2026");
    }

    #[test]
    fn test_current_year_is_plausible() {
        assert!(current_year() >= 2024);
    }
}
