// File: src/form.rs
// Purpose: Run field validation across the form and render inline errors

use std::collections::BTreeSet;

use crate::dom::{ElementHandle, Page, Slot};
use crate::fields::FieldSpec;
use crate::validator::{validate_values, FieldValues, ValidationResult};

/// A `FieldSpec` with the input it reads and the element its error is written to
#[derive(Debug, Clone)]
pub struct FieldBinding<E> {
    pub spec: FieldSpec,
    pub input: Slot<E>,
    pub error: Slot<E>,
}

impl<E: ElementHandle> FieldBinding<E> {
    /// Resolve `#<id>` and `#<id><error_suffix>`
    pub fn resolve<P: Page<Element = E>>(page: &P, spec: FieldSpec, error_suffix: &str) -> Self {
        Self {
            input: page.slot_by_id(spec.id),
            error: page.slot_by_id(&format!("{}{}", spec.id, error_suffix)),
            spec,
        }
    }
}

/// Validates the contact form and keeps its error display in step with the last result
#[derive(Debug)]
pub struct FormValidator<E> {
    fields: Vec<FieldBinding<E>>,
    error_class: String,
    errored: BTreeSet<&'static str>,
}

impl<E: ElementHandle> FormValidator<E> {
    pub fn new(fields: Vec<FieldBinding<E>>, error_class: impl Into<String>) -> Self {
        Self {
            fields,
            error_class: error_class.into(),
            errored: BTreeSet::new(),
        }
    }

    pub fn fields(&self) -> &[FieldBinding<E>] {
        &self.fields
    }

    pub fn field(&self, id: &str) -> Option<&FieldBinding<E>> {
        self.fields.iter().find(|f| f.spec.id == id)
    }

    /// Current raw values of every bound input. Missing inputs read as empty.
    pub fn read_values(&self) -> FieldValues {
        self.fields
            .iter()
            .map(|f| (f.spec.id, f.input.value()))
            .collect()
    }

    /// Clear previous errors, validate `values`, and render an error for each failing field
    pub fn validate(&mut self, values: &FieldValues) -> ValidationResult {
        self.clear_all_errors();

        let specs: Vec<FieldSpec> = self.fields.iter().map(|f| f.spec.clone()).collect();
        let result = validate_values(&specs, values);

        for (id, message) in &result.fields {
            if let Some(message) = message {
                self.show_error(id, message);
            }
        }

        tracing::debug!(
            is_valid = result.is_valid,
            failing = ?result.failing_fields(),
            "contact form validated"
        );

        result
    }

    /// Validate whatever the inputs currently hold
    pub fn validate_current(&mut self) -> ValidationResult {
        let values = self.read_values();
        self.validate(&values)
    }

    fn show_error(&mut self, id: &str, message: &str) {
        let Some(binding) = self.fields.iter().find(|f| f.spec.id == id) else {
            return;
        };
        let error_class = &self.error_class;
        let shown = binding.input.with_both(&binding.error, |input, error| {
            input.add_class(error_class);
            error.set_text(message);
        });
        if shown.is_some() {
            self.errored.insert(binding.spec.id);
        }
    }

    /// Remove the error state of one field. Idempotent; unknown ids are ignored.
    pub fn clear_field_error(&mut self, id: &str) {
        let Some(binding) = self.fields.iter().find(|f| f.spec.id == id) else {
            return;
        };
        let error_class = &self.error_class;
        binding.input.with_both(&binding.error, |input, error| {
            input.remove_class(error_class);
            error.set_text("");
        });
        self.errored.remove(binding.spec.id);
    }

    /// Clear the error state of every field
    pub fn clear_all_errors(&mut self) {
        let ids: Vec<&'static str> = self.fields.iter().map(|f| f.spec.id).collect();
        for id in ids {
            self.clear_field_error(id);
        }
    }

    /// Empty every bound input, as a form reset would
    pub fn reset_values(&self) {
        for field in &self.fields {
            field.input.set_value("");
        }
    }

    /// Fields currently showing an error, in id order
    pub fn errored_fields(&self) -> Vec<&'static str> {
        self.errored.iter().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::memory::{MemoryElement, MemoryPage};
    use pretty_assertions::assert_eq;

    fn form_page() -> MemoryPage {
        let page = MemoryPage::new();
        let mut form = MemoryElement::new("form").with_id("contactForm");
        for (id, tag) in [("name", "input"), ("email", "input"), ("message", "textarea")] {
            form = form
                .child(MemoryElement::new(tag).with_id(id))
                .child(MemoryElement::new("span").with_id(&format!("{}Error", id)));
        }
        page.mount(form);
        page
    }

    fn validator(page: &MemoryPage) -> FormValidator<MemoryElement> {
        let fields = FieldSpec::contact_fields()
            .into_iter()
            .map(|spec| FieldBinding::resolve(page, spec, "Error"))
            .collect();
        FormValidator::new(fields, "error")
    }

    fn el(page: &MemoryPage, id: &str) -> MemoryElement {
        page.element_by_id(id).expect("element exists")
    }

    #[test]
    fn test_validate_renders_failing_fields_only() {
        let page = form_page();
        let mut form = validator(&page);
        let values = FieldValues::new()
            .with("name", "Alice")
            .with("email", "bad")
            .with("message", "short");

        let result = form.validate(&values);

        assert!(!result.is_valid);
        assert_eq!(form.errored_fields(), vec!["email", "message"]);
        assert!(!el(&page, "name").has_class("error"));
        assert_eq!(el(&page, "nameError").text(), "");
        assert!(el(&page, "email").has_class("error"));
        assert_eq!(
            el(&page, "emailError").text(),
            "Please enter a valid email address"
        );
        assert_eq!(
            el(&page, "messageError").text(),
            "Message must be at least 10 characters long"
        );
    }

    #[test]
    fn test_validate_clears_previous_errors() {
        let page = form_page();
        let mut form = validator(&page);
        form.validate(&FieldValues::new());
        assert_eq!(form.errored_fields().len(), 3);

        let result = form.validate(
            &FieldValues::new()
                .with("name", "Al")
                .with("email", "a@b.co")
                .with("message", "1234567890"),
        );

        assert!(result.is_valid);
        assert!(form.errored_fields().is_empty());
        for id in ["name", "email", "message"] {
            assert!(!el(&page, id).has_class("error"));
            assert_eq!(el(&page, &format!("{}Error", id)).text(), "");
        }
    }

    #[test]
    fn test_clear_field_error_is_idempotent() {
        let page = form_page();
        let mut form = validator(&page);
        form.validate(&FieldValues::new());

        form.clear_field_error("name");
        form.clear_field_error("name");
        form.clear_field_error("unknown");

        assert_eq!(form.errored_fields(), vec!["email", "message"]);
        assert!(!el(&page, "name").has_class("error"));
        assert_eq!(el(&page, "nameError").text(), "");
    }

    #[test]
    fn test_clear_all_then_valid_leaves_no_error_state() {
        let page = form_page();
        let mut form = validator(&page);
        form.validate(&FieldValues::new());
        form.clear_all_errors();
        assert!(form.errored_fields().is_empty());

        el(&page, "name").set_value("Alice");
        el(&page, "email").set_value("alice@example.com");
        el(&page, "message").set_value("Hello, this is long enough.");
        let result = form.validate_current();

        assert!(result.is_valid);
        assert!(form.errored_fields().is_empty());
    }

    #[test]
    fn test_missing_error_element_skips_rendering() {
        let page = MemoryPage::new();
        page.mount(MemoryElement::new("input").with_id("name"));
        let mut form = validator(&page);

        let result = form.validate(&FieldValues::new());

        assert!(!result.is_valid);
        assert!(form.errored_fields().is_empty());
        assert!(!el(&page, "name").has_class("error"));
    }

    #[test]
    fn test_reset_values() {
        let page = form_page();
        let form = validator(&page);
        el(&page, "name").set_value("Alice");
        el(&page, "message").set_value("Something");

        form.reset_values();

        let expected = FieldValues::new()
            .with("name", "")
            .with("email", "")
            .with("message", "");
        assert_eq!(form.read_values(), expected);
    }
}
