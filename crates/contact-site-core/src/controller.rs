//! Submission state machine
//!
//! `Idle -> Validating -> {Rejected, Accepted} -> Idle`. Every submit suppresses the
//! browser's default action; only an accepted submission shows the banner and resets
//! the form.

use std::time::Duration;

use crate::banner::SuccessBanner;
use crate::dom::{ElementHandle, UiEvent};
use crate::form::FormValidator;
use crate::timer::{BannerTimerPolicy, Scheduler};
use crate::validator::ValidationResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitState {
    Idle,
    Validating,
    Rejected,
    Accepted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Rejected(ValidationResult),
    Accepted(ValidationResult),
}

impl SubmitOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, SubmitOutcome::Accepted(_))
    }

    pub fn result(&self) -> &ValidationResult {
        match self {
            SubmitOutcome::Rejected(result) | SubmitOutcome::Accepted(result) => result,
        }
    }
}

/// Snapshot of the transient UI state of the form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSessionState {
    pub errored_fields: Vec<&'static str>,
    pub banner_visible: bool,
}

pub struct SubmissionController<E, S: Scheduler> {
    validator: FormValidator<E>,
    banner: SuccessBanner<E>,
    scheduler: S,
    hide_delay: Duration,
    policy: BannerTimerPolicy,
    hide_timer: Option<S::Handle>,
    state: SubmitState,
    history: Vec<SubmitState>,
}

impl<E: ElementHandle, S: Scheduler> SubmissionController<E, S> {
    pub fn new(
        validator: FormValidator<E>,
        banner: SuccessBanner<E>,
        scheduler: S,
        hide_delay: Duration,
        policy: BannerTimerPolicy,
    ) -> Self {
        Self {
            validator,
            banner,
            scheduler,
            hide_delay,
            policy,
            hide_timer: None,
            state: SubmitState::Idle,
            history: Vec::new(),
        }
    }

    pub fn state(&self) -> SubmitState {
        self.state
    }

    /// States entered during the most recent submission, oldest first
    pub fn last_transitions(&self) -> &[SubmitState] {
        &self.history
    }

    pub fn validator(&self) -> &FormValidator<E> {
        &self.validator
    }

    pub fn banner(&self) -> &SuccessBanner<E> {
        &self.banner
    }

    pub fn session(&self) -> FormSessionState {
        FormSessionState {
            errored_fields: self.validator.errored_fields(),
            banner_visible: self.banner.is_visible(),
        }
    }

    fn transition(&mut self, next: SubmitState) {
        tracing::trace!(from = ?self.state, to = ?next, "submission state");
        self.state = next;
        self.history.push(next);
    }

    /// Submit handler: the default action is suppressed whatever the outcome
    pub fn handle_submit(&mut self, event: &UiEvent<E>) -> SubmitOutcome {
        event.prevent_default();
        self.submit()
    }

    pub fn submit(&mut self) -> SubmitOutcome {
        self.history.clear();
        self.transition(SubmitState::Validating);
        let result = self.run_validation();

        let outcome = if result.is_valid {
            self.transition(SubmitState::Accepted);
            self.accept();
            SubmitOutcome::Accepted(result)
        } else {
            self.transition(SubmitState::Rejected);
            SubmitOutcome::Rejected(result)
        };

        self.transition(SubmitState::Idle);
        outcome
    }

    fn run_validation(&mut self) -> ValidationResult {
        self.clear_all_errors();
        self.validator.validate_current()
    }

    fn accept(&mut self) {
        self.banner.show();
        self.validator.reset_values();
        self.validator.clear_all_errors();
        self.schedule_hide();
        tracing::info!("contact form submitted");
    }

    fn schedule_hide(&mut self) {
        if self.policy == BannerTimerPolicy::Restart {
            self.cancel_hide();
        }

        let banner = self.banner.clone();
        let handle = self
            .scheduler
            .schedule(self.hide_delay, Box::new(move || banner.hide()));

        if handle.is_none() {
            tracing::warn!("could not schedule success banner hide");
        }
        self.hide_timer = handle;
    }

    fn cancel_hide(&mut self) {
        if let Some(handle) = self.hide_timer.take() {
            self.scheduler.cancel(&handle);
        }
    }

    /// Blur: re-validate the whole form, but only once the field has content
    pub fn handle_blur(&mut self, field: &str) -> Option<ValidationResult> {
        let touched = self
            .validator
            .field(field)
            .map(|f| !f.input.value().trim().is_empty())
            .unwrap_or(false);

        touched.then(|| self.run_validation())
    }

    /// Input: drop the field's error eagerly without re-validating
    pub fn handle_input(&mut self, field: &str) {
        self.validator.clear_field_error(field);
    }

    /// Clear every field error and hide the banner. Under `Restart` the pending hide is
    /// cancelled too; under `Overlap` it keeps running.
    pub fn clear_all_errors(&mut self) {
        self.validator.clear_all_errors();
        if self.policy == BannerTimerPolicy::Restart {
            self.cancel_hide();
        }
        self.banner.hide();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::memory::{MemoryElement, MemoryPage};
    use crate::dom::{EventKind, Page, Slot};
    use crate::fields::FieldSpec;
    use crate::form::FieldBinding;
    use crate::timer::ManualScheduler;
    use pretty_assertions::assert_eq;

    struct Fixture {
        page: MemoryPage,
        scheduler: ManualScheduler,
        controller: SubmissionController<MemoryElement, ManualScheduler>,
    }

    impl Fixture {
        fn new(policy: BannerTimerPolicy) -> Self {
            let page = MemoryPage::new();
            let mut form = MemoryElement::new("form").with_id("contactForm");
            for (id, tag) in [("name", "input"), ("email", "input"), ("message", "textarea")] {
                form = form
                    .child(MemoryElement::new(tag).with_id(id))
                    .child(MemoryElement::new("span").with_id(&format!("{}Error", id)));
            }
            page.mount(form);
            page.mount(MemoryElement::new("div").with_id("successMessage"));

            let fields = FieldSpec::contact_fields()
                .into_iter()
                .map(|spec| FieldBinding::resolve(&page, spec, "Error"))
                .collect();
            let scheduler = ManualScheduler::new();
            let controller = SubmissionController::new(
                FormValidator::new(fields, "error"),
                SuccessBanner::new(page.slot_by_id("successMessage"), "show", None),
                scheduler.clone(),
                Duration::from_millis(5000),
                policy,
            );

            Self {
                page,
                scheduler,
                controller,
            }
        }

        fn fill(&self, name: &str, email: &str, message: &str) {
            for (id, value) in [("name", name), ("email", email), ("message", message)] {
                self.el(id).set_value(value);
            }
        }

        fn fill_valid(&self) {
            self.fill("Alice", "alice@example.com", "Hello, this is long enough.");
        }

        fn el(&self, id: &str) -> MemoryElement {
            self.page.element_by_id(id).expect("element exists")
        }

        fn submit(&mut self) -> (SubmitOutcome, bool) {
            let event = UiEvent::new(EventKind::Submit, Some(self.el("contactForm")));
            let outcome = self.controller.handle_submit(&event);
            (outcome, event.default_prevented())
        }
    }

    #[test]
    fn test_rejected_submission() {
        let mut fx = Fixture::new(BannerTimerPolicy::Restart);
        fx.fill("A", "bad", "short");

        let (outcome, prevented) = fx.submit();

        assert!(prevented);
        assert!(!outcome.is_accepted());
        assert_eq!(
            fx.controller.last_transitions(),
            &[SubmitState::Validating, SubmitState::Rejected, SubmitState::Idle]
        );
        assert_eq!(
            fx.controller.session(),
            FormSessionState {
                errored_fields: vec!["email", "message", "name"],
                banner_visible: false,
            }
        );
        // Rejected submissions keep what the user typed
        assert_eq!(fx.el("name").value(), "A");
        assert_eq!(fx.scheduler.pending(), 0);
    }

    #[test]
    fn test_accepted_submission_hides_banner_after_delay() {
        let mut fx = Fixture::new(BannerTimerPolicy::Restart);
        fx.fill_valid();

        let (outcome, prevented) = fx.submit();

        assert!(prevented);
        assert!(outcome.is_accepted());
        assert_eq!(fx.controller.state(), SubmitState::Idle);
        assert!(fx.controller.banner().is_visible());
        assert!(fx.el("successMessage").has_class("show"));
        assert_eq!(fx.el("name").value(), "");
        assert_eq!(fx.el("message").value(), "");
        assert!(fx.controller.session().errored_fields.is_empty());

        fx.scheduler.advance_ms(4999);
        assert!(fx.controller.banner().is_visible());
        fx.scheduler.advance_ms(1);
        assert!(!fx.controller.banner().is_visible());
        assert!(!fx.el("successMessage").has_class("show"));
    }

    #[test]
    fn test_restart_policy_is_single_shot() {
        let mut fx = Fixture::new(BannerTimerPolicy::Restart);
        fx.fill_valid();
        fx.submit();
        fx.scheduler.advance_ms(3000);
        fx.fill_valid();
        fx.submit();

        assert_eq!(fx.scheduler.pending(), 1);
        // First hide would have fired here
        fx.scheduler.advance_ms(2000);
        assert!(fx.controller.banner().is_visible());
        assert_eq!(fx.scheduler.advance_ms(3000), 1);
        assert!(!fx.controller.banner().is_visible());
    }

    #[test]
    fn test_overlap_policy_keeps_earlier_timer() {
        let mut fx = Fixture::new(BannerTimerPolicy::Overlap);
        fx.fill_valid();
        fx.submit();
        fx.scheduler.advance_ms(3000);
        fx.fill_valid();
        fx.submit();

        assert_eq!(fx.scheduler.pending(), 2);
        // The first hide fires 2s into the second banner's lifetime
        fx.scheduler.advance_ms(2000);
        assert!(!fx.controller.banner().is_visible());
        assert_eq!(fx.scheduler.advance_ms(3000), 1);
        assert!(!fx.controller.banner().is_visible());
        assert_eq!(fx.scheduler.pending(), 0);
    }

    #[test]
    fn test_new_validation_run_hides_banner() {
        let mut fx = Fixture::new(BannerTimerPolicy::Restart);
        fx.fill_valid();
        fx.submit();
        assert!(fx.controller.banner().is_visible());

        fx.fill("A", "", "");
        fx.submit();

        assert!(!fx.controller.banner().is_visible());
        assert_eq!(fx.scheduler.pending(), 0);
    }

    #[test]
    fn test_blur_validates_only_touched_fields() {
        let mut fx = Fixture::new(BannerTimerPolicy::Restart);

        assert_eq!(fx.controller.handle_blur("name"), None);
        assert!(fx.controller.session().errored_fields.is_empty());

        fx.el("name").set_value("A");
        let result = fx.controller.handle_blur("name").expect("validated");
        assert!(!result.is_valid);
        assert_eq!(
            fx.el("nameError").text(),
            "Name must be at least 2 characters long"
        );
    }

    #[test]
    fn test_input_clears_only_that_field() {
        let mut fx = Fixture::new(BannerTimerPolicy::Restart);
        fx.submit();
        assert_eq!(fx.controller.session().errored_fields.len(), 3);

        fx.controller.handle_input("email");

        assert_eq!(
            fx.controller.session().errored_fields,
            vec!["message", "name"]
        );
        assert_eq!(fx.el("emailError").text(), "");
    }

    #[test]
    fn test_missing_banner_still_accepts() {
        let mut fx = Fixture::new(BannerTimerPolicy::Restart);
        fx.controller.banner = SuccessBanner::new(Slot::empty(), "show", None);
        fx.fill_valid();

        let (outcome, _) = fx.submit();

        assert!(outcome.is_accepted());
        assert!(!fx.controller.session().banner_visible);
        assert_eq!(fx.el("email").value(), "");
    }
}
