// File: src/site.rs
// Purpose: Resolve the page's elements and wire every behaviour to its events

use std::cell::RefCell;
use std::rc::Rc;

use crate::banner::SuccessBanner;
use crate::config::SiteConfig;
use crate::controller::SubmissionController;
use crate::dom::{ElementHandle, EventKind, Page};
use crate::fields::FieldSpec;
use crate::footer::FooterYear;
use crate::form::{FieldBinding, FormValidator};
use crate::menu::MenuToggle;
use crate::scroll::SmoothScroll;
use crate::timer::Scheduler;

pub type SharedController<E, S> = Rc<RefCell<SubmissionController<E, S>>>;

/// Everything mounted on one page load
pub struct Site<E, S: Scheduler> {
    controller: SharedController<E, S>,
    menu: Option<Rc<MenuToggle<E>>>,
    scroll_links: usize,
}

impl<E, S> Site<E, S>
where
    E: ElementHandle,
    S: Scheduler + 'static,
{
    /// Build every component and register its handlers.
    ///
    /// Markup that is missing simply leaves the matching behaviour unbound.
    pub fn mount<P>(page: &P, scheduler: S, config: &SiteConfig) -> Self
    where
        P: Page<Element = E> + Clone + 'static,
    {
        let controller = Rc::new(RefCell::new(Self::build_controller(page, scheduler, config)));
        Self::bind_form(page, &controller, config);

        let menu = MenuToggle::new(
            page.slot(&config.menu.toggle_selector),
            page.slot(&config.menu.panel_selector),
            config.menu.active_class.clone(),
        )
        .bind(page);

        let scroll_links = if config.scroll.enabled {
            SmoothScroll::bind(page, &config.scroll.link_selector)
        } else {
            0
        };

        FooterYear::new(page.slot_by_id(&config.footer.year_id)).render_current();

        tracing::info!(
            menu = menu.is_some(),
            scroll_links,
            "site mounted"
        );

        Self {
            controller,
            menu,
            scroll_links,
        }
    }

    fn build_controller<P: Page<Element = E>>(
        page: &P,
        scheduler: S,
        config: &SiteConfig,
    ) -> SubmissionController<E, S> {
        let fields = FieldSpec::contact_fields()
            .into_iter()
            .map(|spec| FieldBinding::resolve(page, spec, &config.form.error_suffix))
            .collect();

        SubmissionController::new(
            FormValidator::new(fields, config.form.error_class.clone()),
            SuccessBanner::new(
                page.slot_by_id(&config.banner.element_id),
                config.banner.show_class.clone(),
                config.banner.text.clone(),
            ),
            scheduler,
            config.banner.hide_delay(),
            config.banner.timer_policy,
        )
    }

    fn bind_form<P: Page<Element = E>>(
        page: &P,
        controller: &SharedController<E, S>,
        config: &SiteConfig,
    ) {
        let form = page.slot_by_id(&config.form.form_id);
        if !form.is_present() {
            tracing::debug!(form_id = %config.form.form_id, "no contact form on page");
            return;
        }

        let on_submit = Rc::clone(controller);
        page.listen_slot(
            &form,
            EventKind::Submit,
            Box::new(move |event| {
                on_submit.borrow_mut().handle_submit(event);
            }),
        );

        let inputs: Vec<_> = controller
            .borrow()
            .validator()
            .fields()
            .iter()
            .map(|f| (f.spec.id, f.input.clone()))
            .collect();

        for (id, input) in inputs {
            let on_blur = Rc::clone(controller);
            page.listen_slot(
                &input,
                EventKind::Blur,
                Box::new(move |_| {
                    on_blur.borrow_mut().handle_blur(id);
                }),
            );

            let on_input = Rc::clone(controller);
            page.listen_slot(
                &input,
                EventKind::Input,
                Box::new(move |_| on_input.borrow_mut().handle_input(id)),
            );
        }
    }

    pub fn controller(&self) -> &SharedController<E, S> {
        &self.controller
    }

    pub fn menu(&self) -> Option<&Rc<MenuToggle<E>>> {
        self.menu.as_ref()
    }

    pub fn scroll_links(&self) -> usize {
        self.scroll_links
    }
}
