use std::time::Duration;

use contact_site_core::timer::Scheduler;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Window;

/// `setTimeout` / `clearTimeout` on the browser window
#[derive(Debug, Clone)]
pub struct WindowScheduler {
    window: Window,
}

impl WindowScheduler {
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

impl Scheduler for WindowScheduler {
    type Handle = i32;

    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) -> Option<i32> {
        let callback = Closure::once_into_js(move || task());
        let timeout = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);

        self.window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.unchecked_ref(),
                timeout,
            )
            .map_err(|err| tracing::warn!(?err, "setTimeout failed"))
            .ok()
    }

    fn cancel(&self, handle: &i32) {
        self.window.clear_timeout_with_handle(*handle);
    }
}
