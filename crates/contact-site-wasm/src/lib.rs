//! Contact Site WASM
//!
//! WebAssembly entry point for the contact site. Mounts the core behaviour on the real
//! DOM once the document has loaded, and exposes the field validators to JavaScript.

use contact_site_core::{validate_field, FieldSpec, Site, SiteConfig};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{console, Document, Window};

pub mod dom;
pub mod timer;

use dom::DomPage;
use timer::WindowScheduler;

/// Inline `<script type="application/toml">` element holding site settings
const CONFIG_ELEMENT_ID: &str = "site-config";

/// Set panic hook and mount the site when the DOM is ready
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("window has no document"))?;

    if document.ready_state() == "loading" {
        let target = document.clone();
        let on_ready = Closure::once_into_js(move || mount(window, document));
        target.add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref())?;
    } else {
        mount(window, document);
    }

    Ok(())
}

fn mount(window: Window, document: Document) {
    let config = inline_config(&document);
    let page = DomPage::new(document);

    // Handlers hold their own references, the site can be dropped here
    let _site = Site::mount(&page, WindowScheduler::new(window), &config);

    console::log_1(&JsValue::from_str("Website initialized successfully!"));
}

fn inline_config(document: &Document) -> SiteConfig {
    let Some(text) = document
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|e| e.text_content())
    else {
        return SiteConfig::default();
    };

    SiteConfig::from_toml_str(&text).unwrap_or_else(|err| {
        console::warn_1(&JsValue::from_str(&format!(
            "Invalid site config, using defaults: {:#}",
            err
        )));
        SiteConfig::default()
    })
}

/// Validate one contact field value
///
/// # Returns
/// The error message, or `undefined` when the value is valid or the field is unknown
///
/// # Example (JavaScript)
/// ```javascript
/// const error = validateField('email', 'user@example'); // "Please enter a valid email address"
/// ```
#[wasm_bindgen(js_name = validateField)]
pub fn validate_field_js(field_id: &str, value: &str) -> Option<String> {
    FieldSpec::contact_fields()
        .iter()
        .find(|spec| spec.id == field_id)
        .and_then(|spec| validate_field(value, spec))
}

/// Quick email validation
#[wasm_bindgen(js_name = isValidEmail)]
pub fn is_valid_email_js(email: &str) -> bool {
    contact_site_core::is_valid_email(email)
}
