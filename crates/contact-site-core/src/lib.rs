//! Contact Site Core
//!
//! Client-side behaviour for a marketing/contact site, kept independent of the browser.
//! The same code runs against the real DOM (through `contact-site-wasm`) and against the
//! in-memory page used by tests.

pub mod banner;
pub mod config;
pub mod controller;
pub mod dom;
pub mod email;
pub mod error;
pub mod fields;
pub mod footer;
pub mod form;
pub mod menu;
pub mod scroll;
pub mod site;
pub mod timer;
pub mod validator;

pub use banner::SuccessBanner;
pub use config::SiteConfig;
pub use controller::{FormSessionState, SubmissionController, SubmitOutcome, SubmitState};
pub use dom::{ElementHandle, EventKind, ListenTarget, Page, Slot, UiEvent};
pub use email::is_valid_email;
pub use error::ConfigError;
pub use fields::{FieldFormat, FieldSpec};
pub use footer::FooterYear;
pub use form::{FieldBinding, FormValidator};
pub use menu::MenuToggle;
pub use scroll::SmoothScroll;
pub use site::Site;
pub use timer::{BannerTimerPolicy, ManualScheduler, Scheduler};
pub use validator::{validate_field, validate_values, FieldValues, ValidationResult};
