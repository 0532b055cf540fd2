// File: src/config.rs
// Purpose: Element ids, classes and timing the site binds to, loadable from TOML

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::error::ConfigError;
use crate::timer::BannerTimerPolicy;

/// Site configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct SiteConfig {
    #[serde(default)]
    pub form: FormConfig,

    #[serde(default)]
    pub banner: BannerConfig,

    #[serde(default)]
    pub menu: MenuConfig,

    #[serde(default)]
    pub scroll: ScrollConfig,

    #[serde(default)]
    pub footer: FooterConfig,
}

/// Contact form markup
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FormConfig {
    #[serde(default = "default_form_id")]
    pub form_id: String,

    /// Class added to an input that fails validation
    #[serde(default = "default_error_class")]
    pub error_class: String,

    /// Appended to a field id to find its error element, e.g. `nameError`
    #[serde(default = "default_error_suffix")]
    pub error_suffix: String,
}

/// Success banner
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BannerConfig {
    #[serde(default = "default_banner_id")]
    pub element_id: String,

    #[serde(default = "default_show_class")]
    pub show_class: String,

    /// Written into the banner when shown; `None` keeps the markup's own text
    #[serde(default)]
    pub text: Option<String>,

    #[serde(default = "default_hide_delay_ms")]
    pub hide_delay_ms: u64,

    #[serde(default)]
    pub timer_policy: BannerTimerPolicy,
}

/// Mobile navigation menu
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MenuConfig {
    #[serde(default = "default_toggle_selector")]
    pub toggle_selector: String,

    #[serde(default = "default_panel_selector")]
    pub panel_selector: String,

    #[serde(default = "default_active_class")]
    pub active_class: String,
}

/// Anchor smooth scrolling
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScrollConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_link_selector")]
    pub link_selector: String,
}

/// Footer year
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FooterConfig {
    #[serde(default = "default_year_id")]
    pub year_id: String,
}

// Default values
fn default_form_id() -> String {
    "contactForm".to_string()
}

fn default_error_class() -> String {
    "error".to_string()
}

fn default_error_suffix() -> String {
    "Error".to_string()
}

fn default_banner_id() -> String {
    "successMessage".to_string()
}

fn default_show_class() -> String {
    "show".to_string()
}

fn default_hide_delay_ms() -> u64 {
    5000
}

fn default_toggle_selector() -> String {
    ".mobile-menu-toggle".to_string()
}

fn default_panel_selector() -> String {
    ".nav-menu".to_string()
}

fn default_active_class() -> String {
    "active".to_string()
}

fn default_link_selector() -> String {
    "a[href^=\"#\"]".to_string()
}

fn default_year_id() -> String {
    "currentYear".to_string()
}

fn default_true() -> bool {
    true
}

// Default implementations
impl Default for FormConfig {
    fn default() -> Self {
        Self {
            form_id: default_form_id(),
            error_class: default_error_class(),
            error_suffix: default_error_suffix(),
        }
    }
}

impl Default for BannerConfig {
    fn default() -> Self {
        Self {
            element_id: default_banner_id(),
            show_class: default_show_class(),
            text: None,
            hide_delay_ms: default_hide_delay_ms(),
            timer_policy: BannerTimerPolicy::default(),
        }
    }
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            toggle_selector: default_toggle_selector(),
            panel_selector: default_panel_selector(),
            active_class: default_active_class(),
        }
    }
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            link_selector: default_link_selector(),
        }
    }
}

impl Default for FooterConfig {
    fn default() -> Self {
        Self {
            year_id: default_year_id(),
        }
    }
}

impl BannerConfig {
    pub fn hide_delay(&self) -> Duration {
        Duration::from_millis(self.hide_delay_ms)
    }
}

impl SiteConfig {
    /// Load configuration from a TOML file. A missing or empty file yields the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        Self::from_toml_str(&content)
            .with_context(|| format!("Failed to load config file: {:?}", path))
    }

    /// Parse and validate TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: SiteConfig = toml::from_str(content).context("Failed to parse site config")?;
        config.validate()?;

        Ok(config)
    }

    /// Reject values the site cannot bind with
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        let required = [
            ("form.form_id", &self.form.form_id),
            ("form.error_class", &self.form.error_class),
            ("form.error_suffix", &self.form.error_suffix),
            ("banner.element_id", &self.banner.element_id),
            ("banner.show_class", &self.banner.show_class),
            ("menu.toggle_selector", &self.menu.toggle_selector),
            ("menu.panel_selector", &self.menu.panel_selector),
            ("menu.active_class", &self.menu.active_class),
            ("scroll.link_selector", &self.scroll.link_selector),
            ("footer.year_id", &self.footer.year_id),
        ];

        if let Some(key) = required
            .iter()
            .find(|(_, value)| value.trim().is_empty())
            .map(|(key, _)| *key)
        {
            return Err(ConfigError::EmptyValue { key });
        }

        if self.banner.hide_delay_ms == 0 {
            return Err(ConfigError::ZeroHideDelay);
        }

        Ok(())
    }
}
