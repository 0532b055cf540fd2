use thiserror::Error;

/// A configuration value the site cannot run with
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("`{key}` must not be empty")]
    EmptyValue { key: &'static str },

    #[error("`banner.hide_delay_ms` must be greater than zero")]
    ZeroHideDelay,
}
