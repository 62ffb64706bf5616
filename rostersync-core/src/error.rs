//! Error types for rostersync-core.

use thiserror::Error;

/// All errors that can arise while building the run configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// One or more required keys are unset or empty.
    #[error("missing required configuration: {}", keys.join(", "))]
    Missing { keys: Vec<&'static str> },

    /// A key is set but its value cannot be interpreted.
    #[error("invalid value {value:?} for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Convenience constructor for [`ConfigError::Invalid`].
pub(crate) fn invalid(key: &'static str, value: &str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        key,
        value: value.to_owned(),
        reason: reason.into(),
    }
}
