//! Error types for the locomotion controller.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while configuring a controller.
///
/// A running step never fails: geometric queries fail open and input is clamped.
#[derive(Error, Debug)]
pub enum ControllerError {
    /// A required collaborator was not supplied to the builder.
    #[error("missing required collaborator: {0}")]
    MissingCollaborator(&'static str),

    /// A setting is outside its valid range.
    #[error("invalid setting `{field}`: {reason}")]
    InvalidSetting {
        field: &'static str,
        reason: String,
    },

    /// Settings file could not be read.
    #[error("failed to read settings from {0}: {1}")]
    SettingsIo(PathBuf, #[source] std::io::Error),

    /// Settings text is not valid TOML for `ControllerSettings`.
    #[error("failed to parse settings: {0}")]
    SettingsParse(#[from] toml::de::Error),
}

impl ControllerError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        ControllerError::InvalidSetting {
            field,
            reason: reason.into(),
        }
    }
}

/// Result type for controller configuration.
pub type Result<T> = std::result::Result<T, ControllerError>;
