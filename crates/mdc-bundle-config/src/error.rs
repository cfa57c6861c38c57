//! Error types for bundle configuration building and manifest loading.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    // Invalid builder input
    #[error("missing required field: {field}")]
    MissingField { field: String, hint: Option<String> },

    #[error("invalid config value for '{field}'")]
    InvalidValue { field: String, hint: Option<String> },

    // Path resolution errors
    #[error("path {} is outside the project root {}", .path.display(), .root.display())]
    OutsideRoot { path: PathBuf, root: PathBuf },

    // Filesystem scan errors
    #[error("invalid glob pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("failed to read {} while globbing", .path.display())]
    Glob {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Manifest loading errors
    #[error("bundle manifest not found")]
    NotFound,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConfigError {
    pub(crate) fn missing(field: impl Into<String>, hint: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
            hint: Some(hint.into()),
        }
    }

    pub(crate) fn invalid(field: impl Into<String>, hint: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            hint: Some(hint.into()),
        }
    }

    /// Name of the offending field for input errors.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::MissingField { field, .. } | Self::InvalidValue { field, .. } => Some(field),
            _ => None,
        }
    }

    pub fn hint(&self) -> Option<&str> {
        match self {
            Self::MissingField { hint, .. } | Self::InvalidValue { hint, .. } => hint.as_deref(),
            _ => None,
        }
    }
}

impl From<glob::GlobError> for ConfigError {
    fn from(err: glob::GlobError) -> Self {
        let path = err.path().to_path_buf();
        Self::Glob {
            path,
            source: err.into(),
        }
    }
}
