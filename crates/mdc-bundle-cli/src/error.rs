//! Error handling for the `mdc-bundle` CLI.
//!
//! Commands return [`CliError`]; `main` turns it into a [`miette::Report`]
//! with the hint, if any, on its own line.

use std::path::PathBuf;

use mdc_bundle_config::ConfigError;
use miette::Report;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    /// Manifest loading or bundle building failed
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// No manifest under the project root
    #[error("No bundle manifest found in {}", .0.display())]
    ManifestNotFound(PathBuf),

    /// Writing generated output failed
    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T, E = CliError> = std::result::Result<T, E>;

impl CliError {
    /// Actionable hint shown under the error message.
    pub fn hint(&self) -> Option<String> {
        match self {
            Self::Config(err) => err.hint().map(str::to_string).or_else(|| match err {
                ConfigError::OutsideRoot { .. } => {
                    Some("Manifest paths are relative to the project root; remove '..' segments".to_string())
                }
                ConfigError::InvalidPattern { .. } => {
                    Some("Use '*' within a path segment and '**' as a whole segment".to_string())
                }
                _ => None,
            }),
            Self::ManifestNotFound(_) => Some(
                "Create mdc-bundle.toml, add an 'mdcBundle' field to package.json, or pass --manifest"
                    .to_string(),
            ),
            _ => None,
        }
    }
}

/// Convert a CLI error into a miette report for display.
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err.hint() {
        Some(hint) => miette::miette!("{}\n\nHint: {}", err, hint),
        None => miette::miette!("{}", err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_errors_keep_their_message() {
        let err: CliError = ConfigError::NotFound.into();
        assert_eq!(err.to_string(), "bundle manifest not found");
    }

    #[test]
    fn manifest_not_found_has_hint() {
        let err = CliError::ManifestNotFound(PathBuf::from("/work/mdc"));
        assert!(err.to_string().contains("/work/mdc"));
        assert!(err.hint().unwrap().contains("mdc-bundle.toml"));
    }

    #[test]
    fn outside_root_gets_a_hint() {
        let err: CliError = ConfigError::OutsideRoot {
            path: PathBuf::from("/etc"),
            root: PathBuf::from("/work"),
        }
        .into();
        assert!(err.hint().unwrap().contains(".."));
    }

    #[test]
    fn report_includes_hint() {
        let err = CliError::ManifestNotFound(PathBuf::from("/work/mdc"));
        let report = cli_error_to_miette(err);
        assert!(report.to_string().contains("Hint:"));
    }
}
