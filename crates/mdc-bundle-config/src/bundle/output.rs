use std::path::PathBuf;

use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::bundle::types::LibraryTarget;
use crate::error::{ConfigError, Result};

/// Where and how a bundle is written, as supplied by the caller.
///
/// `extra` holds any further output directives. A key in `extra` always wins
/// over the value the builder would otherwise compute for it, including the
/// named fields below (`"filename"` in `extra` beats `filename_pattern`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputSpec {
    /// Absolute directory the bundler writes into
    pub fs_dir: PathBuf,

    /// Public base path embedded in emitted references
    pub http_dir: String,

    /// Output filename, may contain `[name]`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename_pattern: Option<String>,

    /// Exported library name for script bundles
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub library: Option<String>,

    /// Additional output directives, keyed by the bundler's own field names
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub extra: IndexMap<String, Value>,
}

impl OutputSpec {
    pub fn new(fs_dir: impl Into<PathBuf>, http_dir: impl Into<String>) -> Self {
        Self {
            fs_dir: fs_dir.into(),
            http_dir: http_dir.into(),
            ..Default::default()
        }
    }

    pub fn with_filename_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.filename_pattern = Some(pattern.into());
        self
    }

    pub fn with_library(mut self, library: impl Into<String>) -> Self {
        self.library = Some(library.into());
        self
    }

    /// Add an output directive that overrides any computed default of the same key.
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.fs_dir.as_os_str().is_empty() {
            return Err(ConfigError::missing(
                "output.fs_dir",
                "Set the directory the bundle is written into",
            ));
        }
        if !self.fs_dir.is_absolute() {
            return Err(ConfigError::invalid(
                "output.fs_dir",
                format!("'{}' must be an absolute path", self.fs_dir.display()),
            ));
        }
        if self.http_dir.is_empty() {
            return Err(ConfigError::missing(
                "output.http_dir",
                "Set the public path the bundle is served from",
            ));
        }
        Ok(())
    }
}

/// Resolved `output` section of a bundle configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputConfig {
    pub path: PathBuf,
    pub public_path: String,
    pub filename: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub library_target: Option<LibraryTarget>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub library: Option<String>,
    /// Caller directives with no dedicated field
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

impl OutputConfig {
    pub(crate) fn new(spec: &OutputSpec, filename: String) -> Self {
        Self {
            path: spec.fs_dir.clone(),
            public_path: spec.http_dir.clone(),
            filename,
            library_target: None,
            library: spec.library.clone(),
            extra: IndexMap::new(),
        }
    }

    pub(crate) fn with_library_target(mut self, target: LibraryTarget) -> Self {
        self.library_target = Some(target);
        self
    }

    /// Layer caller directives over the computed defaults, key by key.
    pub(crate) fn apply_overrides(mut self, overrides: &IndexMap<String, Value>) -> Result<Self> {
        for (key, value) in overrides {
            match key.as_str() {
                "path" => self.path = typed(key, value)?,
                "publicPath" => self.public_path = typed(key, value)?,
                "filename" => self.filename = typed(key, value)?,
                "libraryTarget" => self.library_target = typed(key, value)?,
                "library" => self.library = typed(key, value)?,
                _ => {
                    self.extra.insert(key.clone(), value.clone());
                }
            }
        }
        Ok(self)
    }
}

fn typed<T: DeserializeOwned>(key: &str, value: &Value) -> Result<T> {
    serde_json::from_value(value.clone())
        .map_err(|e| ConfigError::invalid(format!("output.extra.{key}"), e.to_string()))
}
