//! Named transform/plugin objects placed into bundle configurations.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Copyright banner prepended to every emitted bundle.
pub const DEFAULT_BANNER: &str = "/*!\n Material Components for the web\n Copyright (c) 2018 Google Inc.\n License: Apache-2.0\n*/";

/// An opaque, named plugin handed to the external bundler.
///
/// The builder never looks inside a transform; it only decides where in the
/// configuration each one goes and in what order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub name: String,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub options: Value,
}

impl Transform {
    pub fn new(name: impl Into<String>, options: Value) -> Self {
        Self {
            name: name.into(),
            options,
        }
    }

    /// A transform that takes no options.
    pub fn named(name: impl Into<String>) -> Self {
        Self::new(name, Value::Null)
    }
}

/// Produces the transforms the bundle builders wire in themselves.
pub trait TransformFactory: Send + Sync {
    /// Copyright banner injection.
    fn banner(&self) -> Transform;

    /// Extraction of compiled stylesheets into standalone files named by `filename_pattern`.
    fn style_extraction(&self, filename_pattern: &str) -> Transform;

    /// Removal of the intermediate script artifacts the style pipeline leaves in `output_dir`.
    fn style_cleanup(&self, output_dir: &Path) -> Transform;
}

/// The stock transforms: webpack's banner plugin, extract-text and the
/// css-js cleanup step.
#[derive(Debug, Clone)]
pub struct StandardTransforms {
    banner: String,
}

impl StandardTransforms {
    pub fn new() -> Self {
        Self::with_banner(DEFAULT_BANNER)
    }

    pub fn with_banner(banner: impl Into<String>) -> Self {
        Self {
            banner: banner.into(),
        }
    }

    pub fn banner_text(&self) -> &str {
        &self.banner
    }
}

impl Default for StandardTransforms {
    fn default() -> Self {
        Self::new()
    }
}

impl TransformFactory for StandardTransforms {
    fn banner(&self) -> Transform {
        Transform::new(
            "banner",
            json!({
                "banner": self.banner,
                "raw": true,
                "entryOnly": true,
            }),
        )
    }

    fn style_extraction(&self, filename_pattern: &str) -> Transform {
        Transform::new("extract-text", json!({ "filename": filename_pattern }))
    }

    fn style_cleanup(&self, output_dir: &Path) -> Transform {
        Transform::new(
            "css-js-cleanup",
            json!({ "cleanupDirAbsolutePath": output_dir.to_string_lossy() }),
        )
    }
}
