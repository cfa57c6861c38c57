//! Bundle configuration builders.
//!
//! A [`BundleBuilder`] turns a bundle name, its entry points and an
//! [`OutputSpec`] into a complete [`BundleConfig`] for the external bundler.
//! Script and style bundles each come in two flavours: the library's main
//! bundle, whose entries are fixed, and custom bundles with caller-chosen
//! entries.
//!
//! Builders are pure apart from reading the filesystem to discover stylesheet
//! include paths; two calls with the same inputs produce equal configurations.

mod output;
mod script;
mod style;
mod types;

use std::sync::Arc;

use indexmap::IndexMap;
use serde::Serialize;
use std::path::PathBuf;

use crate::error::{ConfigError, Result};
use crate::globber;
use crate::paths::PathResolver;
use crate::policy::BuildPolicy;
use crate::transforms::{StandardTransforms, Transform, TransformFactory};

pub use output::{OutputConfig, OutputSpec};
pub use script::{MAIN_SCRIPT_BUNDLE, MAIN_SCRIPT_ENTRY, MAIN_SCRIPT_FILENAME, MAIN_SCRIPT_LIBRARY};
pub use style::{MAIN_STYLE_BUNDLE, MAIN_STYLE_ENTRIES, SASS_INCLUDE_PATTERN};
pub use types::{
    DevServerOptions, Devtool, EntrySpec, ExtractLoader, FilePattern, LibraryTarget, LoaderSpec,
    ModuleOptions, ModuleRule, RuleUse,
};

/// Inputs of a custom script or style bundle
#[derive(Debug, Clone, PartialEq)]
pub struct BundleSpec {
    /// Used as the configuration's `name`
    pub bundle_name: String,
    /// Entry points, passed through verbatim
    pub chunks: EntrySpec,
    pub output: OutputSpec,
    /// Extra plugins, appended after the builder's own in the given order
    pub transforms: Vec<Arc<Transform>>,
}

impl BundleSpec {
    pub fn new(bundle_name: impl Into<String>, chunks: impl Into<EntrySpec>, output: OutputSpec) -> Self {
        Self {
            bundle_name: bundle_name.into(),
            chunks: chunks.into(),
            output,
            transforms: Vec::new(),
        }
    }

    pub fn with_transform(mut self, transform: impl Into<Arc<Transform>>) -> Self {
        self.transforms.push(transform.into());
        self
    }

    fn validate(&self) -> Result<()> {
        if self.bundle_name.trim().is_empty() {
            return Err(ConfigError::missing(
                "bundle_name",
                "Every bundle needs a non-empty name",
            ));
        }
        if self.chunks.is_empty() {
            return Err(ConfigError::missing(
                "chunks",
                format!("Bundle '{}' has no entry points", self.bundle_name),
            ));
        }
        self.output.validate()
    }
}

/// A complete configuration for one bundle.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleConfig {
    pub name: String,
    pub entry: EntrySpec,
    pub output: OutputConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dev_server: Option<DevServerOptions>,
    pub devtool: Devtool,
    pub module: ModuleOptions,
    pub plugins: Vec<Arc<Transform>>,
}

impl BundleConfig {
    /// Position of the first plugin with the given name.
    pub fn plugin_index(&self, name: &str) -> Option<usize> {
        self.plugins.iter().position(|p| p.name == name)
    }
}

/// Builds bundle configurations against one project root, transform factory
/// and build policy.
#[derive(Clone)]
pub struct BundleBuilder {
    resolver: Arc<dyn PathResolver>,
    transforms: Arc<dyn TransformFactory>,
    policy: BuildPolicy,
}

impl BundleBuilder {
    /// Builder with the standard transforms and the default policy.
    pub fn new(resolver: impl PathResolver + 'static) -> Self {
        Self {
            resolver: Arc::new(resolver),
            transforms: Arc::new(StandardTransforms::new()),
            policy: BuildPolicy::default(),
        }
    }

    pub fn with_transforms(mut self, transforms: impl TransformFactory + 'static) -> Self {
        self.transforms = Arc::new(transforms);
        self
    }

    pub fn with_policy(mut self, policy: BuildPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn resolver(&self) -> &dyn PathResolver {
        self.resolver.as_ref()
    }

    pub fn policy(&self) -> BuildPolicy {
        self.policy
    }

    /// Discover entry points by glob; see [`globber::discover_chunks`].
    pub fn discover_chunks(
        &self,
        input_path_pattern: &str,
        remove_chunk_name_prefix: Option<&str>,
    ) -> Result<IndexMap<String, PathBuf>> {
        globber::discover_chunks(self.resolver(), input_path_pattern, remove_chunk_name_prefix)
    }

    fn banner(&self) -> Arc<Transform> {
        Arc::new(self.transforms.banner())
    }
}

impl std::fmt::Debug for BundleBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BundleBuilder")
            .field("root", &self.resolver.root())
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}
