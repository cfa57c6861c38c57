//! Declarative bundle manifests.
//!
//! A manifest lists the bundles a project builds and the policy they share.
//! It lives in `mdc-bundle.toml` at the project root, or under the
//! `mdcBundle` field of `package.json`:
//!
//! ```toml
//! [policy]
//! style_source_maps = false
//!
//! [[bundles]]
//! kind = "main-script"
//! output = { fs_dir = "build", http_dir = "/assets/" }
//!
//! [[bundles]]
//! kind = "style"
//! name = "screenshot-css"
//! chunks = { glob = "/test/screenshot/**/*.scss", remove_prefix = "test/screenshot/" }
//! output = { fs_dir = "test/screenshot/out", http_dir = "/out/" }
//! ```
//!
//! Every path in a manifest is relative to the project root. Environment
//! variables prefixed `MDC_BUNDLE_` override file values, with `__`
//! separating nested keys (`MDC_BUNDLE_POLICY__STYLE_SOURCE_MAPS=true`).

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use figment::Figment;
use figment::providers::{Env, Format as _, Json, Serialized, Toml};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::bundle::{BundleBuilder, BundleConfig, BundleSpec, EntrySpec, OutputSpec};
use crate::error::{ConfigError, Result};
use crate::paths::PathResolver;
use crate::policy::BuildPolicy;
use crate::transforms::{StandardTransforms, Transform};

pub const MANIFEST_FILE: &str = "mdc-bundle.toml";
pub const PACKAGE_JSON_FIELD: &str = "mdcBundle";
pub const ENV_PREFIX: &str = "MDC_BUNDLE_";

/// Parsed bundle manifest
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BundleManifest {
    #[serde(default)]
    pub policy: BuildPolicy,

    /// Replaces the standard copyright banner
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub banner: Option<String>,

    #[serde(default)]
    pub bundles: Vec<BundleEntry>,
}

/// Which constructor builds a manifest entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BundleKind {
    MainScript,
    MainStyle,
    Script,
    Style,
}

impl BundleKind {
    pub fn is_main(self) -> bool {
        matches!(self, Self::MainScript | Self::MainStyle)
    }
}

/// One `[[bundles]]` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BundleEntry {
    pub kind: BundleKind,

    /// Required for custom bundles; renames a main bundle
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Required for custom bundles, rejected for main bundles
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chunks: Option<ChunkSource>,

    pub output: ManifestOutput,

    /// Extra plugins appended after the builder's own
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub plugins: Vec<Transform>,
}

/// Where a custom bundle's entry points come from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged, deny_unknown_fields)]
pub enum ChunkSource {
    /// A single entry file
    Path { path: String },
    /// Every file matching a glob, named by [`crate::globber::discover_chunks`]
    Glob {
        glob: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        remove_prefix: Option<String>,
    },
    /// Explicitly named entry files
    Entries { entries: IndexMap<String, String> },
}

impl ChunkSource {
    fn resolve(&self, builder: &BundleBuilder) -> Result<EntrySpec> {
        match self {
            Self::Path { path } => Ok(builder.resolver().absolute_path(path)?.into()),
            Self::Glob {
                glob,
                remove_prefix,
            } => Ok(builder
                .discover_chunks(glob, remove_prefix.as_deref())?
                .into()),
            Self::Entries { entries } => {
                let mut resolved = IndexMap::with_capacity(entries.len());
                for (name, path) in entries {
                    resolved.insert(name.clone(), builder.resolver().absolute_path(path)?);
                }
                Ok(resolved.into())
            }
        }
    }
}

/// Manifest form of [`OutputSpec`], with a root-relative `fs_dir`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ManifestOutput {
    pub fs_dir: String,
    pub http_dir: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename_pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub library: Option<String>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub extra: IndexMap<String, Value>,
}

impl ManifestOutput {
    fn resolve(&self, resolver: &dyn PathResolver, index: usize) -> Result<OutputSpec> {
        if self.fs_dir.trim().is_empty() {
            return Err(ConfigError::missing(
                format!("bundles[{index}].output.fs_dir"),
                "Set the root-relative directory the bundle is written into",
            ));
        }

        Ok(OutputSpec {
            fs_dir: resolver.absolute_path(&self.fs_dir)?,
            http_dir: self.http_dir.clone(),
            filename_pattern: self.filename_pattern.clone(),
            library: self.library.clone(),
            extra: self.extra.clone(),
        })
    }
}

impl BundleEntry {
    fn build(&self, builder: &BundleBuilder, index: usize) -> Result<BundleConfig> {
        let output = self.output.resolve(builder.resolver(), index)?;
        let plugins = self.plugins.iter().cloned().map(Arc::new);

        if self.kind.is_main() {
            if self.chunks.is_some() {
                return Err(ConfigError::invalid(
                    format!("bundles[{index}].chunks"),
                    "Main bundles have fixed entry points; remove `chunks` or use kind \"script\"/\"style\"",
                ));
            }

            if self.name.as_deref().is_some_and(|name| name.trim().is_empty()) {
                return Err(ConfigError::missing(
                    format!("bundles[{index}].name"),
                    "Remove `name` to keep the default bundle name, or give it a value",
                ));
            }

            let mut config = match self.kind {
                BundleKind::MainScript => builder.main_script_bundle(output)?,
                _ => builder.main_style_bundle(output)?,
            };
            if let Some(name) = &self.name {
                config.name.clone_from(name);
            }
            config.plugins.extend(plugins);
            return Ok(config);
        }

        let name = self.name.as_deref().ok_or_else(|| {
            ConfigError::missing(
                format!("bundles[{index}].name"),
                "Custom bundles need a name",
            )
        })?;
        let chunks = self.chunks.as_ref().ok_or_else(|| {
            ConfigError::missing(
                format!("bundles[{index}].chunks"),
                "Custom bundles need `chunks` as { path }, { glob } or { entries }",
            )
        })?;

        let mut spec = BundleSpec::new(name, chunks.resolve(builder)?, output);
        spec.transforms.extend(plugins);

        match self.kind {
            BundleKind::Script => builder.custom_script_bundle(spec),
            _ => builder.custom_style_bundle(spec),
        }
    }
}

impl BundleManifest {
    /// Load a manifest file (TOML, or JSON by `.json` extension) layered
    /// under `MDC_BUNDLE_` environment overrides.
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(ConfigError::NotFound);
        }

        let figment = Figment::from(Serialized::defaults(Self::default()));
        let figment = if path.extension().is_some_and(|ext| ext == "json") {
            figment.merge(Json::file(path))
        } else {
            figment.merge(Toml::file(path))
        };

        Self::extract(figment)
    }

    /// Load the manifest embedded in a `package.json` under `mdcBundle`.
    pub fn from_package_json(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let parsed: Value = serde_json::from_str(&content)
            .map_err(|e| ConfigError::invalid("package.json", format!("Invalid JSON: {e}")))?;

        let manifest = match parsed.get(PACKAGE_JSON_FIELD) {
            Some(value) if !value.is_null() => value.clone(),
            _ => {
                return Err(ConfigError::invalid(
                    PACKAGE_JSON_FIELD,
                    format!("Add a '{PACKAGE_JSON_FIELD}' object to your package.json"),
                ));
            }
        };

        let figment = Figment::from(Serialized::defaults(Self::default()))
            .merge(Serialized::defaults(manifest));
        Self::extract(figment)
    }

    fn extract(figment: Figment) -> Result<Self> {
        figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .map_err(|e| {
                let field = if e.path.is_empty() {
                    "manifest".to_string()
                } else {
                    e.path.join(".")
                };
                ConfigError::invalid(field, e.to_string())
            })
    }

    /// A builder rooted at `resolver` carrying this manifest's policy and banner.
    pub fn builder(&self, resolver: impl PathResolver + 'static) -> BundleBuilder {
        let builder = BundleBuilder::new(resolver).with_policy(self.policy);
        match &self.banner {
            Some(banner) => builder.with_transforms(StandardTransforms::with_banner(banner)),
            None => builder,
        }
    }

    /// Build every listed bundle, in manifest order.
    pub fn build_all(&self, builder: &BundleBuilder) -> Result<Vec<BundleConfig>> {
        self.bundles
            .iter()
            .enumerate()
            .map(|(index, entry)| entry.build(builder, index))
            .collect()
    }
}

/// Finds and loads the bundle manifest of a project.
#[derive(Debug, Clone)]
pub struct ManifestDiscovery {
    root: PathBuf,
}

impl ManifestDiscovery {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Locate the manifest.
    ///
    /// Searches in this order:
    /// 1. `mdc-bundle.toml`
    /// 2. `package.json` with an `mdcBundle` field
    pub fn find(&self) -> Option<PathBuf> {
        let toml_path = self.root.join(MANIFEST_FILE);
        if toml_path.is_file() {
            return Some(toml_path);
        }

        let pkg_path = self.root.join("package.json");
        let content = fs::read_to_string(&pkg_path).ok()?;
        let parsed: Value = serde_json::from_str(&content).ok()?;
        parsed
            .get(PACKAGE_JSON_FIELD)
            .is_some_and(|field| !field.is_null())
            .then_some(pkg_path)
    }

    /// Load the discovered manifest.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotFound`] if the project has no manifest.
    pub fn load(&self) -> Result<BundleManifest> {
        let path = self.find().ok_or(ConfigError::NotFound)?;
        self.load_from(&path)
    }

    /// Load a manifest from an explicit path.
    pub fn load_from(&self, path: &Path) -> Result<BundleManifest> {
        tracing::info!(path = %path.display(), "loading bundle manifest");

        let manifest = if path.file_name().is_some_and(|name| name == "package.json") {
            BundleManifest::from_package_json(path)?
        } else {
            BundleManifest::from_file(path)?
        };

        tracing::debug!(bundles = manifest.bundles.len(), "bundle manifest loaded");
        Ok(manifest)
    }
}
