use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::json;

use crate::bundle::output::{OutputConfig, OutputSpec};
use crate::bundle::types::{
    DevServerOptions, FilePattern, LibraryTarget, LoaderSpec, ModuleOptions, ModuleRule, RuleUse,
};
use crate::bundle::{BundleBuilder, BundleConfig, BundleSpec};
use crate::error::Result;

pub const MAIN_SCRIPT_BUNDLE: &str = "main-js";
pub const MAIN_SCRIPT_ENTRY: &str = "/packages/material-components-web/index.js";
pub const MAIN_SCRIPT_FILENAME: &str = "material-components-web.js";
pub const MAIN_SCRIPT_LIBRARY: &str = "mdc";

const DEFAULT_FILENAME_PATTERN: &str = "[name].js";

static SCRIPT_SOURCE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\.js$").expect("valid regex"));
static THIRD_PARTY: Lazy<Regex> = Lazy::new(|| Regex::new("node_modules").expect("valid regex"));

impl BundleBuilder {
    /// The library's all-in-one script bundle.
    ///
    /// Filename defaults to `material-components-web.js` and the UMD export
    /// to `mdc`; anything set on `output` wins.
    pub fn main_script_bundle(&self, output: OutputSpec) -> Result<BundleConfig> {
        let entry = self.resolver().absolute_path(MAIN_SCRIPT_ENTRY)?;
        let output = OutputSpec {
            filename_pattern: output
                .filename_pattern
                .or_else(|| Some(MAIN_SCRIPT_FILENAME.to_string())),
            library: output.library.or_else(|| Some(MAIN_SCRIPT_LIBRARY.to_string())),
            ..output
        };

        self.custom_script_bundle(BundleSpec::new(MAIN_SCRIPT_BUNDLE, entry, output))
    }

    /// A UMD script bundle over caller-chosen entries.
    pub fn custom_script_bundle(&self, spec: BundleSpec) -> Result<BundleConfig> {
        spec.validate()?;

        let BundleSpec {
            bundle_name,
            chunks,
            output,
            transforms,
        } = spec;

        let filename = output
            .filename_pattern
            .clone()
            .unwrap_or_else(|| DEFAULT_FILENAME_PATTERN.to_string());
        let resolved = OutputConfig::new(&output, filename)
            .with_library_target(LibraryTarget::Umd)
            .apply_overrides(&output.extra)?;

        let mut plugins = Vec::with_capacity(transforms.len() + 1);
        plugins.push(self.banner());
        plugins.extend(transforms);

        tracing::debug!(
            bundle = %bundle_name,
            entries = chunks.len(),
            "built script bundle config"
        );

        Ok(BundleConfig {
            name: bundle_name,
            entry: chunks,
            output: resolved,
            dev_server: Some(DevServerOptions {
                disable_host_check: true,
            }),
            devtool: self.policy().script_devtool(),
            module: ModuleOptions {
                rules: vec![script_rule()],
            },
            plugins,
        })
    }
}

fn script_rule() -> ModuleRule {
    ModuleRule {
        test: FilePattern::new(SCRIPT_SOURCE.clone()),
        exclude: Some(FilePattern::new(THIRD_PARTY.clone())),
        uses: RuleUse::Loaders(vec![LoaderSpec::new(
            "babel-loader",
            json!({ "cacheDirectory": true }),
        )]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundle::{Devtool, EntrySpec};
    use crate::paths::ProjectRoot;
    use crate::policy::BuildPolicy;
    use crate::transforms::Transform;
    use indexmap::IndexMap;
    use std::path::PathBuf;
    use std::sync::Arc;

    fn builder() -> BundleBuilder {
        BundleBuilder::new(ProjectRoot::new("/project"))
    }

    fn output() -> OutputSpec {
        OutputSpec::new("/project/build", "/assets/")
    }

    #[test]
    fn main_bundle_defaults() {
        let config = builder().main_script_bundle(output()).unwrap();

        assert_eq!(config.name, "main-js");
        assert_eq!(
            config.entry,
            EntrySpec::from(PathBuf::from("/project/packages/material-components-web/index.js"))
        );
        assert_eq!(config.output.filename, "material-components-web.js");
        assert_eq!(config.output.library.as_deref(), Some("mdc"));
        assert_eq!(config.output.library_target, Some(LibraryTarget::Umd));
        assert_eq!(config.output.path, PathBuf::from("/project/build"));
        assert_eq!(config.output.public_path, "/assets/");
    }

    #[test]
    fn main_bundle_caller_values_win() {
        let config = builder()
            .main_script_bundle(
                output()
                    .with_filename_pattern("mdc.min.js")
                    .with_library("material"),
            )
            .unwrap();

        assert_eq!(config.output.filename, "mdc.min.js");
        assert_eq!(config.output.library.as_deref(), Some("material"));
    }

    #[test]
    fn custom_bundle_passes_entries_through() {
        let mut chunks = IndexMap::new();
        chunks.insert("foo/bar".to_string(), PathBuf::from("/project/test/foo/bar.js"));
        let spec = BundleSpec::new("screenshot-js", chunks.clone(), output());

        let config = builder().custom_script_bundle(spec).unwrap();

        assert_eq!(config.name, "screenshot-js");
        assert_eq!(config.entry, EntrySpec::from(chunks));
        assert_eq!(config.output.filename, "[name].js");
        assert!(config.output.library.is_none());
    }

    #[test]
    fn banner_comes_first_then_caller_transforms() {
        let stats = Arc::new(Transform::named("stats"));
        let spec = BundleSpec::new("x", PathBuf::from("/project/x.js"), output())
            .with_transform(stats.clone())
            .with_transform(Transform::named("analyzer"));

        let config = builder().custom_script_bundle(spec).unwrap();

        let names: Vec<_> = config.plugins.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["banner", "stats", "analyzer"]);
        assert!(Arc::ptr_eq(&config.plugins[1], &stats));
    }

    #[test]
    fn single_babel_rule_skips_third_party_code() {
        let config = builder().main_script_bundle(output()).unwrap();

        assert_eq!(config.module.rules.len(), 1);
        let rule = &config.module.rules[0];
        assert_eq!(rule.uses.loader_names(), ["babel-loader"]);
        assert!(rule.applies_to("/project/packages/mdc-ripple/index.js"));
        assert!(!rule.applies_to("/project/node_modules/focus-trap/index.js"));

        let RuleUse::Loaders(loaders) = &rule.uses else {
            panic!("script rule should be a plain loader chain");
        };
        assert_eq!(loaders[0].options["cacheDirectory"], true);
    }

    #[test]
    fn host_check_is_disabled() {
        let config = builder().main_script_bundle(output()).unwrap();
        let value = serde_json::to_value(&config).unwrap();
        assert_eq!(value["devServer"]["disableHostCheck"], true);
    }

    #[test]
    fn devtool_follows_policy() {
        let config = builder().main_script_bundle(output()).unwrap();
        assert_eq!(config.devtool, Devtool::SourceMap);

        let config = builder()
            .with_policy(BuildPolicy {
                script_source_maps: false,
                ..BuildPolicy::default()
            })
            .main_script_bundle(output())
            .unwrap();
        assert_eq!(config.devtool, Devtool::Disabled);
    }

    #[test]
    fn missing_bundle_name_fails_fast() {
        let spec = BundleSpec::new("", PathBuf::from("/project/x.js"), output());
        let err = builder().custom_script_bundle(spec).unwrap_err();
        assert_eq!(err.field(), Some("bundle_name"));
    }
}
