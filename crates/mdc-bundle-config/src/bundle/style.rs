use std::sync::Arc;

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::json;

use crate::bundle::output::{OutputConfig, OutputSpec};
use crate::bundle::types::{ExtractLoader, FilePattern, LoaderSpec, ModuleOptions, ModuleRule, RuleUse};
use crate::bundle::{BundleBuilder, BundleConfig, BundleSpec};
use crate::error::Result;
use crate::globber;
use crate::transforms::Transform;

pub const MAIN_STYLE_BUNDLE: &str = "main-css";

/// Directories handed to the Sass compiler as include paths.
pub const SASS_INCLUDE_PATTERN: &str = "/packages/*/node_modules";

/// Entries of the all-in-one stylesheet, chunk name to root-relative source.
pub const MAIN_STYLE_ENTRIES: &[(&str, &str)] = &[
    ("mdc.button", "/packages/mdc-button/mdc-button.scss"),
    ("mdc.card", "/packages/mdc-card/mdc-card.scss"),
    ("mdc.checkbox", "/packages/mdc-checkbox/mdc-checkbox.scss"),
    ("mdc.dialog", "/packages/mdc-dialog/mdc-dialog.scss"),
    ("mdc.drawer", "/packages/mdc-drawer/mdc-drawer.scss"),
    ("mdc.elevation", "/packages/mdc-elevation/mdc-elevation.scss"),
    ("mdc.fab", "/packages/mdc-fab/mdc-fab.scss"),
    ("mdc.form-field", "/packages/mdc-form-field/mdc-form-field.scss"),
    ("mdc.grid-list", "/packages/mdc-grid-list/mdc-grid-list.scss"),
    ("mdc.icon-toggle", "/packages/mdc-icon-toggle/mdc-icon-toggle.scss"),
    ("mdc.layout-grid", "/packages/mdc-layout-grid/mdc-layout-grid.scss"),
    ("mdc.linear-progress", "/packages/mdc-linear-progress/mdc-linear-progress.scss"),
    ("mdc.list", "/packages/mdc-list/mdc-list.scss"),
    ("mdc.menu", "/packages/mdc-menu/mdc-menu.scss"),
    ("mdc.radio", "/packages/mdc-radio/mdc-radio.scss"),
    ("mdc.ripple", "/packages/mdc-ripple/mdc-ripple.scss"),
    ("mdc.select", "/packages/mdc-select/mdc-select.scss"),
    ("mdc.slider", "/packages/mdc-slider/mdc-slider.scss"),
    ("mdc.snackbar", "/packages/mdc-snackbar/mdc-snackbar.scss"),
    ("mdc.switch", "/packages/mdc-switch/mdc-switch.scss"),
    ("mdc.tabs", "/packages/mdc-tabs/mdc-tabs.scss"),
    ("mdc.textfield", "/packages/mdc-textfield/mdc-text-field.scss"),
    ("mdc.theme", "/packages/mdc-theme/mdc-theme.scss"),
    ("mdc.toolbar", "/packages/mdc-toolbar/mdc-toolbar.scss"),
    ("mdc.typography", "/packages/mdc-typography/mdc-typography.scss"),
];

const DEFAULT_FILENAME_PATTERN: &str = "[name].css";

static STYLE_SOURCE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\.scss$").expect("valid regex"));

impl BundleBuilder {
    /// The library's all-in-one stylesheet bundle, one chunk per component.
    pub fn main_style_bundle(&self, output: OutputSpec) -> Result<BundleConfig> {
        let mut chunks = IndexMap::with_capacity(MAIN_STYLE_ENTRIES.len());
        for (name, source) in MAIN_STYLE_ENTRIES {
            chunks.insert((*name).to_string(), self.resolver().absolute_path(source)?);
        }

        self.custom_style_bundle(BundleSpec::new(MAIN_STYLE_BUNDLE, chunks, output))
    }

    /// A stylesheet bundle over caller-chosen entries.
    ///
    /// The bundler compiles each entry to a throwaway `<pattern>.js` file and
    /// the extraction transform writes the real stylesheet under
    /// `filename_pattern`. The cleanup transform removes the throwaway files.
    pub fn custom_style_bundle(&self, spec: BundleSpec) -> Result<BundleConfig> {
        spec.validate()?;

        let BundleSpec {
            bundle_name,
            chunks,
            output,
            transforms,
        } = spec;

        let pattern = output
            .filename_pattern
            .clone()
            .unwrap_or_else(|| DEFAULT_FILENAME_PATTERN.to_string());
        let extractor = Arc::new(self.transforms.style_extraction(&pattern));

        let resolved = OutputConfig::new(&output, format!("{pattern}.js"))
            .apply_overrides(&output.extra)?;

        let rule = self.style_rule(Arc::clone(&extractor))?;

        let mut plugins = Vec::with_capacity(transforms.len() + 3);
        plugins.push(extractor);
        plugins.push(Arc::new(self.transforms.style_cleanup(&output.fs_dir)));
        plugins.push(self.banner());
        plugins.extend(transforms);

        tracing::debug!(
            bundle = %bundle_name,
            entries = chunks.len(),
            "built style bundle config"
        );

        Ok(BundleConfig {
            name: bundle_name,
            entry: chunks,
            output: resolved,
            dev_server: None,
            devtool: self.policy().style_devtool(),
            module: ModuleOptions { rules: vec![rule] },
            plugins,
        })
    }

    fn style_rule(&self, extractor: Arc<Transform>) -> Result<ModuleRule> {
        let source_map = self.policy().style_source_maps;
        let include_paths = self.sass_include_paths()?;

        Ok(ModuleRule {
            test: FilePattern::new(STYLE_SOURCE.clone()),
            exclude: None,
            uses: RuleUse::Extract(ExtractLoader {
                extractor,
                fallback: "style-loader".to_string(),
                loaders: vec![
                    LoaderSpec::new("css-loader", json!({ "sourceMap": source_map })),
                    LoaderSpec::new(
                        "postcss-loader",
                        json!({
                            "sourceMap": source_map,
                            "plugins": [{ "name": "autoprefixer", "options": { "grid": false } }],
                        }),
                    ),
                    LoaderSpec::new(
                        "sass-loader",
                        json!({
                            "sourceMap": source_map,
                            "includePaths": include_paths,
                        }),
                    ),
                ],
            }),
        })
    }

    /// Every package's `node_modules`, so component styles can import their
    /// dependencies' Sass without a path prefix.
    fn sass_include_paths(&self) -> Result<Vec<String>> {
        let pattern = self.resolver().absolute_path(SASS_INCLUDE_PATTERN)?;
        let paths: Vec<String> = globber::glob_paths(&pattern)?
            .into_iter()
            .map(|path| path.to_string_lossy().into_owned())
            .collect();

        tracing::debug!(count = paths.len(), "discovered sass include paths");
        Ok(paths)
    }
}
