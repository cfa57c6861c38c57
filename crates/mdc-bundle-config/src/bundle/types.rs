use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use indexmap::IndexMap;
use regex::Regex;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

use crate::transforms::Transform;

/// Entry points of a bundle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntrySpec {
    /// One implicit entry
    Single(PathBuf),
    /// Named entries, in insertion order
    Named(IndexMap<String, PathBuf>),
}

impl EntrySpec {
    pub fn len(&self) -> usize {
        match self {
            Self::Single(path) if path.as_os_str().is_empty() => 0,
            Self::Single(_) => 1,
            Self::Named(entries) => entries.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Source paths of every entry, in order.
    pub fn paths(&self) -> Vec<&PathBuf> {
        match self {
            Self::Single(path) => vec![path],
            Self::Named(entries) => entries.values().collect(),
        }
    }
}

impl From<PathBuf> for EntrySpec {
    fn from(path: PathBuf) -> Self {
        Self::Single(path)
    }
}

impl From<IndexMap<String, PathBuf>> for EntrySpec {
    fn from(entries: IndexMap<String, PathBuf>) -> Self {
        Self::Named(entries)
    }
}

/// Source map policy emitted as the bundler's `devtool` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Devtool {
    /// External `.map` files (`"source-map"`)
    #[default]
    SourceMap,
    /// No source maps (`false`)
    Disabled,
}

impl Devtool {
    pub fn from_enabled(enabled: bool) -> Self {
        if enabled { Self::SourceMap } else { Self::Disabled }
    }

    pub fn is_enabled(self) -> bool {
        matches!(self, Self::SourceMap)
    }
}

impl Serialize for Devtool {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::SourceMap => serializer.serialize_str("source-map"),
            Self::Disabled => serializer.serialize_bool(false),
        }
    }
}

/// Module format of an emitted library
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LibraryTarget {
    Var,
    Assign,
    This,
    Window,
    Global,
    Commonjs,
    Commonjs2,
    Amd,
    /// Universal module definition (default for script bundles)
    Umd,
    Umd2,
    Jsonp,
}

/// Regular expression a module rule matches file paths against.
#[derive(Clone)]
pub struct FilePattern(Regex);

impl FilePattern {
    pub fn new(regex: Regex) -> Self {
        Self(regex)
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn is_match(&self, path: &str) -> bool {
        self.0.is_match(path)
    }
}

impl fmt::Debug for FilePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/", self.as_str())
    }
}

impl PartialEq for FilePattern {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Serialize for FilePattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// One loader with its options
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoaderSpec {
    pub loader: String,
    #[serde(skip_serializing_if = "Value::is_null")]
    pub options: Value,
}

impl LoaderSpec {
    pub fn new(loader: impl Into<String>, options: Value) -> Self {
        Self {
            loader: loader.into(),
            options,
        }
    }
}

/// Loader chain wrapped by a stylesheet extraction transform.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractLoader {
    /// The extraction transform; the same instance sits in the plugin list
    pub extractor: Arc<Transform>,
    /// Loader used when the stylesheet is not extracted
    pub fallback: String,
    #[serde(rename = "use")]
    pub loaders: Vec<LoaderSpec>,
}

/// What a module rule does with matching files
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RuleUse {
    /// Plain loader chain, applied last to first
    Loaders(Vec<LoaderSpec>),
    /// Loader chain routed through an extraction transform
    Extract(ExtractLoader),
}

impl RuleUse {
    /// Loader names in declaration order, extraction wrapper excluded.
    pub fn loader_names(&self) -> Vec<&str> {
        let loaders = match self {
            Self::Loaders(loaders) => loaders,
            Self::Extract(extract) => &extract.loaders,
        };
        loaders.iter().map(|l| l.loader.as_str()).collect()
    }
}

/// A file-pattern match paired with the transforms applied to matching files.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModuleRule {
    pub test: FilePattern,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude: Option<FilePattern>,
    #[serde(rename = "use")]
    pub uses: RuleUse,
}

impl ModuleRule {
    /// Whether a module at `path` is routed through this rule.
    pub fn applies_to(&self, path: &str) -> bool {
        self.test.is_match(path) && !self.exclude.as_ref().is_some_and(|ex| ex.is_match(path))
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ModuleOptions {
    pub rules: Vec<ModuleRule>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DevServerOptions {
    pub disable_host_check: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn devtool_serializes_as_string_or_false() {
        assert_eq!(serde_json::to_value(Devtool::SourceMap).unwrap(), json!("source-map"));
        assert_eq!(serde_json::to_value(Devtool::Disabled).unwrap(), json!(false));
    }

    #[test]
    fn entry_spec_is_untagged() {
        let single = EntrySpec::Single(PathBuf::from("/p/index.js"));
        assert_eq!(serde_json::to_value(&single).unwrap(), json!("/p/index.js"));

        let mut named = IndexMap::new();
        named.insert("b".to_string(), PathBuf::from("/p/b.js"));
        named.insert("a".to_string(), PathBuf::from("/p/a.js"));
        let value = serde_json::to_string(&EntrySpec::Named(named)).unwrap();
        assert_eq!(value, r#"{"b":"/p/b.js","a":"/p/a.js"}"#);
    }

    #[test]
    fn empty_single_entry_counts_as_empty() {
        assert!(EntrySpec::Single(PathBuf::new()).is_empty());
        assert!(EntrySpec::Named(IndexMap::new()).is_empty());
        assert_eq!(EntrySpec::Single(PathBuf::from("/a.js")).len(), 1);
    }

    #[test]
    fn rule_exclusion() {
        let rule = ModuleRule {
            test: FilePattern::new(Regex::new(r"\.js$").unwrap()),
            exclude: Some(FilePattern::new(Regex::new("node_modules").unwrap())),
            uses: RuleUse::Loaders(vec![]),
        };
        assert!(rule.applies_to("/p/packages/mdc-ripple/index.js"));
        assert!(!rule.applies_to("/p/node_modules/foo/index.js"));
        assert!(!rule.applies_to("/p/packages/mdc-ripple/mdc-ripple.scss"));
    }

    #[test]
    fn library_target_names() {
        assert_eq!(serde_json::to_value(LibraryTarget::Umd).unwrap(), json!("umd"));
        assert_eq!(
            serde_json::to_value(LibraryTarget::Commonjs2).unwrap(),
            json!("commonjs2")
        );
    }
}
