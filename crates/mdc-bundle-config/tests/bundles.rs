//! Behaviour shared by all four bundle constructors.

use std::path::PathBuf;

use indexmap::IndexMap;
use mdc_bundle_config::{BundleBuilder, BundleConfig, BundleSpec, OutputSpec, ProjectRoot, Result};

fn builder() -> BundleBuilder {
    BundleBuilder::new(ProjectRoot::new("/project"))
}

fn chunks(ext: &str) -> IndexMap<String, PathBuf> {
    let mut chunks = IndexMap::new();
    chunks.insert("a".to_string(), PathBuf::from(format!("/project/test/a.{ext}")));
    chunks.insert("b/c".to_string(), PathBuf::from(format!("/project/test/b/c.{ext}")));
    chunks
}

type Constructor = fn(&BundleBuilder, OutputSpec) -> Result<BundleConfig>;

fn custom_script(builder: &BundleBuilder, output: OutputSpec) -> Result<BundleConfig> {
    builder.custom_script_bundle(BundleSpec::new("custom-js", chunks("js"), output))
}

fn custom_style(builder: &BundleBuilder, output: OutputSpec) -> Result<BundleConfig> {
    builder.custom_style_bundle(BundleSpec::new("custom-css", chunks("scss"), output))
}

fn constructors() -> Vec<(&'static str, Constructor)> {
    vec![
        ("main script", BundleBuilder::main_script_bundle as Constructor),
        ("main style", BundleBuilder::main_style_bundle as Constructor),
        ("custom script", custom_script as Constructor),
        ("custom style", custom_style as Constructor),
    ]
}

#[test]
fn identical_inputs_give_identical_configs() {
    let builder = builder();
    for (label, build) in constructors() {
        let output = || OutputSpec::new("/project/build", "/assets/");
        let first = build(&builder, output()).unwrap();
        let second = build(&builder, output()).unwrap();
        assert_eq!(first, second, "{label}");
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap(),
            "{label}"
        );
    }
}

#[test]
fn caller_output_overrides_win_everywhere() {
    let builder = builder();
    for (label, build) in constructors() {
        let output = OutputSpec::new("/project/build", "/assets/")
            .with_extra("publicPath", "/cdn/")
            .with_extra("filename", "fixed.out")
            .with_extra("pathinfo", true);
        let config = build(&builder, output).unwrap();

        assert_eq!(config.output.public_path, "/cdn/", "{label}");
        assert_eq!(config.output.filename, "fixed.out", "{label}");

        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["output"]["pathinfo"], true, "{label}");
    }
}

#[test]
fn every_bundle_carries_the_banner() {
    let builder = builder();
    for (label, build) in constructors() {
        let config = build(&builder, OutputSpec::new("/project/build", "/assets/")).unwrap();
        assert!(config.plugin_index("banner").is_some(), "{label}");
    }
}

#[test]
fn custom_script_shape_matches_bundler_schema() {
    let spec = BundleSpec::new("custom-js", chunks("js"), OutputSpec::new("/project/build", "/js/"));
    let json = serde_json::to_value(builder().custom_script_bundle(spec).unwrap()).unwrap();

    assert_eq!(json["name"], "custom-js");
    assert_eq!(json["entry"]["b/c"], "/project/test/b/c.js");
    assert_eq!(json["output"]["path"], "/project/build");
    assert_eq!(json["output"]["publicPath"], "/js/");
    assert_eq!(json["output"]["filename"], "[name].js");
    assert_eq!(json["output"]["libraryTarget"], "umd");
    assert!(json["output"].get("library").is_none());
    assert_eq!(json["devtool"], "source-map");
    assert_eq!(json["module"]["rules"][0]["test"], r"\.js$");
    assert_eq!(json["module"]["rules"][0]["exclude"], "node_modules");
    assert_eq!(json["module"]["rules"][0]["use"][0]["loader"], "babel-loader");
    assert_eq!(json["plugins"][0]["name"], "banner");
}

#[test]
fn custom_style_shape_matches_bundler_schema() {
    let spec = BundleSpec::new("custom-css", chunks("scss"), OutputSpec::new("/project/build", "/css/"));
    let json = serde_json::to_value(builder().custom_style_bundle(spec).unwrap()).unwrap();

    assert_eq!(json["output"]["filename"], "[name].css.js");
    assert!(json["output"].get("libraryTarget").is_none());
    assert!(json.get("devServer").is_none());

    let rule = &json["module"]["rules"][0];
    assert_eq!(rule["test"], r"\.scss$");
    assert_eq!(rule["use"]["fallback"], "style-loader");
    assert_eq!(rule["use"]["extractor"]["name"], "extract-text");
    assert_eq!(rule["use"]["use"][2]["loader"], "sass-loader");

    let plugins: Vec<_> = json["plugins"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(plugins, ["extract-text", "css-js-cleanup", "banner"]);
}

#[test]
fn relative_fs_dir_is_rejected() {
    let spec = BundleSpec::new("x", chunks("js"), OutputSpec::new("build", "/assets/"));
    let err = builder().custom_script_bundle(spec).unwrap_err();
    assert_eq!(err.field(), Some("output.fs_dir"));
}
