//! `mdc-bundle generate`

use std::fs;

use mdc_bundle_config::{ConfigError, ManifestDiscovery, ProjectRoot};

use crate::cli::GenerateArgs;
use crate::commands::project_root;
use crate::error::{CliError, Result};
use crate::ui;

/// Load the manifest, build every bundle and write the configurations.
///
/// # Errors
///
/// Fails when no manifest is found, a bundle entry is invalid, or the
/// output cannot be written.
pub fn execute(args: GenerateArgs) -> Result<()> {
    let root = project_root(args.root.as_deref())?;
    let discovery = ManifestDiscovery::new(&root);

    let manifest = match &args.manifest {
        Some(path) => discovery.load_from(path),
        None => discovery.load(),
    }
    .map_err(|err| match err {
        ConfigError::NotFound => match &args.manifest {
            Some(path) => CliError::ManifestNotFound(path.clone()),
            None => CliError::ManifestNotFound(root.clone()),
        },
        other => other.into(),
    })?;

    let builder = manifest.builder(ProjectRoot::new(&root));
    let configs = manifest.build_all(&builder)?;
    tracing::info!(bundles = configs.len(), "generated bundle configurations");

    let mut json = if args.compact {
        serde_json::to_string(&configs)?
    } else {
        serde_json::to_string_pretty(&configs)?
    };
    json.push('\n');

    match &args.out {
        Some(path) => {
            fs::write(path, json).map_err(|source| CliError::Write {
                path: path.clone(),
                source,
            })?;
            ui::success(&format!(
                "Wrote {} bundle configuration(s) to {}",
                configs.len(),
                path.display()
            ));
        }
        None => print!("{json}"),
    }

    Ok(())
}
