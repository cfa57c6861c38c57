//! Subcommand implementations, one `execute` per module.

pub mod chunks;
pub mod generate;

pub use chunks::execute as chunks_execute;
pub use generate::execute as generate_execute;

use std::path::{Path, PathBuf};

use path_clean::PathClean;

use crate::error::Result;

/// The `--root` argument resolved against the working directory, or the
/// working directory itself.
pub(crate) fn project_root(root: Option<&Path>) -> Result<PathBuf> {
    let cwd = std::env::current_dir()?;
    Ok(match root {
        Some(root) => resolve_path(root, &cwd),
        None => cwd,
    })
}

/// Absolute paths are kept, relative ones are joined onto `cwd`.
pub(crate) fn resolve_path(path: &Path, cwd: &Path) -> PathBuf {
    if path.is_absolute() {
        path.clean()
    } else {
        cwd.join(path).clean()
    }
}
