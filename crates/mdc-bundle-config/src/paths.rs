//! Project-root-relative path resolution.
//!
//! Every path a bundle manifest or builder mentions is written relative to a
//! single project root, with or without a leading `/` (`/packages/foo` and
//! `packages/foo` name the same file). The resolver turns those into absolute
//! paths and maps absolute paths back to `/`-separated relative strings.

use std::path::{Component, Path, PathBuf};

use path_clean::PathClean;

use crate::error::{ConfigError, Result};

/// Resolves paths against a fixed project root.
pub trait PathResolver: Send + Sync {
    /// The root every relative path is resolved against.
    fn root(&self) -> &Path;

    /// Resolve a project-root-relative path (or glob pattern) to an absolute path.
    fn absolute_path(&self, project_relative: &str) -> Result<PathBuf>;

    /// Express an absolute path relative to the project root, using `/` separators.
    fn relative_path(&self, absolute: &Path) -> Result<String>;
}

/// [`PathResolver`] rooted at a directory on the local filesystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRoot {
    root: PathBuf,
}

impl ProjectRoot {
    /// `root` should already be absolute; it is only cleaned here.
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf().clean(),
        }
    }

    /// Root the resolver at the process working directory.
    pub fn from_current_dir() -> Result<Self> {
        Ok(Self::new(std::env::current_dir()?))
    }
}

impl PathResolver for ProjectRoot {
    fn root(&self) -> &Path {
        &self.root
    }

    fn absolute_path(&self, project_relative: &str) -> Result<PathBuf> {
        let trimmed = project_relative.trim_start_matches(['/', '\\']);
        let absolute = self.root.join(trimmed).clean();

        if !absolute.starts_with(&self.root) {
            return Err(ConfigError::OutsideRoot {
                path: absolute,
                root: self.root.clone(),
            });
        }

        Ok(absolute)
    }

    fn relative_path(&self, absolute: &Path) -> Result<String> {
        let cleaned = absolute.to_path_buf().clean();
        let relative = cleaned
            .strip_prefix(&self.root)
            .map_err(|_| ConfigError::OutsideRoot {
                path: cleaned.clone(),
                root: self.root.clone(),
            })?;

        let parts: Vec<_> = relative
            .components()
            .filter_map(|component| match component {
                Component::Normal(part) => Some(part.to_string_lossy()),
                _ => None,
            })
            .collect();

        Ok(parts.join("/"))
    }
}
