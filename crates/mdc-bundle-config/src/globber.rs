//! Entry point discovery by glob.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{ConfigError, Result};
use crate::paths::PathResolver;

static FILE_EXTENSION: Lazy<Regex> = Lazy::new(|| Regex::new(r"\.[A-Za-z0-9_]+$").expect("valid regex"));

/// Map every file matching a project-root-relative glob to a chunk name.
///
/// The chunk name is the file's root-relative path minus its last extension,
/// with `remove_chunk_name_prefix` stripped from the front when present.
/// Files whose basename starts with `_` (stylesheet partials) are skipped.
///
/// Two files that reduce to the same name (`foo.js` and `foo.scss`) collide;
/// the one matched later wins.
pub fn discover_chunks(
    resolver: &dyn PathResolver,
    input_path_pattern: &str,
    remove_chunk_name_prefix: Option<&str>,
) -> Result<IndexMap<String, PathBuf>> {
    let pattern = resolver.absolute_path(input_path_pattern)?;
    let prefix = remove_chunk_name_prefix.unwrap_or_default();

    let mut chunks = IndexMap::new();
    for path in glob_paths(&pattern)? {
        if path.is_dir() || is_partial(&path) {
            continue;
        }

        let relative = resolver.relative_path(&path)?;
        let stem = FILE_EXTENSION.replace(&relative, "");
        let name = stem.strip_prefix(prefix).unwrap_or(&stem);

        if let Some(previous) = chunks.insert(name.to_string(), path.clone()) {
            tracing::debug!(
                chunk = name,
                replaced = %previous.display(),
                with = %path.display(),
                "chunk name collision"
            );
        }
    }

    tracing::debug!(
        pattern = %pattern.display(),
        chunks = chunks.len(),
        "discovered chunks"
    );

    Ok(chunks)
}

/// Every path matching an absolute glob pattern, in glob order.
pub(crate) fn glob_paths(pattern: &Path) -> Result<Vec<PathBuf>> {
    let pattern = pattern.to_string_lossy();
    let entries = glob::glob(&pattern).map_err(|err| ConfigError::InvalidPattern {
        pattern: pattern.to_string(),
        message: err.msg.to_string(),
    })?;

    let mut paths = Vec::new();
    for entry in entries {
        paths.push(entry?);
    }
    Ok(paths)
}

fn is_partial(path: &Path) -> bool {
    path.file_name()
        .is_some_and(|name| name.to_string_lossy().starts_with('_'))
}
