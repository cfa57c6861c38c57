//! `mdc-bundle chunks`

use std::collections::BTreeMap;

use mdc_bundle_config::{ProjectRoot, discover_chunks};

use crate::cli::ChunksArgs;
use crate::commands::project_root;
use crate::error::Result;
use crate::ui;

/// Print the chunks a glob discovers as a JSON object sorted by name.
pub fn execute(args: ChunksArgs) -> Result<()> {
    let root = ProjectRoot::new(project_root(args.root.as_deref())?);
    let chunks = discover_chunks(&root, &args.pattern, args.remove_prefix.as_deref())?;

    if chunks.is_empty() {
        ui::warning(&format!("No files match {}", args.pattern));
    }

    let sorted: BTreeMap<_, _> = chunks.into_iter().collect();
    println!("{}", serde_json::to_string_pretty(&sorted)?);
    Ok(())
}
