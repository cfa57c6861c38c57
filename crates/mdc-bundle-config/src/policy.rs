use serde::{Deserialize, Serialize};

use crate::bundle::Devtool;

/// Build-wide switches shared by every bundle a builder produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildPolicy {
    /// Emit source maps for script bundles
    #[serde(default = "default_true")]
    pub script_source_maps: bool,

    /// Emit source maps for style bundles and every stage of the style pipeline
    #[serde(default = "default_true")]
    pub style_source_maps: bool,
}

impl BuildPolicy {
    pub fn script_devtool(&self) -> Devtool {
        Devtool::from_enabled(self.script_source_maps)
    }

    pub fn style_devtool(&self) -> Devtool {
        Devtool::from_enabled(self.style_source_maps)
    }
}

impl Default for BuildPolicy {
    fn default() -> Self {
        Self {
            script_source_maps: true,
            style_source_maps: true,
        }
    }
}

fn default_true() -> bool {
    true
}
