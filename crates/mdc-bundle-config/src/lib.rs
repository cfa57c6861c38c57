//! Build configuration generation for the component library's script and
//! stylesheet bundles.
//!
//! [`BundleBuilder`] produces the configuration objects the external bundler
//! consumes; [`discover_chunks`] finds entry points by glob; a
//! [`BundleManifest`] wires both together from a project's `mdc-bundle.toml`.

pub mod bundle;
pub mod error;
pub mod globber;
pub mod manifest;
pub mod paths;
pub mod policy;
pub mod transforms;

pub use bundle::*;
pub use error::*;
pub use globber::discover_chunks;
pub use manifest::{
    BundleEntry, BundleKind, BundleManifest, ChunkSource, ManifestDiscovery, ManifestOutput,
};
pub use paths::{PathResolver, ProjectRoot};
pub use policy::BuildPolicy;
pub use transforms::{DEFAULT_BANNER, StandardTransforms, Transform, TransformFactory};
