use clap::{Args, Subcommand};
use std::path::PathBuf;

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate bundle configurations from the manifest
    ///
    /// Loads the manifest, builds every bundle it lists in order and writes
    /// the configurations as a JSON array.
    Generate(GenerateArgs),

    /// Discover entry points matching a glob
    ///
    /// Prints the chunk name to source path mapping the globber produces,
    /// sorted by chunk name.
    Chunks(ChunksArgs),
}

/// Arguments for the generate command
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Project root every manifest path is relative to
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Manifest file to load instead of discovering one under the root
    ///
    /// TOML by default; a `.json` extension selects JSON and a file named
    /// `package.json` is read through its `mdcBundle` field.
    #[arg(short, long, value_name = "FILE")]
    pub manifest: Option<PathBuf>,

    /// Write the configurations to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub out: Option<PathBuf>,

    /// Emit compact JSON
    #[arg(long)]
    pub compact: bool,
}

/// Arguments for the chunks command
#[derive(Args, Debug)]
pub struct ChunksArgs {
    /// Root-relative glob pattern, e.g. "/test/screenshot/**/*.scss"
    #[arg(value_name = "PATTERN")]
    pub pattern: String,

    /// Project root the pattern is relative to
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Leading text to strip from every chunk name
    #[arg(long, value_name = "PREFIX")]
    pub remove_prefix: Option<String>,
}
