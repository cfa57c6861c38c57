//! Command-line interface definition.
//!
//! - `mdc-bundle generate` - build every bundle a manifest lists and print the
//!   configurations as JSON
//! - `mdc-bundle chunks` - show the entry points a glob discovers

mod commands;

use clap::Parser;

pub use commands::{ChunksArgs, Command, GenerateArgs};

/// Bundler configuration generator for Material Components Web
#[derive(Parser, Debug)]
#[command(
    name = "mdc-bundle",
    version,
    about = "Generate bundler configurations from a bundle manifest",
    long_about = "mdc-bundle turns a project's bundle manifest (mdc-bundle.toml or the\n\
                  'mdcBundle' field of package.json) into complete configurations for the\n\
                  external bundler, and discovers entry points by glob."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}
