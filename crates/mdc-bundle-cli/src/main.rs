//! `mdc-bundle` entry point: parse arguments, set up logging, dispatch.

use clap::Parser;
use mdc_bundle_cli::{cli, commands, error, logger, ui};
use miette::Result;

fn main() -> Result<()> {
    let args = cli::Cli::parse();

    logger::init_logger(args.verbose, args.quiet, args.no_color || !logger::should_use_colors());
    ui::set_quiet(args.quiet);

    let result = match args.command {
        cli::Command::Generate(generate_args) => commands::generate_execute(generate_args),
        cli::Command::Chunks(chunks_args) => commands::chunks_execute(chunks_args),
    };

    result.map_err(error::cli_error_to_miette)
}
