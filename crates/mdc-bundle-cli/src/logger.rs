//! Logging setup for the `mdc-bundle` CLI.
//!
//! Log lines go to stderr so stdout stays valid JSON. Verbosity comes from
//! `--verbose`/`--quiet`, falling back to `RUST_LOG`.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const VERBOSE_FILTER: &str = "mdc_bundle_config=debug,mdc_bundle_cli=debug";
const QUIET_FILTER: &str = "mdc_bundle_config=error,mdc_bundle_cli=error";
const DEFAULT_FILTER: &str = "mdc_bundle_config=info,mdc_bundle_cli=info";

/// Install the global tracing subscriber. Call once, before any logging.
///
/// Level precedence: `verbose` (debug), `quiet` (errors only), `RUST_LOG`,
/// then info for this workspace's crates.
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    init_logger_with_filter(filter_for(verbose, quiet), no_color);
}

/// Install the global tracing subscriber with an explicit filter.
pub fn init_logger_with_filter(filter: EnvFilter, no_color: bool) {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color)
        .compact();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

fn filter_for(verbose: bool, quiet: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else if quiet {
        EnvFilter::new(QUIET_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    }
}

/// Whether stderr output should be colored.
///
/// `NO_COLOR` disables and `FORCE_COLOR` forces colors; otherwise the
/// terminal's capabilities decide.
pub fn should_use_colors() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if std::env::var_os("FORCE_COLOR").is_some() {
        return true;
    }
    console::Term::stderr().features().colors_supported()
}
