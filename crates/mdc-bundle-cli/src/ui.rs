//! Status messages on stderr, silenced by `--quiet`.

use std::sync::atomic::{AtomicBool, Ordering};

use owo_colors::OwoColorize;

static QUIET: AtomicBool = AtomicBool::new(false);

pub fn set_quiet(quiet: bool) {
    QUIET.store(quiet, Ordering::Relaxed);
}

pub fn is_quiet() -> bool {
    QUIET.load(Ordering::Relaxed)
}

pub fn success(message: &str) {
    if !is_quiet() {
        eprintln!("{} {}", "✓".green().bold(), message);
    }
}

pub fn warning(message: &str) {
    if !is_quiet() {
        eprintln!("{} {}", "⚠".yellow().bold(), message.yellow());
    }
}
