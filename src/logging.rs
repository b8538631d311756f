//! Logging setup for the binary
//!
//! Diagnostics go to stderr through `tracing-subscriber`; stdout carries only
//! rendered records. `RUST_LOG` overrides the level chosen from the flags.

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// Default filter directive for the given verbosity flags
pub fn default_directive(quiet: bool, verbose: bool) -> &'static str {
    match (quiet, verbose) {
        (_, true) => "quickrun=debug",
        (true, false) => "error",
        (false, false) => "warn",
    }
}

/// Install the global subscriber. Safe to call more than once; later calls
/// are ignored.
pub fn init(quiet: bool, verbose: bool, color: bool) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(quiet, verbose)));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(color)
        .with_target(true)
        .with_level(true)
        .with_thread_names(true)
        .compact();

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .try_init();
}
