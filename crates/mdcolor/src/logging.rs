//! Diagnostic logging setup.

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, e.g. `MDCOLOR_LOG=debug`.
pub const LOG_ENV: &str = "MDCOLOR_LOG";

/// Installs the global subscriber. Logs go to stderr; stdout carries the
/// rendered document only.
///
/// Without `MDCOLOR_LOG` only warnings are shown, or everything down to
/// debug with `--verbose`.
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));

    // a subscriber may already be set when embedded in tests
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
