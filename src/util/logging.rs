// RestoreConfig - util/logging.rs
//
// Structured logging with runtime-selectable verbosity.
//
// Activation:
//   - Environment variable: RUST_LOG=debug (or trace), used verbatim
//   - CLI flag: --debug
//   - Config file: [logging] level = "debug"
//
// Unless RUST_LOG is set, the diagnostics target (restoration failures
// recorded by the panel) is never filtered below DIAGNOSTICS_MIN_LEVEL.
// Restoration program output is only logged at trace level; it may contain
// host paths.
//
// Output: stderr.

use super::constants::{
    APP_NAME, APP_VERSION, DEFAULT_LOG_LEVEL, DIAGNOSTICS_MIN_LEVEL, DIAGNOSTICS_TARGET,
    VALID_LOG_LEVELS,
};
use tracing_subscriber::EnvFilter;

/// Initialise the logging subsystem.
///
/// Priority: RUST_LOG env var > CLI --debug flag > config level > default "info".
pub fn init(debug_flag: bool, config_level: Option<&str>) {
    let filter = match std::env::var("RUST_LOG") {
        Ok(_) => EnvFilter::from_default_env(),
        Err(_) => EnvFilter::new(filter_directives(debug_flag, config_level)),
    };

    // try_init: the headless path and tests may initialise more than once.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(true)
        .with_line_number(true)
        .compact()
        .try_init();

    tracing::debug!(app = APP_NAME, version = APP_VERSION, "Logging initialised");
}

/// Filter directives for the chosen base level, plus the diagnostics floor.
fn filter_directives(debug_flag: bool, config_level: Option<&str>) -> String {
    let base = if debug_flag {
        "debug"
    } else {
        config_level.unwrap_or(DEFAULT_LOG_LEVEL)
    };
    let diagnostics = more_verbose(base, DIAGNOSTICS_MIN_LEVEL);
    format!("{base},{DIAGNOSTICS_TARGET}={diagnostics}")
}

/// The more verbose of two levels from `VALID_LOG_LEVELS`. Unknown levels
/// lose to known ones.
fn more_verbose<'a>(a: &'a str, b: &'a str) -> &'a str {
    let rank = |level: &str| VALID_LOG_LEVELS.iter().position(|l| *l == level);
    if rank(a) >= rank(b) {
        a
    } else {
        b
    }
}
