//! Diagnostic logging for the binary.

use tracing_subscriber::EnvFilter;

use super::config::LOG_ENV;

const DEFAULT_FILTER: &str = "warn";

/// Install a stderr subscriber filtered by `FSRES_LOG`.
///
/// Safe to call more than once; later calls are ignored.
pub fn init() {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
