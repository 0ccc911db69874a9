//! crates/logging/src/subscriber.rs
//! Installation of the stderr `tracing` subscriber.

use super::verbosity::Verbosity;
use tracing_subscriber::EnvFilter;

/// Environment variable holding an `EnvFilter` directive that overrides the
/// command-line verbosity.
pub const LOG_ENV_VAR: &str = "DLOG_LOG";

/// Installs the global subscriber for generator diagnostics.
///
/// Events are formatted without timestamps and written to standard error so
/// `--stdout` output stays clean. Returns `false` when a global subscriber
/// was already installed, which happens when several CLI runs share one
/// process (tests); the existing subscriber is kept in that case.
///
/// # Example
///
/// ```rust,ignore
/// use logging::{Verbosity, init_tracing};
///
/// init_tracing(Verbosity::Debug);
/// tracing::debug!(target: "dlog::resolve", "resolving thresholds");
/// ```
pub fn init_tracing(verbosity: Verbosity) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(build_filter(verbosity))
        .with_writer(std::io::stderr)
        .without_time()
        .try_init()
        .is_ok()
}

fn build_filter(verbosity: Verbosity) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(verbosity.directive()))
}
