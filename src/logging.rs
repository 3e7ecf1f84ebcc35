//! Structured logging setup.
//!
//! Events go to stderr; stdout carries the RPC response stream.

use tracing_subscriber::EnvFilter;

/// Installs the global `tracing` subscriber with the given filter directive.
///
/// Falls back to `info` if the directive does not parse. Calling this more
/// than once is harmless; later calls leave the first subscriber in place.
pub fn init(filter: &str) {
    let env_filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init();
}
