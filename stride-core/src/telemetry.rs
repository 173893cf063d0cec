//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber with env-filter support.
///
/// The filter is taken from `STRIDE_LOG`, then `RUST_LOG`, then defaults
/// to `info`. Safe to call more than once; later calls are no-ops.
pub fn init() {
    let filter = std::env::var("STRIDE_LOG")
        .map(EnvFilter::new)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}
