//! Logging setup shared by the binaries.

use tracing_subscriber::EnvFilter;

/// Initialize the tracing subscriber with `RUST_LOG` filtering (default `info`).
///
/// Safe to call more than once; later calls are ignored.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .try_init();
}
