//! A2: logging setup shared by every binary.

use tracing_subscriber::EnvFilter;

/// Initialize `tracing` with `RUST_LOG`-driven filtering, falling back to
/// `imgdupl=info` when the environment variable is unset or invalid.
pub fn init(verbose: bool) {
    let default_directive = if verbose { "imgdupl=debug" } else { "imgdupl=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
