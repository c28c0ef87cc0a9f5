//! Logging bootstrap built on `tracing-subscriber`.

use tracing_subscriber::EnvFilter;

/// Default filter used when `RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str = "info,sortflow=debug,sortflow_core=debug";

/// Install a fmt subscriber honouring `RUST_LOG`, falling back to [`DEFAULT_FILTER`].
///
/// Calling this more than once is harmless; later calls leave the first
/// subscriber in place.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    install(filter);
}

/// Install a fmt subscriber with an explicit filter directive, e.g. `"sortflow=trace"`.
pub fn init_with_filter(directive: &str) {
    install(EnvFilter::new(directive));
}

fn install(filter: EnvFilter) {
    if tracing_subscriber::fmt().with_env_filter(filter).try_init().is_err() {
        tracing::trace!("tracing subscriber already installed");
    }
}
