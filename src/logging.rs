use std::sync::Once;

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info";

static INIT: Once = Once::new();

/// Installs a fmt subscriber filtered by `RUST_LOG`. Later calls are no-ops, and an
/// already installed global subscriber is left in place.
pub fn init() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
        if let Err(err) = tracing_subscriber::fmt().with_env_filter(filter).try_init() {
            tracing::debug!("tracing subscriber already installed: {err}");
        }
    });
}
