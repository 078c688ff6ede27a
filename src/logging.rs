//! Tracing setup for the binary and tests

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` takes precedence; otherwise `fallback_filter` (from settings)
/// is used. Output goes to stderr so command output stays pipeable. Calling
/// this more than once is a no-op.
pub fn init(fallback_filter: &str) {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(fallback_filter))
            .unwrap_or_else(|_| EnvFilter::new("monthwise=info"));

        // Another subscriber may already be installed by an embedding app
        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    });
}
