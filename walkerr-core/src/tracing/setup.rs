//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::logging_config::DEFAULT_LOG_FILTER;

static INIT: Once = Once::new();

/// Initialize the walkerr tracing/logging system.
///
/// Reads the `WALKERR_LOG` environment variable for per-crate log levels.
/// Format: `WALKERR_LOG=walkerr_analysis=debug,walkerr_core=warn`
///
/// Falls back to `walkerr=info` if `WALKERR_LOG` is not set or is invalid.
/// Idempotent: only the first call installs a subscriber.
pub fn init_tracing() {
    init_tracing_with_default(DEFAULT_LOG_FILTER);
}

/// Like [`init_tracing`], with a caller-supplied fallback filter
/// (typically `LoggingConfig::effective_filter`).
pub fn init_tracing_with_default(default_filter: &str) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env("WALKERR_LOG")
            .or_else(|_| EnvFilter::try_new(default_filter))
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

        // A host may already own the global subscriber; keep theirs.
        let _ = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .with(filter)
            .try_init();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_idempotent() {
        init_tracing();
        init_tracing_with_default("walkerr_analysis=debug");
        ::tracing::info!("tracing initialized twice without panicking");
    }
}
