//! Structured logging setup.
//!
//! Log events go to stderr so that reports printed on stdout stay clean. The
//! filter comes from `PCTL_LOG` (same syntax as `RUST_LOG`), defaulting to
//! `info` for this crate and `warn` for everything else.

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "PCTL_LOG";

const DEFAULT_FILTER: &str = "warn,percentile_curves=info";

/// Install the global subscriber. Calling it twice is harmless.
pub fn init() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
