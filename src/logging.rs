//! Diagnostic logging to stderr
//!
//! User-facing progress is plain `println!`; this subscriber only carries
//! internal detail (probe candidates, subprocess command lines, timings).
//! Enable it with e.g. `PYSKEL_LOG=debug`.

use tracing_subscriber::EnvFilter;

/// Environment variable holding the filter directive
pub const LOG_ENV: &str = "PYSKEL_LOG";

const DEFAULT_LEVEL: &str = "warn";

/// Install the global subscriber. Safe to call more than once.
pub fn init() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(LOG_ENV)
                .or_else(|_| EnvFilter::try_new(DEFAULT_LEVEL))
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
