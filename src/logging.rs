// src/logging.rs
// =============================================================================
// Logging setup.
//
// Logs go to stderr so that stdout only carries the summary (or the JSON
// report with --json). RUST_LOG always wins; otherwise --verbose selects
// debug output for this crate.
// =============================================================================

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub fn init_logger(verbose: bool) {
    let default = if verbose {
        "repo_copy=debug,info"
    } else {
        "repo_copy=info,warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    // A second call (e.g. from tests) keeps the first subscriber
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .try_init();
}
