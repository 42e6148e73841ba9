//! Logging and tracing configuration
//!
//! Log output is controlled by `RUST_LOG`. Without it, this crate logs at
//! INFO and dependencies at WARN.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "apibdd=info,warn";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Initialize tracing for the CLI (stdout logging)
pub fn init_cli() {
    tracing_subscriber::registry()
        .with(env_filter())
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}

/// Initialize tracing for a scenario run
///
/// Scenario progress goes to stdout, so logs are written to stderr. Safe to
/// call more than once; later calls are ignored.
pub fn init_runner() {
    let _ = tracing_subscriber::registry()
        .with(env_filter())
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .compact(),
        )
        .try_init();
}
