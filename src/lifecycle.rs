//! Process-level setup for the command-line front end.

use tracing_subscriber::EnvFilter;

/// Default filter when neither `RUST_LOG` nor an explicit level is given.
const DEFAULT_DIRECTIVE: &str = "seoinsikt=info,warn";

/// Initialize logging with tracing_subscriber.
///
/// An explicit `level` wins over `RUST_LOG`. Logs go to stderr so JSON output
/// on stdout stays clean.
pub fn init_logging(level: Option<&str>) {
    let filter = match level {
        Some(level) => EnvFilter::try_new(format!("seoinsikt={},warn", level))
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE)),
        None => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE)),
    };

    // A second init (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .compact()
        .with_target(false)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .try_init();
}
