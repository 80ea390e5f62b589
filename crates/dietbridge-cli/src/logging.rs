//! Logging setup
//!
//! Logs go to stderr so command output on stdout stays clean. `RUST_LOG`
//! directives are honoured on top of the base level.

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Resolve the base level from settings and the `-v` count
pub fn base_level(configured: &str, verbose: u8) -> LevelFilter {
    match verbose {
        0 => configured.parse().unwrap_or(LevelFilter::INFO),
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Install the global subscriber (later calls are no-ops)
pub fn init_logging(configured: &str, verbose: u8) {
    let filter =
        EnvFilter::from_default_env().add_directive(base_level(configured, verbose).into());

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
