//! Logging setup

use tracing_subscriber::EnvFilter;

use crate::adapters::AppConfig;

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over the configured level. Logs go to stderr
/// so stdout carries only command output and processing events.
pub fn init_logging(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    // A subscriber may already be installed (tests, embedding); keep it
    let _ = if config.json_logs() {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
}
