//! Tracing subscriber setup.

use crate::config::Config;
use tracing_subscriber::EnvFilter;

/// Builds the event filter from the configured level.
///
/// Falls back to `info` when the level string is not a valid filter directive.
pub fn env_filter(log_level: &str) -> EnvFilter {
    EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Installs the global tracing subscriber.
///
/// `LOG_FORMAT=json` emits one JSON object per event, anything else the
/// human-readable text format. Calling this twice is harmless: the second
/// installation is ignored.
pub fn init_tracing(config: &Config) {
    let filter = env_filter(&config.log_level);
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    let result = if config.log_format == "json" {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    if result.is_err() {
        tracing::debug!("Tracing subscriber already installed");
    }
}
