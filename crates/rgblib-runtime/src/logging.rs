//! Tracing subscriber setup
//!
//! The runtime only emits `tracing` events. Hosts that have no subscriber of
//! their own can install this one, driven by `[logging]` in `rgblib.toml`.

use rgblib_config::LoggingConfig;
use tracing_subscriber::{fmt, EnvFilter};

/// Build the filter: `RUST_LOG` when set, otherwise the configured directive
pub fn env_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.filter))
}

/// Install a global subscriber writing to stderr
///
/// Returns `false` if a global subscriber was already installed, by this
/// function or anyone else.
pub fn init(config: &LoggingConfig) -> bool {
    fmt()
        .with_env_filter(env_filter(config))
        .with_ansi(config.ansi)
        .with_writer(std::io::stderr)
        .with_target(true)
        .compact()
        .try_init()
        .is_ok()
}
