//! Tracing setup: env-filtered subscriber plus span definitions.

pub mod spans;

use summa_core::config::ObservabilityConfig;
use tracing_subscriber::EnvFilter;

/// Environment variable that overrides the configured log level.
pub const LOG_ENV_VAR: &str = "SUMMA_LOG";

/// Initialize the global subscriber from configuration.
///
/// `SUMMA_LOG` wins over `config.log_level` when set. Output is JSON lines
/// when `config.json` is true, human-readable otherwise.
pub fn init(config: &ObservabilityConfig) {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    if config.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    }
}

/// Initialize tracing with a custom filter string (for testing or embedding).
/// Returns `false` if a global subscriber is already installed.
pub fn init_with_filter(filter: &str) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(true)
        .with_test_writer()
        .try_init()
        .is_ok()
}
