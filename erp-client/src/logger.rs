//! Logging setup
//!
//! `RUST_LOG` takes precedence over the level passed in.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::ClientConfig;

/// Install the global tracing subscriber
///
/// # Arguments
/// * `level` - default filter (e.g., "info", "erp_client=debug")
/// * `json_format` - JSON lines instead of human-readable output
///
/// Returns an error if the filter does not parse or a subscriber is
/// already installed.
pub fn init_logger(level: &str, json_format: bool) -> anyhow::Result<()> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(level)?,
    };
    let registry = tracing_subscriber::registry().with(env_filter);

    if json_format {
        registry
            .with(fmt::layer().json().with_target(true))
            .try_init()?;
    } else {
        registry.with(fmt::layer().with_target(true)).try_init()?;
    }
    Ok(())
}

/// Install the global subscriber at the level configured by `ERP_LOG_LEVEL`.
///
/// Typical startup: `let config = ClientConfig::from_env();` followed by
/// `init_logger_from_config(&config, false)?` and `ErpConsole::from_config(&config)?`.
pub fn init_logger_from_config(config: &ClientConfig, json_format: bool) -> anyhow::Result<()> {
    init_logger(&config.log_level, json_format)
}

/// Test-friendly variant: writes through the test harness and ignores a
/// subscriber that is already installed.
pub fn init_test_logger() {
    let _ = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")))
        .with(fmt::layer().with_test_writer())
        .try_init();
}
