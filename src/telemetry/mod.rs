//! Structured logging setup.

use anyhow::{Context, Result};

use crate::config::Config;

const DEFAULT_LEVEL: &str = "info";

/// Configures structured logging based on configuration.
/// `RUST_LOG` overrides the configured level. Production gets JSON lines,
/// everything else a pretty console format. Fails if a global subscriber is
/// already installed.
pub fn configure_logger(cfg: &Config) -> Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let log_level = cfg
        .logs()
        .and_then(|logs| logs.level.as_ref())
        .map(|s| s.as_str())
        .unwrap_or(DEFAULT_LEVEL);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    if cfg.is_prod() {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .try_init()
            .context("failed to install JSON logger")
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().pretty())
            .try_init()
            .context("failed to install console logger")
    }
}
