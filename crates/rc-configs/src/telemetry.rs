//! Logging setup. Called once from `main`, before anything logs.

use tracing_subscriber::EnvFilter;

use crate::{ConfigError, LogFormat, LoggingConfig};

pub fn init_tracing(cfg: &LoggingConfig) -> Result<(), ConfigError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&cfg.level))
        .map_err(|e| ConfigError::Logging(e.to_string()))?;

    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(true);
    let installed = match cfg.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.try_init(),
    };
    installed.map_err(|e| ConfigError::Logging(e.to_string()))?;

    tracing::debug!(level = %cfg.level, format = ?cfg.format, "tracing initialized");
    Ok(())
}
