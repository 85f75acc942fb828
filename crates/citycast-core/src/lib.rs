pub mod config;
pub mod error;

pub use config::{Config, HourReference, LoggingConfig, UiConfig, ValidationResult, WeatherConfig};
pub use error::{AppError, ConfigError, NetworkError, ReqwestErrorExt, WeatherError};

use anyhow::Result;

/// Initialize tracing/logging.
///
/// `RUST_LOG` wins over `default_level`. Output goes to stderr so stdout
/// carries only rendered weather.
pub fn init(default_level: &str) -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {e}"))?;

    tracing::debug!("citycast core initialized");
    Ok(())
}
