pub mod config;
pub mod error;

pub use config::{Config, ServiceAccountConfig, ValidationResult, DEFAULT_TIMEZONE};
pub use error::ConfigError;

use anyhow::Result;

/// Install the global tracing subscriber.
///
/// Honors `RUST_LOG`; falls back to `info`. Calling this twice is harmless:
/// the second call leaves the first subscriber in place.
pub fn init() -> Result<()> {
    let installed = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .try_init()
        .is_ok();

    if installed {
        tracing::info!("gcal core initialized");
    }
    Ok(())
}
