//! Configuration loading and resolution.

use cloudstatus::{Config, StatusResult};

/// Load configuration from the environment, apply the CLI log level when
/// one was given, and validate the result.
pub fn resolve_config(log_level: Option<&str>) -> StatusResult<Config> {
    let mut config = Config::from_env();
    if let Some(level) = log_level {
        config.log_level = level.to_lowercase();
    }
    config.validate()?;
    Ok(config)
}

/// Filter directive for the tracing subscriber. `RUST_LOG` takes precedence
/// over the configured level.
pub fn log_filter(config_level: &str) -> tracing_subscriber::EnvFilter {
    tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(config_level))
}
