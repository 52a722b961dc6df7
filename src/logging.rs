use crate::{Error, Result, config::LogsConfig};
use std::{fs::OpenOptions, sync::Mutex};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Resolves the filter directive: `RUST_LOG` wins over the configured level.
pub fn resolve_filter(logs: &LogsConfig) -> String {
    std::env::var("RUST_LOG").unwrap_or_else(|_| logs.level.clone())
}

/// Validates that a filter directive string is usable
pub fn validate_filter(directive: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(directive).map_err(|_| {
        Error::config(format!(
            "Invalid log level: '{}'. Valid levels: error, warn, info, debug, trace",
            directive
        ))
    })
}

/// Installs the process-wide subscriber: JSON lines on stdout, plus an
/// append-only JSON copy in `logs.file` when configured.
pub fn init(logs: &LogsConfig) -> Result<String> {
    let directive = resolve_filter(logs);
    let filter = validate_filter(&directive)?;

    let file_layer = match &logs.file {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            Some(
                fmt::layer()
                    .json()
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().json())
        .with(file_layer)
        .try_init()
        .map_err(|e| Error::config(format!("Failed to install log subscriber: {}", e)))?;

    Ok(directive)
}
