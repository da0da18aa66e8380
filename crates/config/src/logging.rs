//! Logging configuration for the dcstack CLI
//!
//! Compact terminal output, plus an optional detailed log file.

use crate::Result;
use dcstack_core::Error;
use std::path::Path;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Default filter directives for the dcstack crates at `level`
fn default_directives(level: &str) -> String {
    format!("dcstack={level},dcstack_engine={level},dcstack_config={level}")
}

/// Initialize the logging system
///
/// `RUST_LOG` overrides the default filter. The log file, when given, is
/// appended to and always records at debug level.
///
/// # Examples
/// ```ignore
/// // Progress lines only
/// init(false, None)?;
///
/// // Debug output and a log file
/// init(true, Some(Path::new("dcstack.log")))?;
/// ```
///
/// # Errors
///
/// Returns error if the log file cannot be opened or a global subscriber is
/// already installed
pub fn init(verbose: bool, log_file: Option<&Path>) -> Result<()> {
    let level = if verbose { "debug" } else { "info" };

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(level)));

    let file_layer = match log_file {
        Some(log_path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(log_path)?;

            Some(
                fmt::layer()
                    .with_writer(file)
                    .with_ansi(false)
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true)
                    .pretty()
                    .with_filter(EnvFilter::new("debug")),
            )
        }
        None => None,
    };

    let stdout_layer = fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .with_ansi(true);

    let installed = if verbose {
        tracing_subscriber::registry()
            .with(file_layer)
            .with(stdout_layer.with_filter(env_filter))
            .try_init()
    } else {
        // No timestamps in normal mode
        tracing_subscriber::registry()
            .with(file_layer)
            .with(stdout_layer.without_time().with_filter(env_filter))
            .try_init()
    };

    installed.map_err(|e| Error::Message(format!("Failed to initialize logging: {e}")))
}
