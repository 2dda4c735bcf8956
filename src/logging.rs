//! Sets up the `tracing` subscriber for the binaries.

use std::{fs::OpenOptions, path::Path, sync::Arc};

use tracing_subscriber::{EnvFilter, Layer, filter, layer::SubscriberExt, util::SubscriberInitExt};

/// The filter used when `RUST_LOG` is not set.
const DEFAULT_LOG_FILTER: &str = "warn";

/// Install a global subscriber that logs to stderr.
///
/// The stderr filter is read from `RUST_LOG` and defaults to warnings only so
/// that command output on stdout stays readable. If `log_file` is given,
/// everything at debug level and above is also appended to that file.
///
/// # Errors
/// Returns an error if the log file cannot be opened or a global subscriber
/// has already been installed.
pub fn setup_logging(log_file: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let stderr_log = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(env_filter);

    let debug_log = match log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;

            Some(
                tracing_subscriber::fmt::layer()
                    .pretty()
                    .with_ansi(false)
                    .with_writer(Arc::new(file))
                    .with_filter(filter::LevelFilter::DEBUG),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(stderr_log)
        .with(debug_log)
        .try_init()?;

    Ok(())
}
