//! Global tracing subscriber.
//!
//! Logs go to stderr (default level `warn`) or, with a log file, to that
//! file (default level `debug`). `RUST_LOG` overrides either default.

use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{anyhow, Context, Result};
use tracing_subscriber::EnvFilter;

fn filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// Install the global subscriber. Call once, early in `main`.
pub fn init_global(log_file: Option<&Path>) -> Result<()> {
    let builder = tracing_subscriber::fmt().with_target(false);

    let installed = match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file {}", path.display()))?;
            builder
                .with_env_filter(filter("debug"))
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
        None => builder
            .with_env_filter(filter("warn"))
            .with_writer(std::io::stderr)
            .try_init(),
    };

    installed.map_err(|e| anyhow!("Failed to install tracing subscriber: {e}"))
}
