//! Logging setup for the command line tool.
//!
//! Installs a global tracing subscriber writing to stderr, so stdout stays
//! free for command output. `RUST_LOG` wins when set; otherwise the level
//! follows the `-v` / `-q` flags.

use tracing_subscriber::{fmt, prelude::*, EnvFilter, Registry};

/// Errors that may occur while initializing logging.
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    /// Failed to set the global tracing subscriber.
    #[error("Failed to install global tracing subscriber: {0}")]
    SetGlobal(#[from] tracing::subscriber::SetGlobalDefaultError),
}

/// Default filter directive for a verbosity level.
///
/// `quiet` shows warnings only; `verbose` counts up from info to trace.
pub fn default_directive(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "warn";
    }
    match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    }
}

fn build_env_filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// Initialize the global subscriber. Fails if one is already installed.
pub fn init(verbose: u8, quiet: bool) -> Result<(), LoggingError> {
    let env_filter = build_env_filter(default_directive(verbose, quiet));
    let stderr_layer = fmt::layer().with_target(false).with_writer(std::io::stderr);

    let subscriber = Registry::default().with(env_filter).with(stderr_layer);
    tracing::subscriber::set_global_default(subscriber)?;
    tracing::debug!("Logging initialized");
    Ok(())
}
