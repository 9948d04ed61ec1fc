use anyhow::{Context, Result, anyhow};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Environment variable read for the log filter when `--log-level` is absent.
pub const LOG_LEVEL_ENV: &str = "ADIA_LOG";
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Log file used by the interactive console when none is given.
pub fn default_log_file() -> PathBuf {
    std::env::temp_dir().join("adia.log")
}

/// Install the global tracing subscriber.
///
/// `log_level` is an `EnvFilter` directive string such as `info` or
/// `adia_console=debug`. With `log_file` set, output is appended to that file
/// without ANSI colors so it cannot draw over the terminal UI; otherwise it
/// goes to stderr.
pub fn init_tracing(log_level: &str, log_file: Option<&Path>) -> Result<()> {
    let filter = EnvFilter::try_new(log_level).context("invalid log level")?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    let installed = match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("open log file {}", path.display()))?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
        None => builder.with_writer(std::io::stderr).try_init(),
    };
    installed
        .map_err(|err| anyhow!(err))
        .context("initialize tracing subscriber")
}
