//! Logging bootstrap for the command line tool.
//!
//! The library only talks to the `log` facade; this module installs the
//! `flexi_logger` backend once per process, writing to stderr so SVG and
//! JSON written to stdout stay clean.

use flexi_logger::{Logger, LoggerHandle};
use once_cell::sync::OnceCell;

static LOGGER: OnceCell<LoggerHandle> = OnceCell::new();

const SUPPORTED_LEVELS: [&str; 6] = ["off", "error", "warn", "info", "debug", "trace"];

/// Starts stderr logging at `level`, unless `RUST_LOG` says otherwise.
///
/// Repeated calls are no-ops. Never panics.
pub fn init_logging(level: &str) -> Result<(), String> {
    let level = level.trim().to_ascii_lowercase();
    if !SUPPORTED_LEVELS.contains(&level.as_str()) {
        return Err(format!(
            "unsupported log level `{level}`; expected one of {}",
            SUPPORTED_LEVELS.join(", ")
        ));
    }

    LOGGER
        .get_or_try_init(|| {
            Logger::try_with_env_or_str(&level)
                .map_err(|err| format!("invalid log specification `{level}`: {err}"))?
                .log_to_stderr()
                .format(flexi_logger::default_format)
                .start()
                .map_err(|err| format!("failed to start logger: {err}"))
        })
        .map(|_| ())
}
