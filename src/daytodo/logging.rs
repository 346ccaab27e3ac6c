//! Logging bootstrap for the CLI.
//!
//! # Responsibility
//! - Start a stderr logger exactly once per process.
//! - Keep log lines metadata-only: `event=... module=... status=...`. Task text
//!   never goes into a log line.
//!
//! # Invariants
//! - Initialization is idempotent for the same level and never panics.
//! - Re-initialization with a different level is rejected.
//! - The library only emits through `log`; starting a logger is the binary's call.

use flexi_logger::{Logger, LoggerHandle, WriteMode};
use log::debug;
use once_cell::sync::OnceCell;

/// Environment variable that overrides the level picked from `--verbose`.
pub const LOG_ENV_VAR: &str = "DAYTODO_LOG";

static LOGGING_STATE: OnceCell<LoggingState> = OnceCell::new();

struct LoggingState {
    level: &'static str,
    _logger: LoggerHandle,
}

/// Picks the level: an explicit override wins, then `--verbose`, then `warn`.
pub fn resolve_level(verbose: bool, env_override: Option<&str>) -> Result<&'static str, String> {
    match env_override {
        Some(raw) if !raw.trim().is_empty() => normalize_level(raw),
        _ if verbose => Ok("debug"),
        _ => Ok("warn"),
    }
}

/// Starts stderr logging at `level`.
///
/// # Errors
/// - Returns an error when `level` is unsupported.
/// - Returns an error when logging is already running at another level.
/// - Returns an error when the logger backend fails to start.
pub fn init_logging(level: &str) -> Result<(), String> {
    let normalized = normalize_level(level)?;

    let state = LOGGING_STATE.get_or_try_init(|| -> Result<LoggingState, String> {
        let logger = Logger::try_with_str(normalized)
            .map_err(|err| format!("invalid log level `{normalized}`: {err}"))?
            .log_to_stderr()
            .write_mode(WriteMode::Direct)
            .format(flexi_logger::default_format)
            .start()
            .map_err(|err| format!("failed to start logger: {err}"))?;

        debug!(
            "event=app_start module=logging status=ok level={} version={}",
            normalized,
            env!("CARGO_PKG_VERSION")
        );

        Ok(LoggingState {
            level: normalized,
            _logger: logger,
        })
    })?;

    if state.level != normalized {
        return Err(format!(
            "logging already initialized with level `{}`; refusing to switch to `{}`",
            state.level, normalized
        ));
    }
    Ok(())
}

/// Active level, or `None` before [`init_logging`] succeeded.
pub fn logging_level() -> Option<&'static str> {
    LOGGING_STATE.get().map(|state| state.level)
}

fn normalize_level(level: &str) -> Result<&'static str, String> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "info" => Ok("info"),
        "warn" | "warning" => Ok("warn"),
        "error" => Ok("error"),
        "off" => Ok("off"),
        other => Err(format!(
            "unsupported log level `{other}`; expected trace|debug|info|warn|error|off"
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_defaults_to_warn() {
        assert_eq!(resolve_level(false, None), Ok("warn"));
        assert_eq!(resolve_level(false, Some("  ")), Ok("warn"));
    }

    #[test]
    fn verbose_means_debug() {
        assert_eq!(resolve_level(true, None), Ok("debug"));
    }

    #[test]
    fn env_override_wins() {
        assert_eq!(resolve_level(true, Some("ERROR")), Ok("error"));
        assert_eq!(resolve_level(false, Some("warning")), Ok("warn"));
        assert!(resolve_level(false, Some("loud")).is_err());
    }

    #[test]
    fn init_is_idempotent_and_rejects_switch() {
        assert!(init_logging("nonsense").is_err());
        assert!(init_logging("info").is_ok());
        assert!(init_logging("INFO").is_ok());
        assert_eq!(logging_level(), Some("info"));
        assert!(init_logging("debug").is_err());
    }
}
