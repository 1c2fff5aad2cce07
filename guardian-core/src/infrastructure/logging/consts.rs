//! Guardian logging constants.

/// Log file name for the guardian engine.
pub const LOG_FILE_NAME: &str = "guardian.log";
/// Error log file name (warn+error).
pub const ERR_LOG_FILE_NAME: &str = "guardian_err.log";

/// Console log pattern (colored).
///
/// Format: `timestamp [LEVEL] message [module] [thread-id]`
pub const LOG_LINE_PATTERN_COLORED: &str = "{d(%Y-%m-%d %H:%M:%S%.3f)} [{h({l:5})}] {m} [{M}] [{I}]{n}";

/// File log pattern (no colors).
pub const LOG_LINE_PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S%.3f)} [{l:5}] {m} [{M}] [{I}]{n}";

/// Rotate at 50 MB.
pub const LOG_FILE_MAX_SIZE: u64 = 50_000_000;

pub const LOG_FILE_MAX_ROLLS: u32 = 5;

/// Crates that log at the requested app level; everything else is off unless opted in.
pub const WHITELISTED_CRATES: &[&str] = &["guardian_core"];
