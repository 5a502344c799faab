//! Verbosity names for the diagnostic channel.

/// Level used when `RESEARCH_LOG_LEVEL` is unset.
pub const DEFAULT_LOG_LEVEL: &str = "WARNING";

/// Translate a configured log level into a tracing filter directive.
///
/// Python-style names are accepted case-insensitively (`WARNING` -> `warn`,
/// `CRITICAL`/`FATAL` -> `error`). Anything else is passed through unchanged
/// so full `EnvFilter` directives keep working.
pub fn log_directive(level: &str) -> String {
    let trimmed = level.trim();
    let mapped = match trimmed.to_ascii_lowercase().as_str() {
        "" => "warn",
        "notset" | "trace" => "trace",
        "debug" => "debug",
        "info" => "info",
        "warning" | "warn" => "warn",
        "error" | "critical" | "fatal" => "error",
        "off" => "off",
        _ => return trimmed.to_string(),
    };
    mapped.to_string()
}
