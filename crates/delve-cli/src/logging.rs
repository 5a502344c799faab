//! Diagnostic channel setup. Logs always go to stderr; stdout is reserved
//! for the result document.

use tracing_subscriber::EnvFilter;

/// HTTP stack targets clamped to errors regardless of the configured level.
const NOISY_TARGETS: [&str; 5] = ["hyper", "hyper_util", "reqwest", "h2", "rustls"];

/// Build the filter for a configured level (Python-style name or directive).
///
/// A level that does not parse falls back to `warn`.
pub fn filter_for(level: &str) -> EnvFilter {
    EnvFilter::try_new(directives(&delve_config::log_directive(level)))
        .unwrap_or_else(|_| EnvFilter::new(directives("warn")))
}

fn directives(base: &str) -> String {
    std::iter::once(base.to_string())
        .chain(NOISY_TARGETS.iter().map(|target| format!("{target}=error")))
        .collect::<Vec<_>>()
        .join(",")
}

/// Install the global subscriber. Must run once, before anything logs.
pub fn init_tracing(level: &str) -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(filter_for(level))
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn python_level_becomes_default_directive() {
        let filter = filter_for("WARNING").to_string();
        assert!(filter.contains("warn"));
        assert!(filter.contains("hyper=error"));
        assert!(filter.contains("reqwest=error"));
    }

    #[test]
    fn invalid_directive_falls_back_to_warn() {
        let filter = filter_for("delve=loud").to_string();
        assert!(filter.contains("warn"));
        assert!(filter.contains("h2=error"));
    }
}
