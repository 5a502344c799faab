//! Precondition checks run before any engine is touched.
//!
//! Checks run in a fixed order and the first failure wins:
//! input count, then depth, then configuration, then credential.

use delve_config::{CREDENTIAL_VAR, ConfigError, DelveConfig};
use delve_core::{DepthLevel, ErrorEnvelope, ResearchRequest};

/// Program name shown in usage envelopes.
pub const PROGRAM: &str = "delve";

/// Type identifier for configuration failures.
pub const CONFIGURATION_ERROR: &str = "ConfigurationError";

/// Turn raw inputs and the loaded configuration into a research request, or
/// the envelope describing the first failed precondition.
pub fn validate<'a>(
    inputs: &[String],
    config: &'a Result<DelveConfig, ConfigError>,
) -> Result<(ResearchRequest, &'a DelveConfig), ErrorEnvelope> {
    let [instructions, depth] = inputs else {
        return Err(ErrorEnvelope::usage(PROGRAM));
    };

    let depth = DepthLevel::parse(depth).ok_or_else(|| ErrorEnvelope::invalid_depth(depth))?;

    let config = config
        .as_ref()
        .map_err(|error| ErrorEnvelope::failure(error.to_string(), CONFIGURATION_ERROR))?;

    if config.credential().is_none() {
        return Err(ErrorEnvelope::missing_credential(CREDENTIAL_VAR));
    }

    Ok((ResearchRequest::new(instructions.clone(), depth), config))
}
