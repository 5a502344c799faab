//! Envelopes written to the failure channel.
//!
//! Every failed run ends with exactly one of these, serialized as a single
//! compact JSON object. The success payload is [`crate::Finding`].

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::depth::DepthLevel;

/// Top-level error message for failures raised after validation.
pub const RESEARCH_FAILED: &str = "Research failed";

/// Failure payload. Always carries `error`; the remaining fields depend on
/// what went wrong.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(untagged)]
pub enum ErrorEnvelope {
    /// Malformed invocation (missing or extra inputs).
    Usage {
        error: String,
        usage: String,
        example: String,
    },
    /// Depth classifier outside the known set.
    InvalidDepth {
        error: String,
        valid_depths: Vec<String>,
    },
    /// Required credential absent from the environment.
    MissingCredential { error: String, solution: String },
    /// Anything raised once research has started.
    Failure {
        error: String,
        message: String,
        #[serde(rename = "type")]
        kind: String,
    },
}

impl ErrorEnvelope {
    #[must_use]
    pub fn usage(program: &str) -> Self {
        Self::Usage {
            error: "Missing required arguments".to_string(),
            usage: format!("{program} '<instructions>' '<depth>'"),
            example: format!("{program} 'Research backgammon' 'moderate'"),
        }
    }

    #[must_use]
    pub fn invalid_depth(depth: &str) -> Self {
        Self::InvalidDepth {
            error: format!("Invalid depth: {depth}"),
            valid_depths: DepthLevel::valid_names(),
        }
    }

    #[must_use]
    pub fn missing_credential(variable: &str) -> Self {
        Self::MissingCredential {
            error: format!("{variable} environment variable not set"),
            solution: format!("Set {variable} in .env file"),
        }
    }

    #[must_use]
    pub fn failure(message: impl Into<String>, kind: impl Into<String>) -> Self {
        Self::Failure {
            error: RESEARCH_FAILED.to_string(),
            message: message.into(),
            kind: kind.into(),
        }
    }

    /// The top-level `error` string.
    #[must_use]
    pub fn error(&self) -> &str {
        match self {
            Self::Usage { error, .. }
            | Self::InvalidDepth { error, .. }
            | Self::MissingCredential { error, .. }
            | Self::Failure { error, .. } => error,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn invalid_depth_lists_valid_levels() {
        let json = serde_json::to_value(ErrorEnvelope::invalid_depth("fast")).unwrap();
        assert_eq!(
            json,
            json!({
                "error": "Invalid depth: fast",
                "valid_depths": ["quick", "moderate", "deep"],
            })
        );
    }

    #[test]
    fn failure_serializes_kind_as_type() {
        let envelope = ErrorEnvelope::failure("boom", "EngineRuntimeError");
        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json["error"], "Research failed");
        assert_eq!(json["type"], "EngineRuntimeError");
        assert_eq!(json["message"], "boom");
        assert_eq!(envelope.error(), RESEARCH_FAILED);
    }

    #[test]
    fn usage_mentions_program() {
        let json = serde_json::to_value(ErrorEnvelope::usage("delve")).unwrap();
        assert_eq!(json["usage"], "delve '<instructions>' '<depth>'");
        assert_eq!(json["example"], "delve 'Research backgammon' 'moderate'");
    }

    #[test]
    fn missing_credential_carries_solution() {
        let envelope = ErrorEnvelope::missing_credential("OPENAI_API_KEY");
        let json = serde_json::to_value(envelope).unwrap();
        assert_eq!(json["error"], "OPENAI_API_KEY environment variable not set");
        assert_eq!(json["solution"], "Set OPENAI_API_KEY in .env file");
    }
}
