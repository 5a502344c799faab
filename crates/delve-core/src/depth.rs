//! Research depth levels and the fixed settings record for each level.
//!
//! Settings are compiled in and never change during a run. Resolution from a
//! raw classifier is total: anything that is not a known level falls back to
//! [`DepthLevel::Moderate`].

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Breadth/iteration budget selected by the caller for one research run.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum DepthLevel {
    Quick,
    #[default]
    Moderate,
    Deep,
}

impl DepthLevel {
    /// Every valid level, in the order reported to callers.
    pub const ALL: [Self; 3] = [Self::Quick, Self::Moderate, Self::Deep];

    /// Strict parse of a classifier. Returns `None` for anything but the
    /// three exact lowercase names.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|level| level.as_str() == raw)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Quick => "quick",
            Self::Moderate => "moderate",
            Self::Deep => "deep",
        }
    }

    /// The fixed settings record for this level.
    #[must_use]
    pub const fn settings(self) -> Settings {
        match self {
            Self::Quick => Settings {
                max_sources: 5,
                max_iterations: 2,
                report_type: "research_report",
            },
            Self::Moderate => Settings {
                max_sources: 10,
                max_iterations: 4,
                report_type: "research_report",
            },
            Self::Deep => Settings {
                max_sources: 20,
                max_iterations: 6,
                report_type: "detailed_report",
            },
        }
    }

    /// Names of all valid levels, for error envelopes.
    #[must_use]
    pub fn valid_names() -> Vec<String> {
        Self::ALL.iter().map(|level| level.as_str().to_string()).collect()
    }
}

impl fmt::Display for DepthLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Research budget for one depth level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    /// Upper bound on sources reported back to the host.
    pub max_sources: u32,
    /// Iteration budget handed to the engine's planner.
    pub max_iterations: u32,
    /// Report flavor requested from the engine.
    pub report_type: &'static str,
}

/// Resolve a raw depth classifier to its settings.
///
/// Unknown classifiers resolve to the `moderate` settings; this never fails.
#[must_use]
pub fn resolve(depth: &str) -> Settings {
    DepthLevel::parse(depth).unwrap_or_default().settings()
}
