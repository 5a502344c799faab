//! Validation errors raised when the research engine returns a value with
//! the wrong shape.
//!
//! Engine transport and runtime errors live in `delve-engine`; everything
//! converges into an error envelope in `delve-cli`.

use thiserror::Error;

/// A value returned by the research engine violated its expected shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The written report was not text.
    #[error("research report must be a string, got {observed}")]
    ReportNotText { observed: &'static str },

    /// The source list was present but not a sequence.
    #[error("research sources must be a list, got {observed}")]
    SourcesNotList { observed: &'static str },
}

impl ValidationError {
    /// JSON type name of the offending value.
    #[must_use]
    pub const fn observed(&self) -> &'static str {
        match self {
            Self::ReportNotText { observed } | Self::SourcesNotList { observed } => observed,
        }
    }
}
