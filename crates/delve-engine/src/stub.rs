//! Placeholder results used when no research engine is available.
//!
//! Every field of the stub finding says it is test data; a host must never
//! mistake it for a real run.

use delve_core::{Finding, FindingMetadata, ResearchRequest, Settings, Source};

/// `metadata.mode` on placeholder findings.
pub const POC_MODE: &str = "POC";

/// `metadata.reportType` on placeholder findings.
pub const POC_REPORT_TYPE: &str = "poc_mode";

pub const POC_SUMMARY: &str = "⚠️ POC MODE: research engine not available. This is TEST DATA.";

/// Stand-in for an engine that could not be loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StubEngine {
    reason: String,
}

impl StubEngine {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    /// Why the real engine is unavailable.
    pub fn reason(&self) -> &str {
        &self.reason
    }

    /// The labeled placeholder finding for `request`.
    pub fn finding(&self, request: &ResearchRequest, settings: Settings) -> Finding {
        let full_report = format!(
            "# POC Mode Research Report\n\n\
             Query: {query}\n\
             Depth: {depth}\n\n\
             ⚠️ This is simulated data because the research engine is not available.\n\
             To enable real research:\n\
             1. Start a research engine service\n\
             2. Set RESEARCH_ENGINE__URL to its base URL\n\
             3. Set OPENAI_API_KEY in .env\n",
            query = request.instructions,
            depth = request.depth,
        );

        Finding {
            query: request.instructions.clone(),
            depth: request.depth,
            summary: POC_SUMMARY.to_string(),
            full_report,
            sources: vec![
                Source {
                    url: "https://example.com/source1".into(),
                    title: "Example Source 1".into(),
                },
                Source {
                    url: "https://example.com/source2".into(),
                    title: "Example Source 2".into(),
                },
            ],
            sources_analyzed: 2,
            metadata: FindingMetadata {
                max_sources: settings.max_sources,
                max_iterations: settings.max_iterations,
                report_type: POC_REPORT_TYPE.to_string(),
                mode: Some(POC_MODE.to_string()),
                status: Some("test".to_string()),
                warning: Some(self.reason.clone()),
            },
        }
    }
}
