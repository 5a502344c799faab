use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::depth::{DepthLevel, Settings};
use crate::validate::canonical_url;

/// Reports longer than this many characters are cut down for the summary.
pub const SUMMARY_CHAR_LIMIT: usize = 500;

/// Marker appended to a truncated summary.
pub const SUMMARY_ELLIPSIS: &str = "...";

/// One research job, built once from the process inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResearchRequest {
    pub instructions: String,
    pub depth: DepthLevel,
}

impl ResearchRequest {
    #[must_use]
    pub fn new(instructions: impl Into<String>, depth: DepthLevel) -> Self {
        Self {
            instructions: instructions.into(),
            depth,
        }
    }
}

/// A source URL consulted by the engine.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Source {
    pub url: String,
    pub title: String,
}

impl Source {
    /// Build a source with the synthesized `Source {n}` title.
    ///
    /// `position` is 1-based.
    #[must_use]
    pub fn numbered(position: usize, url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: format!("Source {position}"),
        }
    }
}

/// Settings echo plus mode flags. Mode flags appear only on placeholder
/// results produced without a research engine.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FindingMetadata {
    pub max_sources: u32,
    pub max_iterations: u32,
    pub report_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

impl FindingMetadata {
    /// Metadata for a real engine run: the settings echo, no mode flags.
    #[must_use]
    pub fn from_settings(settings: Settings) -> Self {
        Self {
            max_sources: settings.max_sources,
            max_iterations: settings.max_iterations,
            report_type: settings.report_type.to_string(),
            mode: None,
            status: None,
            warning: None,
        }
    }
}

/// Success payload written to stdout.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Finding {
    pub query: String,
    pub depth: DepthLevel,
    pub summary: String,
    pub full_report: String,
    pub sources: Vec<Source>,
    /// Number of URL entries the engine returned, counted before empty
    /// entries are dropped and before the list is clamped to `max_sources`.
    pub sources_analyzed: usize,
    pub metadata: FindingMetadata,
}

impl Finding {
    /// Assemble a finding from a validated report and the engine's raw
    /// source list.
    #[must_use]
    pub fn assemble(
        request: &ResearchRequest,
        settings: Settings,
        report: String,
        raw_sources: &[Value],
    ) -> Self {
        let limit = usize::try_from(settings.max_sources).unwrap_or(usize::MAX);
        let sources = raw_sources
            .iter()
            .filter_map(canonical_url)
            .take(limit)
            .enumerate()
            .map(|(idx, url)| Source::numbered(idx + 1, url))
            .collect();

        Self {
            query: request.instructions.clone(),
            depth: request.depth,
            summary: summarize(&report),
            full_report: report,
            sources,
            sources_analyzed: raw_sources.len(),
            metadata: FindingMetadata::from_settings(settings),
        }
    }
}

/// Short form of a report: verbatim up to the limit, otherwise the first
/// [`SUMMARY_CHAR_LIMIT`] characters followed by [`SUMMARY_ELLIPSIS`].
#[must_use]
pub fn summarize(report: &str) -> String {
    match report.char_indices().nth(SUMMARY_CHAR_LIMIT) {
        Some((cut, _)) => format!("{}{SUMMARY_ELLIPSIS}", &report[..cut]),
        None => report.to_string(),
    }
}
