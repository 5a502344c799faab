//! The narrow contract every research engine implements.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::EngineError;

/// An autonomous research engine, driven through three sequential calls:
/// research, then report, then sources.
///
/// Values come back untyped; shape checks happen in `delve_core::validate`
/// so every engine is held to the same contract.
#[async_trait]
pub trait ResearchEngine: Send {
    /// Plan and run the research for `query`, producing `report_type`.
    async fn conduct_research(&mut self, query: &str, report_type: &str)
    -> Result<(), EngineError>;

    /// The written report. Expected to be a JSON string.
    async fn write_report(&mut self) -> Result<Value, EngineError>;

    /// URLs the engine consulted. `None` when the engine reports none.
    async fn source_urls(&mut self) -> Result<Option<Value>, EngineError>;
}
