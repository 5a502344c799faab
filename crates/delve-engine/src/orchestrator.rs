//! Drives one research request through the selected engine inside a
//! guarded stdout region.

use delve_core::validate::{expect_report, expect_source_list};
use delve_core::{Finding, ResearchRequest, Settings};
use delve_stdio::{excerpt, isolate};

use crate::backend::EngineBackend;
use crate::engine::ResearchEngine;
use crate::error::ResearchError;

/// Characters of suppressed output quoted when a run fails.
const FAILURE_EXCERPT_CHARS: usize = 500;

pub struct Orchestrator {
    backend: EngineBackend,
}

impl Orchestrator {
    pub const fn new(backend: EngineBackend) -> Self {
        Self { backend }
    }

    /// Run `request` to completion and build its finding.
    ///
    /// Everything the engine writes to stdout is captured and logged to
    /// stderr instead. Engine failures are not retried.
    ///
    /// # Errors
    ///
    /// - [`ResearchError::Engine`] if the engine fails.
    /// - [`ResearchError::Validation`] if it returns a report or source list
    ///   of the wrong shape.
    /// - [`ResearchError::Isolation`] if stdout cannot be redirected or
    ///   restored.
    pub async fn conduct(&mut self, request: &ResearchRequest) -> Result<Finding, ResearchError> {
        let isolated = isolate(self.run(request)).await?;

        if let Err(error) = &isolated.value
            && !isolated.captured.trim().is_empty()
        {
            tracing::error!(
                %error,
                suppressed = excerpt(&isolated.captured, FAILURE_EXCERPT_CHARS),
                "research failed with suppressed output"
            );
        }

        isolated.value
    }

    async fn run(&mut self, request: &ResearchRequest) -> Result<Finding, ResearchError> {
        let settings = request.depth.settings();
        match &mut self.backend {
            EngineBackend::Stub(stub) => {
                tracing::warn!(
                    reason = stub.reason(),
                    "research engine not available, running in POC mode"
                );
                Ok(stub.finding(request, settings))
            }
            EngineBackend::Real(engine) => research(engine.as_mut(), request, settings).await,
        }
    }
}

async fn research(
    engine: &mut dyn ResearchEngine,
    request: &ResearchRequest,
    settings: Settings,
) -> Result<Finding, ResearchError> {
    tracing::info!(
        depth = %request.depth,
        report_type = settings.report_type,
        "starting research"
    );
    engine
        .conduct_research(&request.instructions, settings.report_type)
        .await?;

    let report = expect_report(engine.write_report().await?)?;
    let sources = expect_source_list(engine.source_urls().await?)?;

    let finding = Finding::assemble(request, settings, report, &sources);
    tracing::info!(
        sources = finding.sources.len(),
        sources_analyzed = finding.sources_analyzed,
        "research complete"
    );
    Ok(finding)
}
