//! Engine strategy, chosen once at startup.

use delve_config::DelveConfig;

use crate::engine::ResearchEngine;
use crate::http::HttpEngine;
use crate::stub::StubEngine;

/// Which engine a run will use.
pub enum EngineBackend {
    /// A working engine.
    Real(Box<dyn ResearchEngine>),
    /// No engine could be loaded; runs produce labeled placeholder data.
    Stub(StubEngine),
}

impl EngineBackend {
    /// Pick the backend for this process from configuration.
    ///
    /// An unconfigured endpoint, or a client that cannot be built, selects
    /// the stub. This never fails: an unavailable engine is not an error.
    pub fn select(config: &DelveConfig, credential: &str) -> Self {
        if !config.engine.is_configured() {
            return Self::Stub(StubEngine::new(
                "research engine not configured (set RESEARCH_ENGINE__URL) - using test data",
            ));
        }

        match HttpEngine::new(&config.engine, credential) {
            Ok(engine) => {
                tracing::debug!(url = engine.base_url(), "using HTTP research engine");
                Self::Real(Box::new(engine))
            }
            Err(error) => Self::Stub(StubEngine::new(format!(
                "research engine could not be loaded: {error} - using test data"
            ))),
        }
    }

    pub fn real(engine: impl ResearchEngine + 'static) -> Self {
        Self::Real(Box::new(engine))
    }

    pub const fn is_stub(&self) -> bool {
        matches!(self, Self::Stub(_))
    }
}

impl std::fmt::Debug for EngineBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Real(_) => f.write_str("EngineBackend::Real"),
            Self::Stub(stub) => f.debug_tuple("EngineBackend::Stub").field(stub).finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use delve_config::EngineConfig;

    use super::*;

    #[test]
    fn unconfigured_endpoint_selects_stub() {
        let backend = EngineBackend::select(&DelveConfig::default(), "sk-test");
        assert!(backend.is_stub());
        let EngineBackend::Stub(stub) = backend else {
            unreachable!()
        };
        assert!(stub.reason().contains("RESEARCH_ENGINE__URL"));
    }

    #[test]
    fn configured_endpoint_selects_http_engine() {
        let config = DelveConfig {
            engine: EngineConfig {
                url: "http://127.0.0.1:8000".into(),
                ..Default::default()
            },
            ..Default::default()
        };
        let backend = EngineBackend::select(&config, "sk-test");
        assert!(!backend.is_stub());
    }
}
