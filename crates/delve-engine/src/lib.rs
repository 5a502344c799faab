//! # delve-engine
//!
//! Research engine strategies and the orchestrator that drives them.
//!
//! - [`ResearchEngine`]: the three-call engine contract
//! - [`HttpEngine`]: an engine service reached over HTTP
//! - [`StubEngine`]: labeled placeholder results when no engine is available
//! - [`EngineBackend`]: the strategy chosen once at startup
//! - [`Orchestrator`]: runs a request inside a guarded stdout region

mod backend;
mod engine;
mod error;
mod http;
mod orchestrator;
mod stub;

pub use backend::EngineBackend;
pub use engine::ResearchEngine;
pub use error::{EngineError, ResearchError};
pub use http::HttpEngine;
pub use orchestrator::Orchestrator;
pub use stub::{POC_MODE, POC_REPORT_TYPE, POC_SUMMARY, StubEngine};
