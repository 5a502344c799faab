//! Engine and orchestration error types.

use delve_core::ValidationError;
use delve_stdio::IsolationError;
use thiserror::Error;

/// Errors raised by a research engine while it works.
#[derive(Debug, Error)]
pub enum EngineError {
    /// HTTP transport error talking to the engine service.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Engine service returned a non-success status code.
    #[error("engine API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the engine.
        status: u16,
        /// Error message or response body.
        message: String,
    },

    /// Engine response did not follow the service protocol.
    #[error("engine protocol error: {0}")]
    Protocol(String),

    /// A report or source list was requested before research ran.
    #[error("research has not been started")]
    NotStarted,

    /// The engine reported a failure of its own. For in-process
    /// [`ResearchEngine`](crate::ResearchEngine) implementations whose
    /// failures are not transport or protocol errors; the message is
    /// reported verbatim.
    #[error("{0}")]
    Failed(String),
}

/// Everything that can end a research run after validation has passed.
#[derive(Debug, Error)]
pub enum ResearchError {
    /// The engine returned a value with the wrong shape.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The engine itself failed.
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// stdout could not be isolated around the engine calls.
    #[error(transparent)]
    Isolation(#[from] IsolationError),
}

impl ResearchError {
    /// Type identifier reported in the failure envelope.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "EngineValidationError",
            Self::Engine(_) => "EngineRuntimeError",
            Self::Isolation(_) => "OutputIsolationError",
        }
    }
}
