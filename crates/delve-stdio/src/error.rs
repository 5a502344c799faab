//! Isolation error types.

use thiserror::Error;

/// A guarded region could not be opened or closed cleanly.
#[derive(Debug, Error)]
pub enum IsolationError {
    /// The private capture buffer could not be created.
    #[error("failed to create stdout capture buffer: {0}")]
    Buffer(#[source] std::io::Error),

    /// stdout could not be redirected into the buffer.
    #[error("failed to redirect stdout: {0}")]
    Acquire(#[source] std::io::Error),

    /// stdout could not be pointed back at the original stream. `captured`
    /// holds whatever could still be read from the buffer.
    #[error("failed to restore stdout: {source}")]
    Restore {
        #[source]
        source: std::io::Error,
        captured: String,
    },
}
